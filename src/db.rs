pub mod catalogo_repo;
pub use catalogo_repo::CatalogoRepository;
pub mod movimentacao_repo;
pub use movimentacao_repo::MovimentacaoRepository;
pub mod config_repo;
pub use config_repo::ConfigRepository;
