pub mod projecao;
pub mod caixa;
pub use caixa::CaixaService;
pub mod relatorio;
pub use relatorio::RelatorioService;
pub mod estoque_service;
pub use estoque_service::EstoqueService;
pub mod desativacao;
pub use desativacao::DesativacaoService;
pub mod catalogo_service;
pub use catalogo_service::CatalogoService;
