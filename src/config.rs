// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{CatalogoRepository, ConfigRepository, MovimentacaoRepository},
    services::{CaixaService, CatalogoService, DesativacaoService, EstoqueService, RelatorioService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub catalogo_service: CatalogoService,
    pub estoque_service: EstoqueService,
    pub relatorio_service: RelatorioService,
    pub caixa_service: CaixaService,
    pub desativacao_service: DesativacaoService,
    pub config_repo: ConfigRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let catalogo_repo = CatalogoRepository::new(db_pool.clone());
        let movimentacao_repo = MovimentacaoRepository::new(db_pool.clone());
        let config_repo = ConfigRepository::new(db_pool.clone());

        let catalogo_service =
            CatalogoService::new(catalogo_repo.clone(), movimentacao_repo.clone());
        let estoque_service =
            EstoqueService::new(catalogo_repo.clone(), movimentacao_repo.clone());
        let relatorio_service =
            RelatorioService::new(catalogo_repo.clone(), movimentacao_repo.clone());
        let caixa_service = CaixaService::new(
            catalogo_repo.clone(),
            movimentacao_repo.clone(),
            config_repo.clone(),
        );
        let desativacao_service = DesativacaoService::new(catalogo_repo, movimentacao_repo);

        Ok(Self {
            db_pool,
            catalogo_service,
            estoque_service,
            relatorio_service,
            caixa_service,
            desativacao_service,
            config_repo,
        })
    }
}
