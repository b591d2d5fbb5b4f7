// src/main.rs

use axum::{
    Router,
    routing::{get, post, put},
};
use tokio::net::TcpListener;

mod common;
mod config;
mod db;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let produto_routes = Router::new()
        .route(
            "/",
            post(handlers::produtos::criar_produto).get(handlers::produtos::listar_produtos),
        )
        .route(
            "/{id}",
            get(handlers::produtos::buscar_produto)
                .put(handlers::produtos::atualizar_produto)
                .delete(handlers::produtos::excluir_produto),
        )
        .route("/{id}/desativar", post(handlers::produtos::desativar_produto))
        .route("/{id}/reativar", post(handlers::produtos::reativar_produto));

    let fornecedor_routes = Router::new()
        .route(
            "/",
            post(handlers::fornecedores::criar_fornecedor)
                .get(handlers::fornecedores::listar_fornecedores),
        )
        .route(
            "/{id}",
            put(handlers::fornecedores::atualizar_fornecedor)
                .delete(handlers::fornecedores::excluir_fornecedor),
        );

    let categoria_routes = Router::new()
        .route(
            "/",
            post(handlers::categorias::criar_categoria)
                .get(handlers::categorias::listar_categorias),
        )
        .route(
            "/{id}",
            put(handlers::categorias::atualizar_categoria)
                .delete(handlers::categorias::excluir_categoria),
        );

    let movimentacao_routes = Router::new().route(
        "/",
        post(handlers::movimentacoes::registrar_movimentacao)
            .get(handlers::movimentacoes::listar_movimentacoes),
    );

    let relatorio_routes = Router::new()
        .route("/estoque", get(handlers::relatorios::relatorio_estoque))
        .route("/financeiro", get(handlers::relatorios::relatorio_financeiro))
        .route("/caixa", get(handlers::relatorios::posicao_caixa));

    let config_routes = Router::new().route(
        "/saldo-inicial",
        get(handlers::configuracoes::buscar_saldo_inicial)
            .put(handlers::configuracoes::salvar_saldo_inicial),
    );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/produtos", produto_routes)
        .nest("/api/fornecedores", fornecedor_routes)
        .nest("/api/categorias", categoria_routes)
        .nest("/api/movimentacoes", movimentacao_routes)
        .route("/api/compras", post(handlers::movimentacoes::registrar_compra))
        .route("/api/vendas", post(handlers::movimentacoes::registrar_venda))
        .nest("/api/relatorios", relatorio_routes)
        .nest("/api/configuracoes", config_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
