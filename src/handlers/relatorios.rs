// src/handlers/relatorios.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioEstoqueParams {
    // Por padrão o relatório de estoque mostra só produtos ativos, como a
    // tela de inventário.
    #[serde(default = "default_apenas_ativos")]
    pub apenas_ativos: bool,
    pub id_categoria: Option<Uuid>,
    // Pesquisa por nome, case-insensitive.
    pub nome: Option<String>,
}

fn default_apenas_ativos() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodoParams {
    pub inicio: NaiveDate,
    pub fim: NaiveDate,
}

pub async fn relatorio_estoque(
    State(app_state): State<AppState>,
    Query(params): Query<RelatorioEstoqueParams>,
) -> Result<impl IntoResponse, AppError> {
    let relatorio = app_state
        .relatorio_service
        .estoque(
            params.apenas_ativos,
            params.id_categoria,
            params.nome.as_deref(),
        )
        .await?;
    Ok((StatusCode::OK, Json(relatorio)))
}

pub async fn relatorio_financeiro(
    State(app_state): State<AppState>,
    Query(params): Query<PeriodoParams>,
) -> Result<impl IntoResponse, AppError> {
    let relatorio = app_state
        .relatorio_service
        .financeiro_periodo(params.inicio, params.fim)
        .await?;
    Ok((StatusCode::OK, Json(relatorio)))
}

pub async fn posicao_caixa(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let posicao = app_state.caixa_service.posicao_atual().await?;
    Ok((StatusCode::OK, Json(posicao)))
}
