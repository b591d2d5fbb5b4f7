// src/handlers/configuracoes.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::{common::error::AppError, config::AppState, db::config_repo::CHAVE_SALDO_INICIAL};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaldoInicialPayload {
    pub valor: Decimal,
}

pub async fn buscar_saldo_inicial(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let valor = app_state.config_repo.saldo_inicial().await?;
    Ok((StatusCode::OK, Json(json!({ "saldoInicial": valor }))))
}

// Editar o saldo inicial não reescreve o histórico; só desloca a base de
// todos os cálculos de caixa a partir da próxima leitura.
pub async fn salvar_saldo_inicial(
    State(app_state): State<AppState>,
    Json(payload): Json<SaldoInicialPayload>,
) -> Result<impl IntoResponse, AppError> {
    let valor = app_state
        .config_repo
        .salvar(CHAVE_SALDO_INICIAL, payload.valor)
        .await?;
    Ok((StatusCode::OK, Json(json!({ "saldoInicial": valor }))))
}
