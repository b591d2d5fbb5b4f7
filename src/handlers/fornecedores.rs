// src/handlers/fornecedores.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FornecedorPayload {
    #[validate(length(min = 1, message = "O nome fantasia é obrigatório."))]
    pub nome_fantasia: String,
    pub cnpj: Option<String>,
    pub telefone: Option<String>,
    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,
}

pub async fn listar_fornecedores(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let fornecedores = app_state.catalogo_service.listar_fornecedores().await?;
    Ok((StatusCode::OK, Json(fornecedores)))
}

pub async fn criar_fornecedor(
    State(app_state): State<AppState>,
    Json(payload): Json<FornecedorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let fornecedor = app_state
        .catalogo_service
        .criar_fornecedor(
            &payload.nome_fantasia,
            payload.cnpj.as_deref(),
            payload.telefone.as_deref(),
            payload.email.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(fornecedor)))
}

pub async fn atualizar_fornecedor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FornecedorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let fornecedor = app_state
        .catalogo_service
        .atualizar_fornecedor(
            id,
            &payload.nome_fantasia,
            payload.cnpj.as_deref(),
            payload.telefone.as_deref(),
            payload.email.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(fornecedor)))
}

pub async fn excluir_fornecedor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalogo_service.excluir_fornecedor(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
