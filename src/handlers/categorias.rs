// src/handlers/categorias.rs

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
pub struct CategoriaPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    pub descricao: Option<String>,
}

pub async fn listar_categorias(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categorias = app_state.catalogo_service.listar_categorias().await?;
    Ok((StatusCode::OK, Json(categorias)))
}

pub async fn criar_categoria(
    State(app_state): State<AppState>,
    Json(payload): Json<CategoriaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let categoria = app_state
        .catalogo_service
        .criar_categoria(&payload.nome, payload.descricao.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(categoria)))
}

pub async fn atualizar_categoria(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoriaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let categoria = app_state
        .catalogo_service
        .atualizar_categoria(id, &payload.nome, payload.descricao.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(categoria)))
}

pub async fn excluir_categoria(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalogo_service.excluir_categoria(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
