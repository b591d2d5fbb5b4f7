// src/handlers/produtos.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{common::error::AppError, config::AppState, services::desativacao::ModoDescarte};

// ---
// Validação Customizada
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: Criar/Atualizar Produto
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub preco_venda: Decimal,

    // Se o JSON não tiver esse campo, assume 0
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub preco_custo: Decimal,

    #[validate(range(min = 0, message = "O estoque mínimo não pode ser negativo."))]
    #[serde(default)]
    pub estoque_minimo: i32,

    pub id_categoria: Option<Uuid>,
    pub id_fornecedor: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListarProdutosParams {
    #[serde(default)]
    pub apenas_ativos: bool,
}

// ---
// Handlers: CRUD de Produtos
// ---
pub async fn listar_produtos(
    State(app_state): State<AppState>,
    Query(params): Query<ListarProdutosParams>,
) -> Result<impl IntoResponse, AppError> {
    let produtos = app_state
        .catalogo_service
        .listar_produtos(params.apenas_ativos)
        .await?;
    Ok((StatusCode::OK, Json(produtos)))
}

pub async fn buscar_produto(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let produto = app_state.catalogo_service.buscar_produto(id).await?;
    Ok((StatusCode::OK, Json(produto)))
}

pub async fn criar_produto(
    State(app_state): State<AppState>,
    Json(payload): Json<ProdutoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let produto = app_state
        .catalogo_service
        .criar_produto(
            &payload.nome,
            payload.preco_venda,
            payload.preco_custo,
            payload.estoque_minimo,
            payload.id_categoria,
            payload.id_fornecedor,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(produto)))
}

pub async fn atualizar_produto(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProdutoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let produto = app_state
        .catalogo_service
        .atualizar_produto(
            id,
            &payload.nome,
            payload.preco_venda,
            payload.preco_custo,
            payload.estoque_minimo,
            payload.id_categoria,
            payload.id_fornecedor,
        )
        .await?;

    Ok((StatusCode::OK, Json(produto)))
}

// Exclusão física só é permitida para produto sem nenhuma movimentação.
pub async fn excluir_produto(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalogo_service.excluir_produto(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Payload: Desativação (baixa de saldo residual)
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DesativarPayload {
    // Obrigatório apenas quando há saldo pendente; o service decide.
    pub modo: Option<ModoDescarte>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub preco_liquidacao: Option<Decimal>,
}

pub async fn desativar_produto(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DesativarPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let produto = app_state
        .desativacao_service
        .desativar(id, payload.modo, payload.preco_liquidacao)
        .await?;

    Ok((StatusCode::OK, Json(produto)))
}

pub async fn reativar_produto(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let produto = app_state.desativacao_service.reativar(id).await?;
    Ok((StatusCode::OK, Json(produto)))
}
