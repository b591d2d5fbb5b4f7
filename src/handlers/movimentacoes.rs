// src/handlers/movimentacoes.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::estoque::{FiltroMovimentacoes, NovaMovimentacao, TipoMovimentacao},
};

// ---
// Payload: Registrar Movimentação (tela de histórico)
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MovimentacaoPayload {
    pub id_produto: Uuid,

    pub tipo: TipoMovimentacao,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantidade: i32,

    pub motivo: Option<String>,
}

// Compras e vendas passo-a-passo: o tipo é implícito na rota.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompraVendaPayload {
    pub id_produto: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantidade: i32,

    pub motivo: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricoParams {
    pub id_produto: Option<Uuid>,
    pub id_categoria: Option<Uuid>,
    pub tipo: Option<TipoMovimentacao>,
    pub inicio: Option<NaiveDate>,
    pub fim: Option<NaiveDate>,
}

// ---
// Handlers
// ---
pub async fn listar_movimentacoes(
    State(app_state): State<AppState>,
    Query(params): Query<HistoricoParams>,
) -> Result<impl IntoResponse, AppError> {
    let filtro = FiltroMovimentacoes {
        id_produto: params.id_produto,
        id_categoria: params.id_categoria,
        tipo: params.tipo,
        inicio: params.inicio,
        fim: params.fim,
    };

    let movimentacoes = app_state.estoque_service.listar_historico(&filtro).await?;
    Ok((StatusCode::OK, Json(movimentacoes)))
}

pub async fn registrar_movimentacao(
    State(app_state): State<AppState>,
    Json(payload): Json<MovimentacaoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let movimentacao = app_state
        .estoque_service
        .registrar_movimentacao(NovaMovimentacao {
            id_produto: payload.id_produto,
            tipo: payload.tipo,
            quantidade: payload.quantidade,
            motivo: payload.motivo,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(movimentacao)))
}

pub async fn registrar_compra(
    State(app_state): State<AppState>,
    Json(payload): Json<CompraVendaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let movimentacao = app_state
        .estoque_service
        .registrar_compra(NovaMovimentacao {
            id_produto: payload.id_produto,
            tipo: TipoMovimentacao::Entrada,
            quantidade: payload.quantidade,
            motivo: payload.motivo,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(movimentacao)))
}

// A venda valida o saldo projetado ao vivo antes de inserir.
pub async fn registrar_venda(
    State(app_state): State<AppState>,
    Json(payload): Json<CompraVendaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let movimentacao = app_state
        .estoque_service
        .registrar_venda(NovaMovimentacao {
            id_produto: payload.id_produto,
            tipo: TipoMovimentacao::Saida,
            quantidade: payload.quantidade,
            motivo: payload.motivo,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(movimentacao)))
}
