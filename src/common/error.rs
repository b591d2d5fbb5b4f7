// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// A taxonomia segue as regras de negócio do estoque: erros de validação
// barram a operação antes de qualquer escrita; violações de regra de
// negócio nunca são coagidas silenciosamente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Produto não encontrado")]
    ProdutoNaoEncontrado,

    #[error("Fornecedor não encontrado")]
    FornecedorNaoEncontrado,

    #[error("Categoria não encontrada")]
    CategoriaNaoEncontrada,

    // Regra: produto com histórico de movimentações nunca é excluído,
    // apenas arquivado (ativo = false).
    #[error("Produto possui movimentações de estoque")]
    ProdutoPossuiMovimentacoes,

    #[error("Estoque insuficiente: disponível {disponivel}, solicitado {solicitado}")]
    EstoqueInsuficiente { disponivel: i64, solicitado: i64 },

    // Tentativa de arquivar um produto com saldo pendente sem escolher
    // o que fazer com ele (MANTER / PERDA / VENDA).
    #[error("Produto possui saldo pendente; escolha um modo de baixa")]
    DescarteNaoResolvido { saldo: i64 },

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::ProdutoNaoEncontrado => {
                (StatusCode::NOT_FOUND, "Produto não encontrado.".to_string())
            }
            AppError::FornecedorNaoEncontrado => {
                (StatusCode::NOT_FOUND, "Fornecedor não encontrado.".to_string())
            }
            AppError::CategoriaNaoEncontrada => {
                (StatusCode::NOT_FOUND, "Categoria não encontrada.".to_string())
            }
            AppError::ProdutoPossuiMovimentacoes => (
                StatusCode::CONFLICT,
                "Não é possível excluir este produto, pois ele já possui movimentações de estoque."
                    .to_string(),
            ),
            AppError::EstoqueInsuficiente { disponivel, .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!(
                    "ERRO: Saldo insuficiente! Você tem apenas {} unidades em estoque.",
                    disponivel
                ),
            ),
            AppError::DescarteNaoResolvido { saldo } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!(
                    "O produto ainda tem {} unidades em estoque. Informe o modo de baixa (MANTER, PERDA ou VENDA).",
                    saldo
                ),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
