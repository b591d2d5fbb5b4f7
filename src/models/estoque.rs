// src/models/estoque.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// --- Tipo da movimentação ---
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "tipo_movimentacao", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum TipoMovimentacao {
    Entrada, // Vira "ENTRADA"
    Saida,   // Vira "SAIDA"
}

// --- Movimentação de estoque (livro-razão, append-only) ---
// Única fonte de verdade para saldo, valorização e caixa. Nunca é
// atualizada nem excluída depois de gravada.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Movimentacao {
    pub id: Uuid,
    pub id_produto: Uuid,
    pub tipo: TipoMovimentacao,
    pub quantidade: i32,
    pub motivo: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Dados de uma movimentação ainda não persistida (o banco gera id e data).
#[derive(Debug, Clone)]
pub struct NovaMovimentacao {
    pub id_produto: Uuid,
    pub tipo: TipoMovimentacao,
    pub quantidade: i32,
    pub motivo: Option<String>,
}

// Movimentação enriquecida com o nome do produto, para o histórico.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MovimentacaoComProduto {
    pub id: Uuid,
    pub id_produto: Uuid,
    pub tipo: TipoMovimentacao,
    pub quantidade: i32,
    pub motivo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub nome_produto: Option<String>,
}

// Filtros aceitos na listagem do histórico.
#[derive(Debug, Clone, Default)]
pub struct FiltroMovimentacoes {
    pub id_produto: Option<Uuid>,
    pub id_categoria: Option<Uuid>,
    pub tipo: Option<TipoMovimentacao>,
    pub inicio: Option<NaiveDate>,
    pub fim: Option<NaiveDate>,
}
