// src/models/catalogo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// --- 1. Produtos ---
// O produto carrega os dois preços: venda (receita) e custo (valorização
// do estoque). O saldo NUNCA mora aqui; ele é derivado do livro-razão.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub id: Uuid,
    pub nome: String,
    pub preco_venda: Decimal,
    pub preco_custo: Decimal,
    pub estoque_minimo: i32,
    pub id_categoria: Option<Uuid>,
    pub id_fornecedor: Option<Uuid>,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
}

// --- 2. Fornecedores ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Fornecedor {
    pub id: Uuid,
    pub nome_fantasia: String,
    pub cnpj: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- 3. Categorias ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Categoria {
    pub id: Uuid,
    pub nome: String,
    pub descricao: Option<String>,
    pub created_at: DateTime<Utc>,
}
