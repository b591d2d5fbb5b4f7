// src/models/relatorios.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

// --- Status do saldo de um produto ---
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusEstoque {
    Ok,
    Baixo,
    Zerado,
}

// --- Visão derivada: saldo por produto ---
// Recalculada sob demanda a partir de (produtos, movimentações); nunca
// persistida. `saldo` é travado em zero para exibição/valorização;
// `saldo_bruto` preserva o valor real (pode ser negativo) para diagnóstico.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaldoProduto {
    pub id_produto: Uuid,
    pub nome: String,
    pub id_categoria: Option<Uuid>,
    pub estoque_minimo: i32,
    pub ativo: bool,
    pub saldo: i64,
    pub saldo_bruto: i64,
    pub status: StatusEstoque,
    pub valor_estoque: Decimal,
}

// Relatório de estoque completo (tabela + KPI do topo).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioEstoque {
    pub itens: Vec<SaldoProduto>,
    pub valor_total: Decimal,
}

// --- Visão derivada: posição de caixa ---
// saldo_inicial (configuração) + vendas − compras, sempre recalculado
// do livro-razão inteiro para não derivar de um acumulador com drift.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PosicaoCaixa {
    pub saldo_inicial: Decimal,
    pub total_vendas: Decimal,
    pub total_compras: Decimal,
    pub saldo_atual: Decimal,
}

// --- Visão derivada: relatório financeiro de um período ---
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioPeriodo {
    pub inicio: NaiveDate,
    pub fim: NaiveDate,
    pub dias: i64,
    pub receita: Decimal,
    pub custo: Decimal,
    pub lucro: Decimal,
    pub num_vendas: i64,
    pub total_investido: Decimal,
    pub media_receita_dia: Decimal,
    pub media_lucro_dia: Decimal,
}

impl RelatorioPeriodo {
    // Janela degenerada (inicio > fim) devolve um relatório vazio,
    // nunca um erro.
    pub fn vazio(inicio: NaiveDate, fim: NaiveDate) -> Self {
        Self {
            inicio,
            fim,
            dias: 0,
            receita: Decimal::ZERO,
            custo: Decimal::ZERO,
            lucro: Decimal::ZERO,
            num_vendas: 0,
            total_investido: Decimal::ZERO,
            media_receita_dia: Decimal::ZERO,
            media_lucro_dia: Decimal::ZERO,
        }
    }
}
