// src/services/caixa.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogoRepository, ConfigRepository, MovimentacaoRepository},
    models::{
        catalogo::Produto,
        estoque::{Movimentacao, TipoMovimentacao},
        relatorios::PosicaoCaixa,
    },
};

// Cálculo da posição de caixa: saldo inicial configurado + impacto de
// TODAS as movimentações históricas. Nunca persistimos um acumulador;
// qualquer correção de preço ou do saldo inicial reflete na próxima
// leitura, sem drift.

/// ENTRADA tira dinheiro do caixa (compra, a preço de custo);
/// SAIDA coloca dinheiro no caixa (venda, a preço de venda).
/// Movimentação sem produto resolvível contribui com zero (degradação
/// documentada, não um crash).
pub fn posicao_caixa(
    saldo_inicial: Decimal,
    movimentacoes: &[Movimentacao],
    produtos: &HashMap<Uuid, Produto>,
) -> PosicaoCaixa {
    let mut total_vendas = Decimal::ZERO;
    let mut total_compras = Decimal::ZERO;

    for mov in movimentacoes {
        let Some(produto) = produtos.get(&mov.id_produto) else {
            tracing::warn!(
                id_movimentacao = %mov.id,
                id_produto = %mov.id_produto,
                "Movimentação sem produto resolvível; impacto de caixa zerado"
            );
            continue;
        };
        let quantidade = Decimal::from(mov.quantidade);
        match mov.tipo {
            TipoMovimentacao::Entrada => total_compras += quantidade * produto.preco_custo,
            TipoMovimentacao::Saida => total_vendas += quantidade * produto.preco_venda,
        }
    }

    PosicaoCaixa {
        saldo_inicial,
        total_vendas,
        total_compras,
        saldo_atual: saldo_inicial + total_vendas - total_compras,
    }
}

#[derive(Clone)]
pub struct CaixaService {
    catalogo_repo: CatalogoRepository,
    movimentacao_repo: MovimentacaoRepository,
    config_repo: ConfigRepository,
}

impl CaixaService {
    pub fn new(
        catalogo_repo: CatalogoRepository,
        movimentacao_repo: MovimentacaoRepository,
        config_repo: ConfigRepository,
    ) -> Self {
        Self {
            catalogo_repo,
            movimentacao_repo,
            config_repo,
        }
    }

    // Uma busca por tela: produtos + log completo, e o resto é cálculo puro.
    pub async fn posicao_atual(&self) -> Result<PosicaoCaixa, AppError> {
        let saldo_inicial = self.config_repo.saldo_inicial().await?;
        let produtos = self.catalogo_repo.listar_produtos(false).await?;
        let movimentacoes = self.movimentacao_repo.listar_todas().await?;

        let por_id: HashMap<Uuid, Produto> =
            produtos.into_iter().map(|p| (p.id, p)).collect();

        Ok(posicao_caixa(saldo_inicial, &movimentacoes, &por_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn produto(id: Uuid, preco_venda: Decimal, preco_custo: Decimal) -> Produto {
        Produto {
            id,
            nome: "Produto Teste".to_string(),
            preco_venda,
            preco_custo,
            estoque_minimo: 0,
            id_categoria: None,
            id_fornecedor: None,
            ativo: true,
            created_at: Utc::now(),
        }
    }

    fn mov(id_produto: Uuid, tipo: TipoMovimentacao, quantidade: i32) -> Movimentacao {
        Movimentacao {
            id: Uuid::new_v4(),
            id_produto,
            tipo,
            quantidade,
            motivo: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn caixa_soma_vendas_e_subtrai_compras_do_saldo_inicial() {
        let id = Uuid::new_v4();
        let mut produtos = HashMap::new();
        produtos.insert(id, produto(id, Decimal::from(20), Decimal::from(5)));

        let movs = vec![
            mov(id, TipoMovimentacao::Entrada, 10), // -50
            mov(id, TipoMovimentacao::Saida, 3),    // +60
        ];

        let posicao = posicao_caixa(Decimal::from(1000), &movs, &produtos);

        assert_eq!(posicao.total_compras, Decimal::from(50));
        assert_eq!(posicao.total_vendas, Decimal::from(60));
        assert_eq!(posicao.saldo_atual, Decimal::from(1010));
    }

    #[test]
    fn produto_irresoluvel_contribui_com_zero() {
        let produtos: HashMap<Uuid, Produto> = HashMap::new();
        let movs = vec![mov(Uuid::new_v4(), TipoMovimentacao::Saida, 100)];

        let posicao = posicao_caixa(Decimal::from(500), &movs, &produtos);

        assert_eq!(posicao.saldo_atual, Decimal::from(500));
    }

    #[test]
    fn alterar_saldo_inicial_so_desloca_a_base() {
        let id = Uuid::new_v4();
        let mut produtos = HashMap::new();
        produtos.insert(id, produto(id, Decimal::from(10), Decimal::from(4)));
        let movs = vec![mov(id, TipoMovimentacao::Saida, 2)];

        let antes = posicao_caixa(Decimal::ZERO, &movs, &produtos);
        let depois = posicao_caixa(Decimal::from(300), &movs, &produtos);

        assert_eq!(depois.saldo_atual - antes.saldo_atual, Decimal::from(300));
        assert_eq!(antes.total_vendas, depois.total_vendas);
    }
}
