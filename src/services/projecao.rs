// src/services/projecao.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    catalogo::Produto,
    estoque::{Movimentacao, TipoMovimentacao},
    relatorios::{SaldoProduto, StatusEstoque},
};

// O projetor do livro-razão: transforma o log bruto de movimentações na
// visão de saldo por produto. É uma função pura; toda tela que precisa de
// saldo (dashboard, relatório de estoque, baixa de produto) passa por aqui
// em vez de recalcular por conta própria.

/// Saldo líquido de um único produto a partir do histórico dele.
/// Entradas e saídas são somadas separadamente antes da subtração, então
/// o resultado não depende da ordem das movimentações.
pub fn saldo_atual(movimentacoes: &[Movimentacao]) -> i64 {
    let mut total_entrada: i64 = 0;
    let mut total_saida: i64 = 0;
    for mov in movimentacoes {
        match mov.tipo {
            TipoMovimentacao::Entrada => total_entrada += i64::from(mov.quantidade),
            TipoMovimentacao::Saida => total_saida += i64::from(mov.quantidade),
        }
    }
    total_entrada - total_saida
}

/// Classifica o saldo (já travado em zero) contra o estoque mínimo.
/// ZERADO tem precedência sobre BAIXO.
pub fn classificar_saldo(saldo: i64, estoque_minimo: i32) -> StatusEstoque {
    if saldo == 0 {
        StatusEstoque::Zerado
    } else if estoque_minimo > 0 && saldo <= i64::from(estoque_minimo) {
        StatusEstoque::Baixo
    } else {
        StatusEstoque::Ok
    }
}

/// Projeta (produtos, movimentações) em saldos derivados.
///
/// - `saldo` é `max(0, entradas - saidas)` para exibição e valorização;
///   o valor bruto (possivelmente negativo) fica em `saldo_bruto` para
///   diagnóstico. Saldo negativo é problema de integridade dos dados,
///   não um estado de negócio válido.
/// - `valor_estoque` usa o preço de CUSTO: estoque é carregado a custo,
///   não a preço de venda.
/// - Movimentação cujo produto não existe na lista é logada e ignorada;
///   um registro ruim não derruba o relatório inteiro.
pub fn projetar_saldos(
    produtos: &[Produto],
    movimentacoes: &[Movimentacao],
) -> Vec<SaldoProduto> {
    // (total_entrada, total_saida) por produto
    let mut somas: HashMap<Uuid, (i64, i64)> = HashMap::new();
    for produto in produtos {
        somas.insert(produto.id, (0, 0));
    }

    for mov in movimentacoes {
        match somas.get_mut(&mov.id_produto) {
            Some((entrada, saida)) => match mov.tipo {
                TipoMovimentacao::Entrada => *entrada += i64::from(mov.quantidade),
                TipoMovimentacao::Saida => *saida += i64::from(mov.quantidade),
            },
            None => {
                tracing::warn!(
                    id_movimentacao = %mov.id,
                    id_produto = %mov.id_produto,
                    "Movimentação referencia produto inexistente; ignorada na projeção"
                );
            }
        }
    }

    produtos
        .iter()
        .map(|produto| {
            let (total_entrada, total_saida) = somas[&produto.id];
            let saldo_bruto = total_entrada - total_saida;
            let saldo = saldo_bruto.max(0);
            SaldoProduto {
                id_produto: produto.id,
                nome: produto.nome.clone(),
                id_categoria: produto.id_categoria,
                estoque_minimo: produto.estoque_minimo,
                ativo: produto.ativo,
                saldo,
                saldo_bruto,
                status: classificar_saldo(saldo, produto.estoque_minimo),
                valor_estoque: Decimal::from(saldo) * produto.preco_custo,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn produto(id: Uuid, estoque_minimo: i32, preco_custo: Decimal) -> Produto {
        Produto {
            id,
            nome: "Produto Teste".to_string(),
            preco_venda: Decimal::from(20),
            preco_custo,
            estoque_minimo,
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
    fn saldo_nao_depende_da_ordem_das_movimentacoes() {
        let id = Uuid::new_v4();
        let produtos = vec![produto(id, 0, Decimal::from(5))];
        let mut movs = vec![
            mov(id, TipoMovimentacao::Entrada, 10),
            mov(id, TipoMovimentacao::Saida, 3),
            mov(id, TipoMovimentacao::Entrada, 7),
            mov(id, TipoMovimentacao::Saida, 4),
        ];

        let direto = projetar_saldos(&produtos, &movs);
        movs.reverse();
        let invertido = projetar_saldos(&produtos, &movs);
        movs.swap(0, 2);
        let permutado = projetar_saldos(&produtos, &movs);

        assert_eq!(direto[0].saldo, 10);
        assert_eq!(invertido[0].saldo, direto[0].saldo);
        assert_eq!(permutado[0].saldo, direto[0].saldo);
    }

    #[test]
    fn projecao_e_idempotente() {
        let id = Uuid::new_v4();
        let produtos = vec![produto(id, 2, Decimal::new(1050, 2))];
        let movs = vec![
            mov(id, TipoMovimentacao::Entrada, 8),
            mov(id, TipoMovimentacao::Saida, 5),
        ];

        let primeira = projetar_saldos(&produtos, &movs);
        let segunda = projetar_saldos(&produtos, &movs);

        assert_eq!(primeira[0].saldo, segunda[0].saldo);
        assert_eq!(primeira[0].saldo_bruto, segunda[0].saldo_bruto);
        assert_eq!(primeira[0].status, segunda[0].status);
        assert_eq!(primeira[0].valor_estoque, segunda[0].valor_estoque);
    }

    #[test]
    fn saldo_negativo_e_travado_em_zero() {
        let id = Uuid::new_v4();
        let produtos = vec![produto(id, 0, Decimal::from(5))];
        let movs = vec![
            mov(id, TipoMovimentacao::Entrada, 5),
            mov(id, TipoMovimentacao::Saida, 8),
        ];

        let projecao = projetar_saldos(&produtos, &movs);

        assert_eq!(projecao[0].saldo, 0);
        assert_eq!(projecao[0].saldo_bruto, -3);
        assert_eq!(projecao[0].status, StatusEstoque::Zerado);
        assert_eq!(projecao[0].valor_estoque, Decimal::ZERO);
    }

    #[test]
    fn classificacao_pelo_estoque_minimo() {
        // limite 10: saldo 10 é BAIXO, 11 é OK, 0 é ZERADO
        assert_eq!(classificar_saldo(10, 10), StatusEstoque::Baixo);
        assert_eq!(classificar_saldo(11, 10), StatusEstoque::Ok);
        assert_eq!(classificar_saldo(0, 10), StatusEstoque::Zerado);
        // ZERADO vence mesmo com limite configurado
        assert_eq!(classificar_saldo(0, 0), StatusEstoque::Zerado);
        // sem limite configurado, qualquer saldo positivo é OK
        assert_eq!(classificar_saldo(1, 0), StatusEstoque::Ok);
    }

    #[test]
    fn movimentacao_orfa_nao_derruba_a_projecao() {
        let id = Uuid::new_v4();
        let produtos = vec![produto(id, 0, Decimal::from(2))];
        let movs = vec![
            mov(id, TipoMovimentacao::Entrada, 4),
            // produto que não está na lista
            mov(Uuid::new_v4(), TipoMovimentacao::Saida, 99),
        ];

        let projecao = projetar_saldos(&produtos, &movs);

        assert_eq!(projecao.len(), 1);
        assert_eq!(projecao[0].saldo, 4);
    }

    #[test]
    fn historico_de_produto_inativo_continua_projetavel() {
        // Produto arquivado com saldo mantido (MANTER): o histórico dele é
        // dado válido, não condição de integridade. A projeção deve somar
        // o saldo normalmente, marcando apenas o flag `ativo`.
        let id = Uuid::new_v4();
        let mut inativo = produto(id, 0, Decimal::from(5));
        inativo.ativo = false;
        let movs = vec![
            mov(id, TipoMovimentacao::Entrada, 9),
            mov(id, TipoMovimentacao::Saida, 2),
        ];

        let projecao = projetar_saldos(&[inativo], &movs);

        assert_eq!(projecao.len(), 1);
        assert_eq!(projecao[0].saldo, 7);
        assert!(!projecao[0].ativo);
    }

    #[test]
    fn valor_de_estoque_usa_preco_de_custo() {
        let id = Uuid::new_v4();
        let mut p = produto(id, 0, Decimal::new(350, 2)); // custo 3.50
        p.preco_venda = Decimal::from(100); // venda não entra na conta
        let movs = vec![mov(id, TipoMovimentacao::Entrada, 6)];

        let projecao = projetar_saldos(&[p], &movs);

        assert_eq!(projecao[0].valor_estoque, Decimal::from(21));
    }
}
