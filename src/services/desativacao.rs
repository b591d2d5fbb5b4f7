// src/services/desativacao.rs

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    common::error::AppError,
    db::{CatalogoRepository, MovimentacaoRepository},
    models::{
        catalogo::Produto,
        estoque::{NovaMovimentacao, TipoMovimentacao},
    },
    services::projecao,
};

pub const MOTIVO_PERDA: &str = "Baixa por inativação (perda)";
pub const MOTIVO_LIQUIDACAO: &str = "Venda final de liquidação";

// Fluxo de desativação de produto. Um produto com histórico nunca é
// excluído; antes de arquivá-lo (ativo = false) o saldo residual precisa
// ser resolvido: MANTER (fica pendurado no produto inativo), PERDA (baixa
// total) ou VENDA (liquidação, possivelmente com preço novo).

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModoDescarte {
    Manter,
    Perda,
    Venda,
}

// O que precisa acontecer antes do flip de `ativo`, calculado de forma
// pura a partir de (produto, saldo, modo).
#[derive(Debug, Clone)]
pub struct PlanoDescarte {
    pub movimento: Option<NovaMovimentacao>,
    pub novo_preco: Option<Decimal>,
}

/// Decide a compensação do saldo residual.
///
/// - MANTER: nenhuma movimentação; o saldo continua visível no produto
///   inativo.
/// - PERDA: uma SAIDA do saldo inteiro, sem mexer no preço. No livro-razão
///   ela é idêntica a uma venda (a receita usa o preço de venda vigente);
///   a perda NÃO zera a receita.
/// - VENDA: uma SAIDA do saldo inteiro; se veio preço de liquidação
///   diferente do preço de lista, ele é persistido como mudança real de
///   preço antes da movimentação.
pub fn planejar_descarte(
    produto: &Produto,
    saldo: i64,
    modo: ModoDescarte,
    preco_liquidacao: Option<Decimal>,
) -> Result<PlanoDescarte, AppError> {
    // O saldo vem de uma soma i64; uma movimentação carrega quantidade i32.
    // Saldo fora desse intervalo é corrupção de dados, não caso de negócio.
    let quantidade = i32::try_from(saldo).map_err(|_| {
        anyhow::anyhow!("Saldo residual {saldo} não cabe em uma única movimentação")
    })?;

    let baixa_total = |motivo: &str| NovaMovimentacao {
        id_produto: produto.id,
        tipo: TipoMovimentacao::Saida,
        quantidade,
        motivo: Some(motivo.to_string()),
    };

    Ok(match modo {
        ModoDescarte::Manter => PlanoDescarte {
            movimento: None,
            novo_preco: None,
        },
        ModoDescarte::Perda => PlanoDescarte {
            movimento: Some(baixa_total(MOTIVO_PERDA)),
            novo_preco: None,
        },
        ModoDescarte::Venda => PlanoDescarte {
            movimento: Some(baixa_total(MOTIVO_LIQUIDACAO)),
            novo_preco: preco_liquidacao.filter(|preco| *preco != produto.preco_venda),
        },
    })
}

#[derive(Clone)]
pub struct DesativacaoService {
    catalogo_repo: CatalogoRepository,
    movimentacao_repo: MovimentacaoRepository,
}

impl DesativacaoService {
    pub fn new(
        catalogo_repo: CatalogoRepository,
        movimentacao_repo: MovimentacaoRepository,
    ) -> Self {
        Self {
            catalogo_repo,
            movimentacao_repo,
        }
    }

    /// Arquiva um produto (ativo = false), resolvendo o saldo residual.
    ///
    /// Sequência em duas fases, deliberadamente SEM transação: primeiro a
    /// movimentação de compensação, só então o flip da flag. Se o flip
    /// falhar depois do insert, o produto fica ativo com saldo zero e uma
    /// nova tentativa arquiva direto, e o registro da baixa nunca se perde.
    pub async fn desativar(
        &self,
        id: uuid::Uuid,
        modo: Option<ModoDescarte>,
        preco_liquidacao: Option<Decimal>,
    ) -> Result<Produto, AppError> {
        let produto = self
            .catalogo_repo
            .buscar_produto(id)
            .await?
            .ok_or(AppError::ProdutoNaoEncontrado)?;

        if !produto.ativo {
            // Já arquivado; nada a fazer.
            return Ok(produto);
        }

        let historico = self.movimentacao_repo.listar_por_produto(id).await?;
        let saldo = projecao::saldo_atual(&historico);

        if historico.is_empty() || saldo <= 0 {
            // Sem saldo pendente: flip direto.
            return self.catalogo_repo.definir_ativo(id, false).await;
        }

        let Some(modo) = modo else {
            return Err(AppError::DescarteNaoResolvido { saldo });
        };

        let plano = planejar_descarte(&produto, saldo, modo, preco_liquidacao)?;

        // Fase 1: mudança de preço (se houver) e movimentação de compensação.
        if let Some(novo_preco) = plano.novo_preco {
            self.catalogo_repo
                .atualizar_preco_venda(id, novo_preco)
                .await?;
        }
        if let Some(movimento) = &plano.movimento {
            self.movimentacao_repo.inserir(movimento).await?;
        }

        // Fase 2: só agora o flip.
        self.catalogo_repo.definir_ativo(id, false).await
    }

    /// Reativação: flip incondicional de um único campo.
    pub async fn reativar(&self, id: uuid::Uuid) -> Result<Produto, AppError> {
        self.catalogo_repo.definir_ativo(id, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn produto(preco_venda: Decimal) -> Produto {
        Produto {
            id: Uuid::new_v4(),
            nome: "Produto Teste".to_string(),
            preco_venda,
            preco_custo: Decimal::from(5),
            estoque_minimo: 0,
            id_categoria: None,
            id_fornecedor: None,
            ativo: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn manter_nao_gera_movimentacao_nem_preco() {
        let p = produto(Decimal::from(12));
        let plano = planejar_descarte(&p, 7, ModoDescarte::Manter, None).unwrap();

        assert!(plano.movimento.is_none());
        assert!(plano.novo_preco.is_none());
    }

    #[test]
    fn perda_baixa_o_saldo_inteiro_como_saida() {
        let p = produto(Decimal::from(12));
        let plano = planejar_descarte(&p, 12, ModoDescarte::Perda, None).unwrap();

        let movimento = plano.movimento.expect("perda gera movimentação");
        assert_eq!(movimento.tipo, TipoMovimentacao::Saida);
        assert_eq!(movimento.quantidade, 12);
        assert_eq!(movimento.id_produto, p.id);
        assert_eq!(movimento.motivo.as_deref(), Some(MOTIVO_PERDA));
        assert!(plano.novo_preco.is_none());
    }

    #[test]
    fn venda_com_preco_de_liquidacao_diferente_persiste_o_preco() {
        let p = produto(Decimal::from(12));
        let plano =
            planejar_descarte(&p, 4, ModoDescarte::Venda, Some(Decimal::from(8))).unwrap();

        assert_eq!(plano.novo_preco, Some(Decimal::from(8)));
        let movimento = plano.movimento.expect("venda gera movimentação");
        assert_eq!(movimento.quantidade, 4);
        assert_eq!(movimento.motivo.as_deref(), Some(MOTIVO_LIQUIDACAO));
    }

    #[test]
    fn apos_a_perda_a_projecao_zera_o_saldo() {
        use crate::models::estoque::Movimentacao;

        let p = produto(Decimal::from(12));
        let mut historico = vec![Movimentacao {
            id: Uuid::new_v4(),
            id_produto: p.id,
            tipo: TipoMovimentacao::Entrada,
            quantidade: 12,
            motivo: None,
            created_at: Utc::now(),
        }];
        let saldo = projecao::saldo_atual(&historico);
        assert_eq!(saldo, 12);

        let plano = planejar_descarte(&p, saldo, ModoDescarte::Perda, None).unwrap();
        let baixa = plano.movimento.unwrap();
        historico.push(Movimentacao {
            id: Uuid::new_v4(),
            id_produto: baixa.id_produto,
            tipo: baixa.tipo,
            quantidade: baixa.quantidade,
            motivo: baixa.motivo,
            created_at: Utc::now(),
        });

        assert_eq!(projecao::saldo_atual(&historico), 0);
    }

    #[test]
    fn venda_com_preco_igual_ao_de_lista_nao_mexe_no_preco() {
        let p = produto(Decimal::from(12));
        let plano =
            planejar_descarte(&p, 4, ModoDescarte::Venda, Some(Decimal::from(12))).unwrap();

        assert!(plano.novo_preco.is_none());
        assert!(plano.movimento.is_some());
    }

    #[test]
    fn saldo_maior_que_i32_rejeita_o_plano_sem_estourar() {
        let p = produto(Decimal::from(12));
        let saldo = i64::from(i32::MAX) + 1;

        let resultado = planejar_descarte(&p, saldo, ModoDescarte::Perda, None);
        assert!(resultado.is_err());
    }
}
