// src/services/estoque_service.rs

use crate::{
    common::error::AppError,
    db::{CatalogoRepository, MovimentacaoRepository},
    models::estoque::{
        FiltroMovimentacoes, Movimentacao, MovimentacaoComProduto, NovaMovimentacao,
        TipoMovimentacao,
    },
    services::projecao,
};

// Registro de movimentações no livro-razão. A única regra não trivial é a
// verificação de saldo para SAIDA: ela lê o saldo projetado AO VIVO
// imediatamente antes da escrita, nunca um valor em cache. (Leitura e
// escrita não são atômicas entre si; duas vendas concorrentes podem passar
// pela checagem com saldo defasado. Limitação aceita, sem lock.)

/// Checagem pura de saldo para uma saída.
pub fn validar_saida(saldo_atual: i64, quantidade: i32) -> Result<(), AppError> {
    let solicitado = i64::from(quantidade);
    if solicitado > saldo_atual {
        return Err(AppError::EstoqueInsuficiente {
            disponivel: saldo_atual,
            solicitado,
        });
    }
    Ok(())
}

#[derive(Clone)]
pub struct EstoqueService {
    catalogo_repo: CatalogoRepository,
    movimentacao_repo: MovimentacaoRepository,
}

impl EstoqueService {
    pub fn new(
        catalogo_repo: CatalogoRepository,
        movimentacao_repo: MovimentacaoRepository,
    ) -> Self {
        Self {
            catalogo_repo,
            movimentacao_repo,
        }
    }

    pub async fn listar_historico(
        &self,
        filtro: &FiltroMovimentacoes,
    ) -> Result<Vec<MovimentacaoComProduto>, AppError> {
        self.movimentacao_repo.listar_filtrado(filtro).await
    }

    /// Registra uma ENTRADA (compra) ou SAIDA (venda) no livro-razão.
    /// Validações acontecem todas ANTES do insert; depois de gravada a
    /// movimentação é imutável.
    pub async fn registrar_movimentacao(
        &self,
        nova: NovaMovimentacao,
    ) -> Result<Movimentacao, AppError> {
        // quantidade <= 0 já foi barrada pelo validator no handler, mas o
        // service é a última linha antes do banco.
        if nova.quantidade <= 0 {
            return Err(validacao_simples(
                "quantidade",
                "A quantidade deve ser maior que zero.",
            ));
        }

        let produto = self
            .catalogo_repo
            .buscar_produto(nova.id_produto)
            .await?
            .ok_or(AppError::ProdutoNaoEncontrado)?;

        if nova.tipo == TipoMovimentacao::Saida {
            let historico = self
                .movimentacao_repo
                .listar_por_produto(produto.id)
                .await?;
            validar_saida(projecao::saldo_atual(&historico), nova.quantidade)?;
        }

        self.movimentacao_repo.inserir(&nova).await
    }

    /// Atalho da tela de compras: sempre ENTRADA, motivo padrão.
    pub async fn registrar_compra(
        &self,
        nova: NovaMovimentacao,
    ) -> Result<Movimentacao, AppError> {
        self.registrar_movimentacao(NovaMovimentacao {
            tipo: TipoMovimentacao::Entrada,
            motivo: nova.motivo.or_else(|| Some("Registro de Compra".to_string())),
            ..nova
        })
        .await
    }

    /// Atalho da tela de vendas: sempre SAIDA (com checagem de saldo).
    pub async fn registrar_venda(
        &self,
        nova: NovaMovimentacao,
    ) -> Result<Movimentacao, AppError> {
        self.registrar_movimentacao(NovaMovimentacao {
            tipo: TipoMovimentacao::Saida,
            motivo: nova.motivo.or_else(|| Some("Registro de Venda".to_string())),
            ..nova
        })
        .await
    }
}

// Monta um ValidationErrors de um campo só, para regras que não passam
// pelo derive do validator.
fn validacao_simples(campo: &'static str, mensagem: &'static str) -> AppError {
    let mut erro = validator::ValidationError::new("invalid");
    erro.message = Some(mensagem.into());
    let mut erros = validator::ValidationErrors::new();
    erros.add(campo, erro);
    AppError::ValidationError(erros)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saida_maior_que_o_saldo_e_rejeitada() {
        let erro = validar_saida(5, 6).unwrap_err();
        match erro {
            AppError::EstoqueInsuficiente {
                disponivel,
                solicitado,
            } => {
                assert_eq!(disponivel, 5);
                assert_eq!(solicitado, 6);
            }
            outro => panic!("erro inesperado: {outro:?}"),
        }
    }

    #[test]
    fn saida_igual_ao_saldo_e_permitida() {
        assert!(validar_saida(5, 5).is_ok());
    }

    #[test]
    fn saida_com_saldo_negativo_e_rejeitada() {
        // saldo bruto negativo (condição de integridade): nenhuma venda passa
        assert!(validar_saida(-3, 1).is_err());
    }
}
