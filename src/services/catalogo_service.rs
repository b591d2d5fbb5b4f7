// src/services/catalogo_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogoRepository, MovimentacaoRepository},
    models::catalogo::{Categoria, Fornecedor, Produto},
};

/// Regra de exclusão: produto com qualquer movimentação no histórico não
/// pode ser excluído fisicamente (independente do saldo atual); só
/// arquivado. Produto sem histórico pode ser removido sem condição.
pub fn validar_exclusao(tem_historico: bool) -> Result<(), AppError> {
    if tem_historico {
        return Err(AppError::ProdutoPossuiMovimentacoes);
    }
    Ok(())
}

// CRUD do catálogo. Quase tudo aqui é repasse direto ao repositório; a
// exceção é a exclusão de produto, que consulta o livro-razão antes.
#[derive(Clone)]
pub struct CatalogoService {
    catalogo_repo: CatalogoRepository,
    movimentacao_repo: MovimentacaoRepository,
}

impl CatalogoService {
    pub fn new(
        catalogo_repo: CatalogoRepository,
        movimentacao_repo: MovimentacaoRepository,
    ) -> Self {
        Self {
            catalogo_repo,
            movimentacao_repo,
        }
    }

    // --- Produtos ---

    pub async fn listar_produtos(&self, apenas_ativos: bool) -> Result<Vec<Produto>, AppError> {
        self.catalogo_repo.listar_produtos(apenas_ativos).await
    }

    pub async fn buscar_produto(&self, id: Uuid) -> Result<Produto, AppError> {
        self.catalogo_repo
            .buscar_produto(id)
            .await?
            .ok_or(AppError::ProdutoNaoEncontrado)
    }

    pub async fn criar_produto(
        &self,
        nome: &str,
        preco_venda: Decimal,
        preco_custo: Decimal,
        estoque_minimo: i32,
        id_categoria: Option<Uuid>,
        id_fornecedor: Option<Uuid>,
    ) -> Result<Produto, AppError> {
        self.catalogo_repo
            .criar_produto(
                nome,
                preco_venda,
                preco_custo,
                estoque_minimo,
                id_categoria,
                id_fornecedor,
            )
            .await
    }

    pub async fn atualizar_produto(
        &self,
        id: Uuid,
        nome: &str,
        preco_venda: Decimal,
        preco_custo: Decimal,
        estoque_minimo: i32,
        id_categoria: Option<Uuid>,
        id_fornecedor: Option<Uuid>,
    ) -> Result<Produto, AppError> {
        self.catalogo_repo
            .atualizar_produto(
                id,
                nome,
                preco_venda,
                preco_custo,
                estoque_minimo,
                id_categoria,
                id_fornecedor,
            )
            .await
    }

    pub async fn excluir_produto(&self, id: Uuid) -> Result<(), AppError> {
        let tem_historico = self.movimentacao_repo.produto_tem_historico(id).await?;
        validar_exclusao(tem_historico)?;
        self.catalogo_repo.excluir_produto(id).await
    }

    // --- Fornecedores ---

    pub async fn listar_fornecedores(&self) -> Result<Vec<Fornecedor>, AppError> {
        self.catalogo_repo.listar_fornecedores().await
    }

    pub async fn criar_fornecedor(
        &self,
        nome_fantasia: &str,
        cnpj: Option<&str>,
        telefone: Option<&str>,
        email: Option<&str>,
    ) -> Result<Fornecedor, AppError> {
        self.catalogo_repo
            .criar_fornecedor(nome_fantasia, cnpj, telefone, email)
            .await
    }

    pub async fn atualizar_fornecedor(
        &self,
        id: Uuid,
        nome_fantasia: &str,
        cnpj: Option<&str>,
        telefone: Option<&str>,
        email: Option<&str>,
    ) -> Result<Fornecedor, AppError> {
        self.catalogo_repo
            .atualizar_fornecedor(id, nome_fantasia, cnpj, telefone, email)
            .await
    }

    pub async fn excluir_fornecedor(&self, id: Uuid) -> Result<(), AppError> {
        self.catalogo_repo.excluir_fornecedor(id).await
    }

    // --- Categorias ---

    pub async fn listar_categorias(&self) -> Result<Vec<Categoria>, AppError> {
        self.catalogo_repo.listar_categorias().await
    }

    pub async fn criar_categoria(
        &self,
        nome: &str,
        descricao: Option<&str>,
    ) -> Result<Categoria, AppError> {
        self.catalogo_repo.criar_categoria(nome, descricao).await
    }

    pub async fn atualizar_categoria(
        &self,
        id: Uuid,
        nome: &str,
        descricao: Option<&str>,
    ) -> Result<Categoria, AppError> {
        self.catalogo_repo
            .atualizar_categoria(id, nome, descricao)
            .await
    }

    pub async fn excluir_categoria(&self, id: Uuid) -> Result<(), AppError> {
        self.catalogo_repo.excluir_categoria(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produto_com_historico_nao_pode_ser_excluido() {
        assert!(matches!(
            validar_exclusao(true),
            Err(AppError::ProdutoPossuiMovimentacoes)
        ));
    }

    #[test]
    fn produto_sem_historico_pode_ser_excluido() {
        assert!(validar_exclusao(false).is_ok());
    }
}
