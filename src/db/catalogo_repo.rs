// src/db/catalogo_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalogo::{Categoria, Fornecedor, Produto},
};

// O repositório do catálogo, responsável pelas tabelas 'produtos',
// 'fornecedores' e 'categorias'.
#[derive(Clone)]
pub struct CatalogoRepository {
    pool: PgPool,
}

impl CatalogoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Produtos
    // ---

    pub async fn listar_produtos(&self, apenas_ativos: bool) -> Result<Vec<Produto>, AppError> {
        let produtos = sqlx::query_as::<_, Produto>(
            "SELECT * FROM produtos WHERE ($1 = FALSE OR ativo = TRUE) ORDER BY nome ASC",
        )
        .bind(apenas_ativos)
        .fetch_all(&self.pool)
        .await?;
        Ok(produtos)
    }

    pub async fn buscar_produto(&self, id: Uuid) -> Result<Option<Produto>, AppError> {
        let produto = sqlx::query_as::<_, Produto>("SELECT * FROM produtos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(produto)
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
        let produto = sqlx::query_as::<_, Produto>(
            r#"
            INSERT INTO produtos (nome, preco_venda, preco_custo, estoque_minimo, id_categoria, id_fornecedor)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(preco_venda)
        .bind(preco_custo)
        .bind(estoque_minimo)
        .bind(id_categoria)
        .bind(id_fornecedor)
        .fetch_one(&self.pool)
        .await?;
        Ok(produto)
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
        sqlx::query_as::<_, Produto>(
            r#"
            UPDATE produtos
            SET nome = $2, preco_venda = $3, preco_custo = $4,
                estoque_minimo = $5, id_categoria = $6, id_fornecedor = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(preco_venda)
        .bind(preco_custo)
        .bind(estoque_minimo)
        .bind(id_categoria)
        .bind(id_fornecedor)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ProdutoNaoEncontrado)
    }

    // Usado pelo fluxo de baixa (VENDA): o preço de liquidação é
    // persistido como mudança de preço real, não transitória.
    pub async fn atualizar_preco_venda(
        &self,
        id: Uuid,
        preco_venda: Decimal,
    ) -> Result<Produto, AppError> {
        sqlx::query_as::<_, Produto>(
            "UPDATE produtos SET preco_venda = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(preco_venda)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ProdutoNaoEncontrado)
    }

    pub async fn definir_ativo(&self, id: Uuid, ativo: bool) -> Result<Produto, AppError> {
        sqlx::query_as::<_, Produto>("UPDATE produtos SET ativo = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(ativo)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::ProdutoNaoEncontrado)
    }

    // Exclusão física. A regra "só sem histórico" é verificada no service
    // ANTES de chamar aqui.
    pub async fn excluir_produto(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM produtos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::ProdutoNaoEncontrado);
        }
        Ok(())
    }

    // ---
    // Fornecedores
    // ---

    pub async fn listar_fornecedores(&self) -> Result<Vec<Fornecedor>, AppError> {
        let fornecedores =
            sqlx::query_as::<_, Fornecedor>("SELECT * FROM fornecedores ORDER BY nome_fantasia ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(fornecedores)
    }

    pub async fn criar_fornecedor(
        &self,
        nome_fantasia: &str,
        cnpj: Option<&str>,
        telefone: Option<&str>,
        email: Option<&str>,
    ) -> Result<Fornecedor, AppError> {
        let fornecedor = sqlx::query_as::<_, Fornecedor>(
            r#"
            INSERT INTO fornecedores (nome_fantasia, cnpj, telefone, email)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(nome_fantasia)
        .bind(cnpj)
        .bind(telefone)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(fornecedor)
    }

    pub async fn atualizar_fornecedor(
        &self,
        id: Uuid,
        nome_fantasia: &str,
        cnpj: Option<&str>,
        telefone: Option<&str>,
        email: Option<&str>,
    ) -> Result<Fornecedor, AppError> {
        sqlx::query_as::<_, Fornecedor>(
            r#"
            UPDATE fornecedores
            SET nome_fantasia = $2, cnpj = $3, telefone = $4, email = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome_fantasia)
        .bind(cnpj)
        .bind(telefone)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::FornecedorNaoEncontrado)
    }

    pub async fn excluir_fornecedor(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM fornecedores WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::FornecedorNaoEncontrado);
        }
        Ok(())
    }

    // ---
    // Categorias
    // ---

    pub async fn listar_categorias(&self) -> Result<Vec<Categoria>, AppError> {
        let categorias =
            sqlx::query_as::<_, Categoria>("SELECT * FROM categorias ORDER BY nome ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(categorias)
    }

    pub async fn criar_categoria(
        &self,
        nome: &str,
        descricao: Option<&str>,
    ) -> Result<Categoria, AppError> {
        let categoria = sqlx::query_as::<_, Categoria>(
            "INSERT INTO categorias (nome, descricao) VALUES ($1, $2) RETURNING *",
        )
        .bind(nome)
        .bind(descricao)
        .fetch_one(&self.pool)
        .await?;
        Ok(categoria)
    }

    pub async fn atualizar_categoria(
        &self,
        id: Uuid,
        nome: &str,
        descricao: Option<&str>,
    ) -> Result<Categoria, AppError> {
        sqlx::query_as::<_, Categoria>(
            "UPDATE categorias SET nome = $2, descricao = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(nome)
        .bind(descricao)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::CategoriaNaoEncontrada)
    }

    pub async fn excluir_categoria(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categorias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::CategoriaNaoEncontrada);
        }
        Ok(())
    }
}
