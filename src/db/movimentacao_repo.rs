// src/db/movimentacao_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::estoque::{FiltroMovimentacoes, Movimentacao, MovimentacaoComProduto, NovaMovimentacao},
};

// Repositório do livro-razão de movimentações. O log é append-only:
// aqui existem leituras e um único INSERT, nada de UPDATE ou DELETE.
#[derive(Clone)]
pub struct MovimentacaoRepository {
    pool: PgPool,
}

impl MovimentacaoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Todas as movimentações, na ordem em que vieram do banco.
    // Os projetores não dependem da ordem (fold comutativo).
    pub async fn listar_todas(&self) -> Result<Vec<Movimentacao>, AppError> {
        let movimentacoes =
            sqlx::query_as::<_, Movimentacao>("SELECT * FROM movimentacoes_estoque")
                .fetch_all(&self.pool)
                .await?;
        Ok(movimentacoes)
    }

    pub async fn listar_por_produto(&self, id_produto: Uuid) -> Result<Vec<Movimentacao>, AppError> {
        let movimentacoes = sqlx::query_as::<_, Movimentacao>(
            "SELECT * FROM movimentacoes_estoque WHERE id_produto = $1",
        )
        .bind(id_produto)
        .fetch_all(&self.pool)
        .await?;
        Ok(movimentacoes)
    }

    // Histórico filtrado, com o nome do produto (LEFT JOIN: movimentação
    // órfã aparece com nome nulo em vez de sumir do histórico).
    pub async fn listar_filtrado(
        &self,
        filtro: &FiltroMovimentacoes,
    ) -> Result<Vec<MovimentacaoComProduto>, AppError> {
        let movimentacoes = sqlx::query_as::<_, MovimentacaoComProduto>(
            r#"
            SELECT m.id, m.id_produto, m.tipo, m.quantidade, m.motivo, m.created_at,
                   p.nome AS nome_produto
            FROM movimentacoes_estoque m
            LEFT JOIN produtos p ON p.id = m.id_produto
            WHERE ($1::uuid IS NULL OR m.id_produto = $1)
              AND ($2::uuid IS NULL OR p.id_categoria = $2)
              AND ($3::tipo_movimentacao IS NULL OR m.tipo = $3)
              AND ($4::date IS NULL OR (m.created_at AT TIME ZONE 'UTC')::date >= $4)
              AND ($5::date IS NULL OR (m.created_at AT TIME ZONE 'UTC')::date <= $5)
            ORDER BY m.created_at DESC
            "#,
        )
        .bind(filtro.id_produto)
        .bind(filtro.id_categoria)
        .bind(filtro.tipo)
        .bind(filtro.inicio)
        .bind(filtro.fim)
        .fetch_all(&self.pool)
        .await?;
        Ok(movimentacoes)
    }

    pub async fn inserir(&self, nova: &NovaMovimentacao) -> Result<Movimentacao, AppError> {
        let movimentacao = sqlx::query_as::<_, Movimentacao>(
            r#"
            INSERT INTO movimentacoes_estoque (id_produto, tipo, quantidade, motivo)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(nova.id_produto)
        .bind(nova.tipo)
        .bind(nova.quantidade)
        .bind(nova.motivo.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(movimentacao)
    }

    // Regra de exclusão de produto: basta existir UMA movimentação.
    pub async fn produto_tem_historico(&self, id_produto: Uuid) -> Result<bool, AppError> {
        let (existe,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM movimentacoes_estoque WHERE id_produto = $1)",
        )
        .bind(id_produto)
        .fetch_one(&self.pool)
        .await?;
        Ok(existe)
    }
}
