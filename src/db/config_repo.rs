// src/db/config_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::common::error::AppError;

pub const CHAVE_SALDO_INICIAL: &str = "saldo_inicial";

// Repositório da tabela 'configuracoes' (chave/valor). Hoje só guarda o
// saldo inicial do caixa; editar a chave desloca a base de cálculo, nunca
// reescreve o histórico.
#[derive(Clone)]
pub struct ConfigRepository {
    pool: PgPool,
}

impl ConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn buscar(&self, chave: &str) -> Result<Option<Decimal>, AppError> {
        let valor: Option<(Decimal,)> =
            sqlx::query_as("SELECT valor FROM configuracoes WHERE chave = $1")
                .bind(chave)
                .fetch_optional(&self.pool)
                .await?;
        Ok(valor.map(|(v,)| v))
    }

    // UPSERT (Insert or Update).
    pub async fn salvar(&self, chave: &str, valor: Decimal) -> Result<Decimal, AppError> {
        let (valor,): (Decimal,) = sqlx::query_as(
            r#"
            INSERT INTO configuracoes (chave, valor)
            VALUES ($1, $2)
            ON CONFLICT (chave)
            DO UPDATE SET valor = EXCLUDED.valor, updated_at = NOW()
            RETURNING valor
            "#,
        )
        .bind(chave)
        .bind(valor)
        .fetch_one(&self.pool)
        .await?;
        Ok(valor)
    }

    pub async fn saldo_inicial(&self) -> Result<Decimal, AppError> {
        Ok(self
            .buscar(CHAVE_SALDO_INICIAL)
            .await?
            .unwrap_or(Decimal::ZERO))
    }
}
