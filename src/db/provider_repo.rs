// src/db/provider_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::provider::Provider};

// O repositório de provedores, responsável por todas as interações com a tabela 'providers'
#[derive(Clone)]
pub struct ProviderRepository {
    pool: PgPool,
}

impl ProviderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere um provedor. Violação do UNIQUE de e-mail vira erro de conflito.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        nome_fantasia: &str,
        responsavel: Option<&str>,
        email: Option<&str>,
        telefone: Option<&str>,
    ) -> Result<Provider, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Provider>(
            r#"
            INSERT INTO providers (nome_fantasia, responsavel, email, telefone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(nome_fantasia)
        .bind(responsavel)
        .bind(email)
        .bind(telefone)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::ProviderAlreadyExists;
                }
            }
            e.into()
        })
    }

    pub async fn find_all(&self) -> Result<Vec<Provider>, AppError> {
        let providers =
            sqlx::query_as::<_, Provider>("SELECT * FROM providers ORDER BY nome_fantasia ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(providers)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Provider>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let provider = sqlx::query_as::<_, Provider>("SELECT * FROM providers WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(provider)
    }

    pub async fn find_by_ids<'e, E>(
        &self,
        executor: E,
        ids: &[Uuid],
    ) -> Result<Vec<Provider>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let providers = sqlx::query_as::<_, Provider>("SELECT * FROM providers WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(executor)
            .await?;

        Ok(providers)
    }

    // Usado na checagem de unicidade do e-mail
    pub async fn find_by_email<'e, E>(
        &self,
        executor: E,
        email: &str,
    ) -> Result<Option<Provider>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let provider = sqlx::query_as::<_, Provider>("SELECT * FROM providers WHERE email = $1")
            .bind(email)
            .fetch_optional(executor)
            .await?;

        Ok(provider)
    }

    /// Atualização parcial: campos ausentes mantêm o valor atual (COALESCE).
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nome_fantasia: Option<&str>,
        responsavel: Option<&str>,
        email: Option<&str>,
        telefone: Option<&str>,
    ) -> Result<Provider, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Provider>(
            r#"
            UPDATE providers
            SET nome_fantasia = COALESCE($2, nome_fantasia),
                responsavel   = COALESCE($3, responsavel),
                email         = COALESCE($4, email),
                telefone      = COALESCE($5, telefone),
                updated_at    = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome_fantasia)
        .bind(responsavel)
        .bind(email)
        .bind(telefone)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::ProviderAlreadyExists;
                }
            }
            e.into()
        })
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM providers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
