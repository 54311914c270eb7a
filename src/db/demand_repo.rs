// src/db/demand_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::demand::{Demand, DemandPriority, DemandStatus, DemandType},
};

// O repositório de demandas, responsável por todas as interações com a tabela 'demands'
#[derive(Clone)]
pub struct DemandRepository {
    pool: PgPool,
}

impl DemandRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere uma demanda. O status é fixado em PENDENTE no próprio INSERT,
    /// independente do que o chamador tenha enviado.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        titulo: &str,
        descricao: &str,
        tipo: DemandType,
        prioridade: DemandPriority,
        provider_id: Uuid,
        atendente_id: Option<Uuid>,
    ) -> Result<Demand, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Demand>(
            r#"
            INSERT INTO demands (titulo, descricao, tipo, status, prioridade, provider_id, atendente_id)
            VALUES ($1, $2, $3, 'PENDENTE', $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(titulo)
        .bind(descricao)
        .bind(tipo)
        .bind(prioridade)
        .bind(provider_id)
        .bind(atendente_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    match db_err.constraint() {
                        Some("demands_provider_id_fkey") => return AppError::ProviderNotFound,
                        Some("demands_atendente_id_fkey") => return AppError::AtendenteNotFound,
                        _ => {}
                    }
                }
            }
            e.into()
        })
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Demand>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let demand = sqlx::query_as::<_, Demand>("SELECT * FROM demands WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(demand)
    }

    /// Lista demandas, opcionalmente filtradas por status, mais recente primeiro.
    pub async fn find_all(&self, status: Option<DemandStatus>) -> Result<Vec<Demand>, AppError> {
        let demands = match status {
            Some(status) => {
                sqlx::query_as::<_, Demand>(
                    "SELECT * FROM demands WHERE status = $1 ORDER BY created_at DESC",
                )
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Demand>("SELECT * FROM demands ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(demands)
    }

    pub async fn find_by_providers<'e, E>(
        &self,
        executor: E,
        provider_ids: &[Uuid],
    ) -> Result<Vec<Demand>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let demands = sqlx::query_as::<_, Demand>(
            "SELECT * FROM demands WHERE provider_id = ANY($1) ORDER BY created_at DESC",
        )
        .bind(provider_ids)
        .fetch_all(executor)
        .await?;

        Ok(demands)
    }

    /// Persiste o novo status. A validação da transição acontece no serviço,
    /// dentro da mesma transação da leitura.
    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: DemandStatus,
    ) -> Result<Demand, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let demand = sqlx::query_as::<_, Demand>(
            r#"
            UPDATE demands
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(demand)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM demands WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_by_provider<'e, E>(
        &self,
        executor: E,
        provider_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM demands WHERE provider_id = $1")
            .bind(provider_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
