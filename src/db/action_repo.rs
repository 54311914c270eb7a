// src/db/action_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, FromRow, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::action::{Action, ActionType, ActionWithTecnico},
    models::user::UserSummary,
};

// Linha achatada do LEFT JOIN actions × users
#[derive(Debug, FromRow)]
pub(crate) struct ActionTecnicoRow {
    pub id: Uuid,
    pub descricao: String,
    pub tipo: ActionType,
    pub demand_id: Uuid,
    pub tecnico_id: Option<Uuid>,
    pub executada_em: DateTime<Utc>,
    pub tecnico_name: Option<String>,
}

impl ActionTecnicoRow {
    pub(crate) fn into_with_tecnico(self) -> ActionWithTecnico {
        let tecnico = match (self.tecnico_id, self.tecnico_name) {
            (Some(id), Some(name)) => Some(UserSummary { id, name }),
            _ => None,
        };

        ActionWithTecnico {
            action: Action {
                id: self.id,
                descricao: self.descricao,
                tipo: self.tipo,
                demand_id: self.demand_id,
                tecnico_id: self.tecnico_id,
                executada_em: self.executada_em,
            },
            tecnico,
        }
    }
}

// O repositório de ações: inserção e leitura, nunca update — ações são imutáveis
#[derive(Clone)]
pub struct ActionRepository {
    pool: PgPool,
}

impl ActionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere uma ação. Violações de FK viram erros tipados, pelo nome da constraint.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        descricao: &str,
        tipo: ActionType,
        demand_id: Uuid,
        tecnico_id: Option<Uuid>,
    ) -> Result<Action, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Action>(
            r#"
            INSERT INTO actions (descricao, tipo, demand_id, tecnico_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(descricao)
        .bind(tipo)
        .bind(demand_id)
        .bind(tecnico_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    match db_err.constraint() {
                        Some("actions_demand_id_fkey") => return AppError::DemandNotFound,
                        Some("actions_tecnico_id_fkey") => return AppError::TecnicoNotFound,
                        _ => {}
                    }
                }
            }
            e.into()
        })
    }

    /// Ações de uma demanda, mais recente primeiro, com o técnico {id, name}.
    pub async fn find_by_demand(&self, demand_id: Uuid) -> Result<Vec<ActionWithTecnico>, AppError> {
        let rows = sqlx::query_as::<_, ActionTecnicoRow>(
            r#"
            SELECT a.id, a.descricao, a.tipo, a.demand_id, a.tecnico_id, a.executada_em,
                   u.name AS tecnico_name
            FROM actions a
            LEFT JOIN users u ON u.id = a.tecnico_id
            WHERE a.demand_id = $1
            ORDER BY a.executada_em DESC
            "#,
        )
        .bind(demand_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ActionTecnicoRow::into_with_tecnico).collect())
    }

    // Mesma projeção, para o eager-load da listagem de demandas
    pub async fn find_by_demands<'e, E>(
        &self,
        executor: E,
        demand_ids: &[Uuid],
    ) -> Result<Vec<ActionWithTecnico>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, ActionTecnicoRow>(
            r#"
            SELECT a.id, a.descricao, a.tipo, a.demand_id, a.tecnico_id, a.executada_em,
                   u.name AS tecnico_name
            FROM actions a
            LEFT JOIN users u ON u.id = a.tecnico_id
            WHERE a.demand_id = ANY($1)
            ORDER BY a.executada_em DESC
            "#,
        )
        .bind(demand_ids)
        .fetch_all(executor)
        .await?;

        Ok(rows.into_iter().map(ActionTecnicoRow::into_with_tecnico).collect())
    }

    pub async fn delete_by_demand<'e, E>(&self, executor: E, demand_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM actions WHERE demand_id = $1")
            .bind(demand_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    // Remove as ações de todas as demandas de um provedor (cascata filhos-primeiro)
    pub async fn delete_by_provider<'e, E>(
        &self,
        executor: E,
        provider_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            DELETE FROM actions
            WHERE demand_id IN (SELECT id FROM demands WHERE provider_id = $1)
            "#,
        )
        .bind(provider_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}
