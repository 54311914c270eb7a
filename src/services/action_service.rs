// src/services/action_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ActionRepository, DemandRepository, UserRepository},
    models::action::{ActionType, ActionWithTecnico, CreatedAction},
    models::demand::DemandSummary,
};

#[derive(Clone)]
pub struct ActionService {
    repo: ActionRepository,
    demand_repo: DemandRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl ActionService {
    pub fn new(
        repo: ActionRepository,
        demand_repo: DemandRepository,
        user_repo: UserRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            demand_repo,
            user_repo,
            pool,
        }
    }

    /// Registra uma ação em uma demanda. A demanda é relida na mesma
    /// transação do INSERT — não confiamos só na FK para o erro de negócio.
    /// O tecnico_id, quando presente, só precisa existir em users; o papel
    /// CONSULTOR não é verificado aqui.
    pub async fn create_action(
        &self,
        descricao: &str,
        tipo: ActionType,
        demand_id: Uuid,
        tecnico_id: Option<Uuid>,
    ) -> Result<CreatedAction, AppError> {
        let mut tx = self.pool.begin().await?;

        let demand = self
            .demand_repo
            .find_by_id(&mut *tx, demand_id)
            .await?
            .ok_or(AppError::DemandNotFound)?;

        let action = self
            .repo
            .create(&mut *tx, descricao, tipo, demand_id, tecnico_id)
            .await?;

        let tecnico = match tecnico_id {
            Some(id) => self.user_repo.find_summary_by_id(&mut *tx, id).await?,
            None => None,
        };

        tx.commit().await?;

        Ok(CreatedAction {
            action,
            tecnico,
            demand: DemandSummary {
                id: demand.id,
                titulo: demand.titulo,
            },
        })
    }

    /// Ações de uma demanda, mais recente primeiro, com o técnico anexado.
    pub async fn list_actions(&self, demand_id: Uuid) -> Result<Vec<ActionWithTecnico>, AppError> {
        self.repo.find_by_demand(demand_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::demand::{DemandPriority, DemandType};
    use crate::services::test_utils;

    #[tokio::test]
    #[ignore = "requer PostgreSQL (DATABASE_URL)"]
    async fn acao_em_demanda_inexistente_falha() {
        let pool = test_utils::test_pool().await;
        let service = test_utils::action_service(&pool);

        let err = service
            .create_action(
                "Tentativa de registro sem demanda",
                ActionType::Comunicacao,
                Uuid::new_v4(),
                None,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DemandNotFound));
    }

    #[tokio::test]
    #[ignore = "requer PostgreSQL (DATABASE_URL)"]
    async fn acao_valida_e_criada_sem_tecnico() {
        let pool = test_utils::test_pool().await;
        let service = test_utils::action_service(&pool);
        let provider_service = test_utils::provider_service(&pool);
        let demand_service = test_utils::demand_service(&pool);

        let provider = provider_service
            .create_provider("Provedor das Ações", None, None, None)
            .await
            .unwrap();

        let demand = demand_service
            .create_demand(
                "Demanda 1",
                "Descrição da demanda 1",
                DemandType::Configuracao,
                DemandPriority::Media,
                provider.id,
                None,
            )
            .await
            .unwrap();

        let criada = service
            .create_action("valid description", ActionType::Analise, demand.id, None)
            .await
            .unwrap();

        assert!(criada.tecnico.is_none());
        assert_eq!(criada.demand.id, demand.id);
        assert_eq!(criada.demand.titulo, "Demanda 1");

        let listadas = service.list_actions(demand.id).await.unwrap();
        assert_eq!(listadas.len(), 1);
        assert_eq!(listadas[0].action.descricao, "valid description");
    }
}
