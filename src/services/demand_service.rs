// src/services/demand_service.rs

use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ActionRepository, DemandRepository, ProviderRepository, UserRepository},
    models::demand::{Demand, DemandDetails, DemandPriority, DemandStatus, DemandType},
};

#[derive(Clone)]
pub struct DemandService {
    repo: DemandRepository,
    action_repo: ActionRepository,
    provider_repo: ProviderRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl DemandService {
    pub fn new(
        repo: DemandRepository,
        action_repo: ActionRepository,
        provider_repo: ProviderRepository,
        user_repo: UserRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            action_repo,
            provider_repo,
            user_repo,
            pool,
        }
    }

    /// Cria uma demanda. O status inicial é sempre PENDENTE — o payload nem
    /// tem campo de status, e o INSERT fixa o valor. A existência do provedor
    /// fica por conta da FK, traduzida para erro tipado no repositório.
    pub async fn create_demand(
        &self,
        titulo: &str,
        descricao: &str,
        tipo: DemandType,
        prioridade: DemandPriority,
        provider_id: Uuid,
        atendente_id: Option<Uuid>,
    ) -> Result<Demand, AppError> {
        self.repo
            .create(
                &self.pool,
                titulo,
                descricao,
                tipo,
                prioridade,
                provider_id,
                atendente_id,
            )
            .await
    }

    /// Lista demandas (filtro opcional de status), mais recente primeiro,
    /// cada uma com provedor, atendente e ações anexados.
    pub async fn list_demands(
        &self,
        status: Option<DemandStatus>,
    ) -> Result<Vec<DemandDetails>, AppError> {
        let demands = self.repo.find_all(status).await?;
        self.attach_relations(demands).await
    }

    pub async fn get_demand_details(&self, id: Uuid) -> Result<DemandDetails, AppError> {
        let demand = self
            .repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::DemandNotFound)?;

        let mut details = self.attach_relations(vec![demand]).await?;
        // attach_relations devolve exatamente uma entrada por demanda
        Ok(details.remove(0))
    }

    /// Aplica uma mudança de status. Leitura do estado atual, checagem da
    /// tabela de transições e UPDATE acontecem na mesma transação.
    pub async fn change_status(
        &self,
        id: Uuid,
        novo_status: DemandStatus,
    ) -> Result<Demand, AppError> {
        let mut tx = self.pool.begin().await?;

        let demand = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::DemandNotFound)?;

        if !demand.status.can_transition_to(novo_status) {
            return Err(AppError::InvalidStatusTransition {
                de: demand.status,
                para: novo_status,
            });
        }

        let atualizada = self.repo.update_status(&mut *tx, id, novo_status).await?;

        tx.commit().await?;

        tracing::info!(
            "Demanda {} mudou de {} para {}",
            id,
            demand.status,
            novo_status
        );

        Ok(atualizada)
    }

    /// Exclui uma demanda e, antes, suas ações — em uma transação.
    pub async fn delete_demand(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        self.repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::DemandNotFound)?;

        self.action_repo.delete_by_demand(&mut *tx, id).await?;
        self.repo.delete(&mut *tx, id).await?;

        tx.commit().await?;

        Ok(())
    }

    // Anexa provedor, atendente e ações a cada demanda, com uma query por
    // relação em vez de uma por demanda.
    async fn attach_relations(
        &self,
        demands: Vec<Demand>,
    ) -> Result<Vec<DemandDetails>, AppError> {
        if demands.is_empty() {
            return Ok(Vec::new());
        }

        let demand_ids: Vec<Uuid> = demands.iter().map(|d| d.id).collect();

        let mut provider_ids: Vec<Uuid> = demands.iter().map(|d| d.provider_id).collect();
        provider_ids.sort();
        provider_ids.dedup();

        let mut atendente_ids: Vec<Uuid> =
            demands.iter().filter_map(|d| d.atendente_id).collect();
        atendente_ids.sort();
        atendente_ids.dedup();

        let providers: HashMap<Uuid, _> = self
            .provider_repo
            .find_by_ids(&self.pool, &provider_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let atendentes: HashMap<Uuid, _> = self
            .user_repo
            .find_summaries_by_ids(&self.pool, &atendente_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let mut acoes: HashMap<Uuid, Vec<_>> = HashMap::new();
        for acao in self
            .action_repo
            .find_by_demands(&self.pool, &demand_ids)
            .await?
        {
            acoes.entry(acao.action.demand_id).or_default().push(acao);
        }

        demands
            .into_iter()
            .map(|demand| {
                // A FK garante que o provedor da demanda existe
                let provider = providers
                    .get(&demand.provider_id)
                    .cloned()
                    .ok_or(AppError::ProviderNotFound)?;

                let atendente = demand
                    .atendente_id
                    .and_then(|id| atendentes.get(&id).cloned());

                let acoes = acoes.remove(&demand.id).unwrap_or_default();

                Ok(DemandDetails {
                    demand,
                    provider,
                    atendente,
                    acoes,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_utils;

    async fn provedor_de_teste(pool: &sqlx::PgPool) -> Uuid {
        let service = test_utils::provider_service(pool);
        let email = format!("demanda+{}@teste.com", Uuid::new_v4());
        service
            .create_provider("Provedor de Teste", None, Some(&email), None)
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    #[ignore = "requer PostgreSQL (DATABASE_URL)"]
    async fn demanda_criada_sempre_nasce_pendente() {
        let pool = test_utils::test_pool().await;
        let service = test_utils::demand_service(&pool);
        let provider_id = provedor_de_teste(&pool).await;

        let demand = service
            .create_demand(
                "Demanda 1",
                "Descrição da demanda 1",
                DemandType::Configuracao,
                DemandPriority::Media,
                provider_id,
                None,
            )
            .await
            .unwrap();

        assert_eq!(demand.status, DemandStatus::Pendente);
    }

    #[tokio::test]
    #[ignore = "requer PostgreSQL (DATABASE_URL)"]
    async fn demanda_com_provedor_inexistente_falha() {
        let pool = test_utils::test_pool().await;
        let service = test_utils::demand_service(&pool);

        let err = service
            .create_demand(
                "Sem dono",
                "Demanda de provedor que não existe",
                DemandType::Outro,
                DemandPriority::Baixa,
                Uuid::new_v4(),
                None,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ProviderNotFound));
    }

    #[tokio::test]
    #[ignore = "requer PostgreSQL (DATABASE_URL)"]
    async fn concluida_nao_volta_para_pendente() {
        let pool = test_utils::test_pool().await;
        let service = test_utils::demand_service(&pool);
        let provider_id = provedor_de_teste(&pool).await;

        let demand = service
            .create_demand(
                "Demanda 1",
                "Descrição da demanda 1",
                DemandType::Configuracao,
                DemandPriority::Media,
                provider_id,
                None,
            )
            .await
            .unwrap();

        let demand = service
            .change_status(demand.id, DemandStatus::EmAndamento)
            .await
            .unwrap();
        assert_eq!(demand.status, DemandStatus::EmAndamento);

        service
            .change_status(demand.id, DemandStatus::Concluida)
            .await
            .unwrap();

        let err = service
            .change_status(demand.id, DemandStatus::Pendente)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::InvalidStatusTransition {
                de: DemandStatus::Concluida,
                para: DemandStatus::Pendente,
            }
        ));
    }

    #[tokio::test]
    #[ignore = "requer PostgreSQL (DATABASE_URL)"]
    async fn excluir_duas_vezes_da_nao_encontrada() {
        let pool = test_utils::test_pool().await;
        let service = test_utils::demand_service(&pool);
        let provider_id = provedor_de_teste(&pool).await;

        let demand = service
            .create_demand(
                "Descartável",
                "Demanda criada só para excluir",
                DemandType::Outro,
                DemandPriority::Baixa,
                provider_id,
                None,
            )
            .await
            .unwrap();

        service.delete_demand(demand.id).await.unwrap();

        let err = service.delete_demand(demand.id).await.unwrap_err();
        assert!(matches!(err, AppError::DemandNotFound));
    }

    #[tokio::test]
    #[ignore = "requer PostgreSQL (DATABASE_URL)"]
    async fn filtro_por_status_so_traz_o_status_pedido_em_ordem_decrescente() {
        let pool = test_utils::test_pool().await;
        let service = test_utils::demand_service(&pool);
        let provider_id = provedor_de_teste(&pool).await;

        for i in 1..=2 {
            service
                .create_demand(
                    &format!("Demanda {}", i),
                    &format!("Descrição da demanda {}", i),
                    DemandType::Manutencao,
                    DemandPriority::Alta,
                    provider_id,
                    None,
                )
                .await
                .unwrap();
        }

        let listadas = service
            .list_demands(Some(DemandStatus::Pendente))
            .await
            .unwrap();

        assert!(listadas.len() >= 2);
        assert!(listadas
            .iter()
            .all(|d| d.demand.status == DemandStatus::Pendente));
        assert!(listadas
            .windows(2)
            .all(|par| par[0].demand.created_at >= par[1].demand.created_at));
    }
}
