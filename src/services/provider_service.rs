// src/services/provider_service.rs

use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ActionRepository, DemandRepository, ProviderRepository},
    models::provider::{Provider, ProviderDetails},
};

#[derive(Clone)]
pub struct ProviderService {
    repo: ProviderRepository,
    demand_repo: DemandRepository,
    action_repo: ActionRepository,
    pool: PgPool,
}

impl ProviderService {
    pub fn new(
        repo: ProviderRepository,
        demand_repo: DemandRepository,
        action_repo: ActionRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            demand_repo,
            action_repo,
            pool,
        }
    }

    /// Cria um provedor. Se veio e-mail, a checagem de duplicidade e o INSERT
    /// acontecem na mesma transação.
    pub async fn create_provider(
        &self,
        nome_fantasia: &str,
        responsavel: Option<&str>,
        email: Option<&str>,
        telefone: Option<&str>,
    ) -> Result<Provider, AppError> {
        let mut tx = self.pool.begin().await?;

        if let Some(email) = email {
            if self.repo.find_by_email(&mut *tx, email).await?.is_some() {
                return Err(AppError::ProviderAlreadyExists);
            }
        }

        let provider = self
            .repo
            .create(&mut *tx, nome_fantasia, responsavel, email, telefone)
            .await?;

        tx.commit().await?;

        Ok(provider)
    }

    /// Lista todos os provedores, cada um com suas demandas anexadas.
    pub async fn list_providers(&self) -> Result<Vec<ProviderDetails>, AppError> {
        let providers = self.repo.find_all().await?;
        if providers.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = providers.iter().map(|p| p.id).collect();
        let demands = self.demand_repo.find_by_providers(&self.pool, &ids).await?;

        // Agrupa as demandas pelo provedor dono
        let mut por_provedor: HashMap<Uuid, Vec<_>> = HashMap::new();
        for demand in demands {
            por_provedor.entry(demand.provider_id).or_default().push(demand);
        }

        Ok(providers
            .into_iter()
            .map(|provider| {
                let demandas = por_provedor.remove(&provider.id).unwrap_or_default();
                ProviderDetails { provider, demandas }
            })
            .collect())
    }

    pub async fn get_provider_by_id(&self, id: Uuid) -> Result<ProviderDetails, AppError> {
        let provider = self
            .repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::ProviderNotFound)?;

        let demandas = self
            .demand_repo
            .find_by_providers(&self.pool, &[provider.id])
            .await?;

        Ok(ProviderDetails { provider, demandas })
    }

    /// Atualização parcial. Troca de e-mail re-checa a unicidade contra os
    /// demais provedores; manter o próprio e-mail não conflita.
    pub async fn update_provider(
        &self,
        id: Uuid,
        nome_fantasia: Option<&str>,
        responsavel: Option<&str>,
        email: Option<&str>,
        telefone: Option<&str>,
    ) -> Result<Provider, AppError> {
        let mut tx = self.pool.begin().await?;

        let atual = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::ProviderNotFound)?;

        if let Some(novo_email) = email {
            if atual.email.as_deref() != Some(novo_email) {
                if let Some(outro) = self.repo.find_by_email(&mut *tx, novo_email).await? {
                    if outro.id != id {
                        return Err(AppError::ProviderAlreadyExists);
                    }
                }
            }
        }

        let provider = self
            .repo
            .update(&mut *tx, id, nome_fantasia, responsavel, email, telefone)
            .await?;

        tx.commit().await?;

        Ok(provider)
    }

    /// Exclui um provedor em cascata: ações das demandas, depois as demandas,
    /// por fim o provedor — tudo em uma transação.
    pub async fn delete_provider(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        self.repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::ProviderNotFound)?;

        self.action_repo.delete_by_provider(&mut *tx, id).await?;
        let demandas_removidas = self.demand_repo.delete_by_provider(&mut *tx, id).await?;
        self.repo.delete(&mut *tx, id).await?;

        tx.commit().await?;

        tracing::info!(
            "Provedor {} excluído ({} demandas em cascata)",
            id,
            demandas_removidas
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::action::ActionType;
    use crate::models::demand::{DemandPriority, DemandType};
    use crate::services::test_utils;

    fn email_unico() -> String {
        format!("provedor+{}@teste.com", Uuid::new_v4())
    }

    #[tokio::test]
    #[ignore = "requer PostgreSQL (DATABASE_URL)"]
    async fn email_duplicado_conflita() {
        let pool = test_utils::test_pool().await;
        let service = test_utils::provider_service(&pool);
        let email = email_unico();

        service
            .create_provider("Tech Solutions", Some("Maria Silva"), Some(&email), None)
            .await
            .unwrap();

        let err = service
            .create_provider("Outra Empresa", None, Some(&email), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ProviderAlreadyExists));
    }

    #[tokio::test]
    #[ignore = "requer PostgreSQL (DATABASE_URL)"]
    async fn provedores_sem_email_nunca_conflitam() {
        let pool = test_utils::test_pool().await;
        let service = test_utils::provider_service(&pool);

        service
            .create_provider("Sem E-mail A", None, None, None)
            .await
            .unwrap();
        service
            .create_provider("Sem E-mail B", None, None, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    #[ignore = "requer PostgreSQL (DATABASE_URL)"]
    async fn atualizar_para_o_proprio_email_nao_conflita() {
        let pool = test_utils::test_pool().await;
        let service = test_utils::provider_service(&pool);
        let email = email_unico();

        let provider = service
            .create_provider("Tech Solutions", None, Some(&email), None)
            .await
            .unwrap();

        let atualizado = service
            .update_provider(provider.id, Some("Tech Solutions LTDA"), None, Some(&email), None)
            .await
            .unwrap();

        assert_eq!(atualizado.nome_fantasia, "Tech Solutions LTDA");
        assert_eq!(atualizado.email.as_deref(), Some(email.as_str()));
    }

    #[tokio::test]
    #[ignore = "requer PostgreSQL (DATABASE_URL)"]
    async fn excluir_provedor_leva_demandas_e_acoes_junto() {
        let pool = test_utils::test_pool().await;
        let service = test_utils::provider_service(&pool);
        let demand_service = test_utils::demand_service(&pool);
        let action_service = test_utils::action_service(&pool);

        let provider = service
            .create_provider("Efêmera", None, Some(&email_unico()), None)
            .await
            .unwrap();

        let demand = demand_service
            .create_demand(
                "Demanda da efêmera",
                "Descrição da demanda da efêmera",
                DemandType::Diagnostico,
                DemandPriority::Critica,
                provider.id,
                None,
            )
            .await
            .unwrap();

        action_service
            .create_action(
                "Primeira visita técnica registrada",
                ActionType::Analise,
                demand.id,
                None,
            )
            .await
            .unwrap();

        service.delete_provider(provider.id).await.unwrap();

        let err = demand_service
            .get_demand_details(demand.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DemandNotFound));

        let err = service.delete_provider(provider.id).await.unwrap_err();
        assert!(matches!(err, AppError::ProviderNotFound));
    }
}
