// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{ActionRepository, DemandRepository, ProviderRepository, UserRepository},
    services::{ActionService, DemandService, ProviderService, UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub provider_service: ProviderService,
    pub demand_service: DemandService,
    pub action_service: ActionService,
    pub user_service: UserService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let provider_repo = ProviderRepository::new(db_pool.clone());
        let demand_repo = DemandRepository::new(db_pool.clone());
        let action_repo = ActionRepository::new(db_pool.clone());
        let user_repo = UserRepository::new(db_pool.clone());

        let provider_service = ProviderService::new(
            provider_repo.clone(),
            demand_repo.clone(),
            action_repo.clone(),
            db_pool.clone(),
        );
        let demand_service = DemandService::new(
            demand_repo.clone(),
            action_repo.clone(),
            provider_repo,
            user_repo.clone(),
            db_pool.clone(),
        );
        let action_service = ActionService::new(
            action_repo,
            demand_repo,
            user_repo.clone(),
            db_pool.clone(),
        );
        let user_service = UserService::new(user_repo);

        Ok(Self {
            db_pool,
            provider_service,
            demand_service,
            action_service,
            user_service,
        })
    }
}
