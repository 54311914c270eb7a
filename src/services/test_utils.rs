// src/services/test_utils.rs
//
// Infra compartilhada dos testes de serviço que exigem um PostgreSQL real.
// Esses testes são marcados com #[ignore] e rodam com
// `DATABASE_URL=... cargo test -- --ignored`.

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::db::{ActionRepository, DemandRepository, ProviderRepository, UserRepository};

use super::{ActionService, DemandService, ProviderService};

pub(crate) async fn test_pool() -> PgPool {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL deve ser definida para os testes de banco");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Falha ao conectar no banco de testes");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Falha ao rodar as migrações no banco de testes");

    pool
}

pub(crate) fn provider_service(pool: &PgPool) -> ProviderService {
    ProviderService::new(
        ProviderRepository::new(pool.clone()),
        DemandRepository::new(pool.clone()),
        ActionRepository::new(pool.clone()),
        pool.clone(),
    )
}

pub(crate) fn demand_service(pool: &PgPool) -> DemandService {
    DemandService::new(
        DemandRepository::new(pool.clone()),
        ActionRepository::new(pool.clone()),
        ProviderRepository::new(pool.clone()),
        UserRepository::new(pool.clone()),
        pool.clone(),
    )
}

pub(crate) fn action_service(pool: &PgPool) -> ActionService {
    ActionService::new(
        ActionRepository::new(pool.clone()),
        DemandRepository::new(pool.clone()),
        UserRepository::new(pool.clone()),
        pool.clone(),
    )
}
