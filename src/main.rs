//src/main.rs

use axum::{
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let provider_routes = Router::new()
        .route(
            "/",
            post(handlers::providers::create_provider).get(handlers::providers::list_providers),
        )
        .route(
            "/{id}",
            get(handlers::providers::get_provider)
                .put(handlers::providers::update_provider)
                .delete(handlers::providers::delete_provider),
        );

    let demand_routes = Router::new()
        .route(
            "/",
            post(handlers::demands::create_demand).get(handlers::demands::list_demands),
        )
        .route(
            "/{id}",
            get(handlers::demands::get_demand).delete(handlers::demands::delete_demand),
        )
        .route("/{id}/status", patch(handlers::demands::change_status));

    let action_routes = Router::new()
        .route("/", post(handlers::actions::create_action))
        .route("/{demand_id}", get(handlers::actions::list_actions));

    let user_routes = Router::new()
        .route("/consultors", get(handlers::users::list_consultores))
        .route("/atendentes", get(handlers::users::list_atendentes));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/", get(|| async { Json(json!({ "message": "API is running 🚀" })) }))
        .nest("/providers", provider_routes)
        .nest("/demands", demand_routes)
        .nest("/actions", action_routes)
        .nest("/users", user_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
