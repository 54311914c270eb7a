// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Providers ---
        handlers::providers::create_provider,
        handlers::providers::list_providers,
        handlers::providers::get_provider,
        handlers::providers::update_provider,
        handlers::providers::delete_provider,

        // --- Demands ---
        handlers::demands::create_demand,
        handlers::demands::list_demands,
        handlers::demands::get_demand,
        handlers::demands::change_status,
        handlers::demands::delete_demand,

        // --- Actions ---
        handlers::actions::create_action,
        handlers::actions::list_actions,

        // --- Users ---
        handlers::users::list_consultores,
        handlers::users::list_atendentes,
    ),
    components(
        schemas(
            models::provider::Provider,
            models::provider::ProviderDetails,
            models::demand::Demand,
            models::demand::DemandDetails,
            models::demand::DemandSummary,
            models::demand::DemandType,
            models::demand::DemandStatus,
            models::demand::DemandPriority,
            models::action::Action,
            models::action::ActionType,
            models::action::ActionWithTecnico,
            models::action::CreatedAction,
            models::user::UserSummary,
            models::user::UserRole,
            handlers::providers::CreateProviderPayload,
            handlers::providers::UpdateProviderPayload,
            handlers::demands::CreateDemandPayload,
            handlers::demands::ChangeStatusPayload,
            handlers::actions::CreateActionPayload,
        )
    ),
    tags(
        (name = "Providers", description = "Provedores atendidos pelo suporte"),
        (name = "Demands", description = "Demandas (chamados) e seu ciclo de status"),
        (name = "Actions", description = "Ações técnicas registradas nas demandas"),
        (name = "Users", description = "Consultores e atendentes para atribuição")
    )
)]
pub struct ApiDoc;
