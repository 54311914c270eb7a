// src/handlers/demands.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::demand::{Demand, DemandDetails, DemandPriority, DemandStatus, DemandType},
};

// O payload de criação não tem campo de status: toda demanda nasce PENDENTE.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDemandPayload {
    #[validate(length(min = 1, message = "O título é obrigatório"))]
    #[schema(example = "Link instável na matriz")]
    pub titulo: String,

    #[validate(length(min = 1, message = "A descrição é obrigatória"))]
    #[schema(example = "Quedas intermitentes desde segunda-feira")]
    pub descricao: String,

    #[schema(example = "CONFIGURACAO")]
    pub tipo: DemandType,

    #[schema(example = "MEDIA")]
    pub prioridade: DemandPriority,

    pub provider_id: Uuid,

    pub atendente_id: Option<Uuid>,
}

// O status chega como texto e é validado aqui na borda, uma única vez;
// daqui para dentro só circula o enum fechado.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusPayload {
    #[schema(example = "EM_ANDAMENTO")]
    pub status: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListDemandsQuery {
    // Um dos quatro valores do enum; qualquer outro valor é rejeitado com 400
    pub status: Option<String>,
}

// POST /demands
#[utoipa::path(
    post,
    path = "/demands",
    tag = "Demands",
    request_body = CreateDemandPayload,
    responses(
        (status = 201, description = "Demanda criada com status PENDENTE", body = Demand),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Provedor ou atendente não encontrado")
    )
)]
pub async fn create_demand(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateDemandPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let demand = app_state
        .demand_service
        .create_demand(
            &payload.titulo,
            &payload.descricao,
            payload.tipo,
            payload.prioridade,
            payload.provider_id,
            payload.atendente_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(demand)))
}

// GET /demands?status=
#[utoipa::path(
    get,
    path = "/demands",
    tag = "Demands",
    params(ListDemandsQuery),
    responses(
        (status = 200, description = "Demandas com provedor, atendente e ações", body = Vec<DemandDetails>),
        (status = 400, description = "Status de filtro inválido")
    )
)]
pub async fn list_demands(
    State(app_state): State<AppState>,
    Query(query): Query<ListDemandsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = match query.status.as_deref() {
        Some(s) => Some(
            s.parse::<DemandStatus>()
                .map_err(|_| AppError::InvalidStatus(s.to_string()))?,
        ),
        None => None,
    };

    let demands = app_state.demand_service.list_demands(status).await?;

    Ok((StatusCode::OK, Json(demands)))
}

// GET /demands/{id}
#[utoipa::path(
    get,
    path = "/demands/{id}",
    tag = "Demands",
    params(("id" = Uuid, Path, description = "ID da demanda")),
    responses(
        (status = 200, description = "Demanda com provedor, atendente e ações", body = DemandDetails),
        (status = 404, description = "Demanda não encontrada")
    )
)]
pub async fn get_demand(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let demand = app_state.demand_service.get_demand_details(id).await?;

    Ok((StatusCode::OK, Json(demand)))
}

// PATCH /demands/{id}/status
#[utoipa::path(
    patch,
    path = "/demands/{id}/status",
    tag = "Demands",
    params(("id" = Uuid, Path, description = "ID da demanda")),
    request_body = ChangeStatusPayload,
    responses(
        (status = 200, description = "Demanda com o novo status", body = Demand),
        (status = 400, description = "Transição de status inválida"),
        (status = 404, description = "Demanda não encontrada")
    )
)]
pub async fn change_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChangeStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let novo_status = payload
        .status
        .parse::<DemandStatus>()
        .map_err(|_| AppError::InvalidStatus(payload.status.clone()))?;

    let demand = app_state
        .demand_service
        .change_status(id, novo_status)
        .await?;

    Ok((StatusCode::OK, Json(demand)))
}

// DELETE /demands/{id}
#[utoipa::path(
    delete,
    path = "/demands/{id}",
    tag = "Demands",
    params(("id" = Uuid, Path, description = "ID da demanda")),
    responses(
        (status = 204, description = "Demanda e suas ações excluídas"),
        (status = 404, description = "Demanda não encontrada")
    )
)]
pub async fn delete_demand(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.demand_service.delete_demand(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
