// src/handlers/providers.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::provider::{Provider, ProviderDetails},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProviderPayload {
    #[validate(length(min = 1, message = "O nome fantasia é obrigatório"))]
    #[schema(example = "Tech Solutions")]
    pub nome_fantasia: String,

    #[schema(example = "Maria Silva")]
    pub responsavel: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido"))]
    #[schema(example = "contato@tech.com")]
    pub email: Option<String>,

    #[schema(example = "11999990001")]
    pub telefone: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProviderPayload {
    #[validate(length(min = 1, message = "O nome fantasia não pode ficar vazio"))]
    #[schema(example = "Tech Solutions LTDA")]
    pub nome_fantasia: Option<String>,

    pub responsavel: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido"))]
    pub email: Option<String>,

    pub telefone: Option<String>,
}

// POST /providers
#[utoipa::path(
    post,
    path = "/providers",
    tag = "Providers",
    request_body = CreateProviderPayload,
    responses(
        (status = 201, description = "Provedor criado", body = Provider),
        (status = 400, description = "Dados inválidos ou e-mail já cadastrado")
    )
)]
pub async fn create_provider(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateProviderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let provider = app_state
        .provider_service
        .create_provider(
            &payload.nome_fantasia,
            payload.responsavel.as_deref(),
            payload.email.as_deref(),
            payload.telefone.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(provider)))
}

// GET /providers
#[utoipa::path(
    get,
    path = "/providers",
    tag = "Providers",
    responses(
        (status = 200, description = "Lista de provedores com suas demandas", body = Vec<ProviderDetails>)
    )
)]
pub async fn list_providers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let providers = app_state.provider_service.list_providers().await?;

    Ok((StatusCode::OK, Json(providers)))
}

// GET /providers/{id}
#[utoipa::path(
    get,
    path = "/providers/{id}",
    tag = "Providers",
    params(("id" = Uuid, Path, description = "ID do provedor")),
    responses(
        (status = 200, description = "Provedor com suas demandas", body = ProviderDetails),
        (status = 404, description = "Provedor não encontrado")
    )
)]
pub async fn get_provider(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let provider = app_state.provider_service.get_provider_by_id(id).await?;

    Ok((StatusCode::OK, Json(provider)))
}

// PUT /providers/{id}
#[utoipa::path(
    put,
    path = "/providers/{id}",
    tag = "Providers",
    params(("id" = Uuid, Path, description = "ID do provedor")),
    request_body = UpdateProviderPayload,
    responses(
        (status = 200, description = "Provedor atualizado", body = Provider),
        (status = 400, description = "Dados inválidos ou e-mail já cadastrado"),
        (status = 404, description = "Provedor não encontrado")
    )
)]
pub async fn update_provider(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProviderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let provider = app_state
        .provider_service
        .update_provider(
            id,
            payload.nome_fantasia.as_deref(),
            payload.responsavel.as_deref(),
            payload.email.as_deref(),
            payload.telefone.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(provider)))
}

// DELETE /providers/{id}
#[utoipa::path(
    delete,
    path = "/providers/{id}",
    tag = "Providers",
    params(("id" = Uuid, Path, description = "ID do provedor")),
    responses(
        (status = 200, description = "Provedor excluído, demandas e ações em cascata"),
        (status = 404, description = "Provedor não encontrado")
    )
)]
pub async fn delete_provider(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.provider_service.delete_provider(id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Provedor excluído com sucesso" })),
    ))
}
