// src/handlers/users.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{common::error::AppError, config::AppState, models::user::UserSummary};

// GET /users/consultors
#[utoipa::path(
    get,
    path = "/users/consultors",
    tag = "Users",
    responses(
        (status = 200, description = "Consultores disponíveis, apenas {id, name}", body = Vec<UserSummary>)
    )
)]
pub async fn list_consultores(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let consultores = app_state.user_service.list_consultores().await?;

    Ok((StatusCode::OK, Json(consultores)))
}

// GET /users/atendentes
#[utoipa::path(
    get,
    path = "/users/atendentes",
    tag = "Users",
    responses(
        (status = 200, description = "Atendentes disponíveis, apenas {id, name}", body = Vec<UserSummary>)
    )
)]
pub async fn list_atendentes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let atendentes = app_state.user_service.list_atendentes().await?;

    Ok((StatusCode::OK, Json(atendentes)))
}
