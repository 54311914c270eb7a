// src/handlers/actions.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::action::{ActionType, ActionWithTecnico, CreatedAction},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateActionPayload {
    #[validate(length(min = 10, message = "A descrição deve ter no mínimo 10 caracteres"))]
    #[schema(example = "Análise inicial dos logs do roteador")]
    pub descricao: String,

    #[schema(example = "ANALISE")]
    pub tipo: ActionType,

    pub demand_id: Uuid,

    // Opcional: técnico (role CONSULTOR) que executou a ação
    pub tecnico_id: Option<Uuid>,
}

// POST /actions
#[utoipa::path(
    post,
    path = "/actions",
    tag = "Actions",
    request_body = CreateActionPayload,
    responses(
        (status = 201, description = "Ação registrada", body = CreatedAction),
        (status = 400, description = "Descrição com menos de 10 caracteres"),
        (status = 404, description = "Demanda não encontrada")
    )
)]
pub async fn create_action(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateActionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let action = app_state
        .action_service
        .create_action(
            &payload.descricao,
            payload.tipo,
            payload.demand_id,
            payload.tecnico_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(action)))
}

// GET /actions/{demandId}
#[utoipa::path(
    get,
    path = "/actions/{demand_id}",
    tag = "Actions",
    params(("demand_id" = Uuid, Path, description = "ID da demanda")),
    responses(
        (status = 200, description = "Ações da demanda, mais recente primeiro", body = Vec<ActionWithTecnico>)
    )
)]
pub async fn list_actions(
    State(app_state): State<AppState>,
    Path(demand_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let actions = app_state.action_service.list_actions(demand_id).await?;

    Ok((StatusCode::OK, Json(actions)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(descricao: &str) -> CreateActionPayload {
        CreateActionPayload {
            descricao: descricao.to_string(),
            tipo: ActionType::Analise,
            demand_id: Uuid::new_v4(),
            tecnico_id: None,
        }
    }

    #[test]
    fn descricao_com_menos_de_10_caracteres_e_rejeitada() {
        assert!(payload("curta").validate().is_err());
        assert!(payload("123456789").validate().is_err());
    }

    #[test]
    fn descricao_com_exatamente_10_caracteres_passa() {
        assert!(payload("1234567890").validate().is_ok());
    }

    #[test]
    fn tipo_invalido_e_rejeitado_na_desserializacao() {
        let body = serde_json::json!({
            "descricao": "descrição válida",
            "tipo": "LIMPEZA",
            "demandId": Uuid::new_v4(),
        });
        assert!(serde_json::from_value::<CreateActionPayload>(body).is_err());
    }
}
