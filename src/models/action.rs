// src/models/action.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::demand::DemandSummary;
use crate::models::user::UserSummary;

// Mapeia o CREATE TYPE action_type do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "action_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Analise,
    Configuracao,
    Manutencao,
    Comunicacao,
    Resolucao,
}

// Ação: registro imutável de trabalho técnico executado em uma demanda.
// Não existe update nem delete de ação pela API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[schema(example = "f47ac10b-58cc-4372-a567-0e02b2c3d479")]
    pub id: Uuid,

    #[schema(example = "Análise inicial dos logs do roteador")]
    pub descricao: String,

    pub tipo: ActionType,

    pub demand_id: Uuid,

    // Técnico que executou (role CONSULTOR), quando informado
    pub tecnico_id: Option<Uuid>,

    // Ordenação natural da listagem: mais recente primeiro
    pub executada_em: DateTime<Utc>,
}

// Ação com o técnico {id, name} anexado (listagem por demanda).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionWithTecnico {
    #[serde(flatten)]
    pub action: Action,

    pub tecnico: Option<UserSummary>,
}

// Resposta da criação: ação + técnico + demanda {id, titulo}.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAction {
    #[serde(flatten)]
    pub action: Action,

    pub tecnico: Option<UserSummary>,
    pub demand: DemandSummary,
}
