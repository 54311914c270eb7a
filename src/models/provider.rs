// src/models/provider.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::demand::Demand;

// Provedor: a organização cliente que recebe suporte técnico.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Tech Solutions")]
    pub nome_fantasia: String,

    #[schema(example = "Maria Silva")]
    pub responsavel: Option<String>,

    // Único quando presente (constraint no banco).
    #[schema(example = "contato@tech.com")]
    pub email: Option<String>,

    #[schema(example = "11999990001")]
    pub telefone: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Provedor com suas demandas anexadas (o frontend usa para contagem).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDetails {
    #[serde(flatten)]
    pub provider: Provider,

    pub demandas: Vec<Demand>,
}
