// src/models/demand.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::action::ActionWithTecnico;
use crate::models::provider::Provider;
use crate::models::user::UserSummary;

// --- ENUMS ---

// Mapeia o CREATE TYPE demand_type do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "demand_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DemandType {
    Diagnostico,
    Manutencao,
    Configuracao,
    Instalacao,
    Outro,
}

// Mapeia o CREATE TYPE demand_status do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "demand_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DemandStatus {
    Pendente,
    EmAndamento,
    Concluida,
    Cancelada,
}

impl DemandStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemandStatus::Pendente => "PENDENTE",
            DemandStatus::EmAndamento => "EM_ANDAMENTO",
            DemandStatus::Concluida => "CONCLUIDA",
            DemandStatus::Cancelada => "CANCELADA",
        }
    }

    /// Tabela de transições de status.
    ///
    /// CONCLUIDA e CANCELADA são terminais quanto a regressão: nenhuma volta
    /// para PENDENTE ou EM_ANDAMENTO. CONCLUIDA ainda pode virar CANCELADA;
    /// de CANCELADA não se sai. Repetir o status atual é um no-op permitido.
    pub fn can_transition_to(self, novo: DemandStatus) -> bool {
        use DemandStatus::*;
        match (self, novo) {
            (Concluida, Pendente) | (Concluida, EmAndamento) => false,
            (Cancelada, Pendente) | (Cancelada, EmAndamento) | (Cancelada, Concluida) => false,
            // Qualquer destino é válido a partir de PENDENTE ou EM_ANDAMENTO
            _ => true,
        }
    }
}

impl fmt::Display for DemandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Validação única na borda: query string e payload de mudança de status
// chegam como texto e passam por aqui.
impl std::str::FromStr for DemandStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDENTE" => Ok(DemandStatus::Pendente),
            "EM_ANDAMENTO" => Ok(DemandStatus::EmAndamento),
            "CONCLUIDA" => Ok(DemandStatus::Concluida),
            "CANCELADA" => Ok(DemandStatus::Cancelada),
            _ => Err(()),
        }
    }
}

// Mapeia o CREATE TYPE demand_priority do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "demand_priority", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DemandPriority {
    Baixa,
    Media,
    Alta,
    Critica,
}

// --- ENTIDADE ---

// Demanda: o chamado de suporte de um provedor.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Demand {
    #[schema(example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    pub id: Uuid,

    #[schema(example = "Link instável na matriz")]
    pub titulo: String,

    #[schema(example = "Quedas intermitentes desde segunda-feira")]
    pub descricao: String,

    pub tipo: DemandType,
    pub status: DemandStatus,
    pub prioridade: DemandPriority,

    pub provider_id: Uuid,

    // Atendente responsável pela triagem (role ATENDENTE), quando atribuído
    pub atendente_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Demanda com provedor, atendente e ações anexados (listagem e detalhe).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DemandDetails {
    #[serde(flatten)]
    pub demand: Demand,

    pub provider: Provider,
    pub atendente: Option<UserSummary>,
    pub acoes: Vec<ActionWithTecnico>,
}

// Projeção mínima usada na resposta de criação de ação.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DemandSummary {
    pub id: Uuid,

    #[schema(example = "Link instável na matriz")]
    pub titulo: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use DemandStatus::*;

    const ALL: [DemandStatus; 4] = [Pendente, EmAndamento, Concluida, Cancelada];

    #[test]
    fn pendente_e_em_andamento_aceitam_qualquer_destino() {
        for destino in ALL {
            assert!(Pendente.can_transition_to(destino));
            assert!(EmAndamento.can_transition_to(destino));
        }
    }

    #[test]
    fn estados_terminais_nao_regridem() {
        for atual in [Concluida, Cancelada] {
            assert!(!atual.can_transition_to(Pendente));
            assert!(!atual.can_transition_to(EmAndamento));
        }
    }

    #[test]
    fn concluida_ainda_pode_ser_cancelada_mas_nao_o_inverso() {
        assert!(Concluida.can_transition_to(Cancelada));
        assert!(!Cancelada.can_transition_to(Concluida));
    }

    #[test]
    fn repetir_o_mesmo_status_e_permitido() {
        for status in ALL {
            assert!(status.can_transition_to(status));
        }
    }

    #[test]
    fn status_serializa_com_os_literais_do_banco() {
        assert_eq!(serde_json::to_string(&EmAndamento).unwrap(), "\"EM_ANDAMENTO\"");
        assert_eq!(serde_json::to_string(&Concluida).unwrap(), "\"CONCLUIDA\"");

        let parsed: DemandStatus = serde_json::from_str("\"PENDENTE\"").unwrap();
        assert_eq!(parsed, Pendente);

        assert!(serde_json::from_str::<DemandStatus>("\"FINALIZADA\"").is_err());
    }

    #[test]
    fn display_usa_o_literal() {
        assert_eq!(EmAndamento.to_string(), "EM_ANDAMENTO");
    }

    #[test]
    fn from_str_aceita_so_os_quatro_literais() {
        for status in ALL {
            assert_eq!(status.as_str().parse::<DemandStatus>(), Ok(status));
        }
        assert!("FINALIZADA".parse::<DemandStatus>().is_err());
        assert!("pendente".parse::<DemandStatus>().is_err());
        assert!("".parse::<DemandStatus>().is_err());
    }
}
