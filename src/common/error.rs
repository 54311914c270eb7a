// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::demand::DemandStatus;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Provedor já cadastrado")]
    ProviderAlreadyExists,

    #[error("Provedor não encontrado")]
    ProviderNotFound,

    #[error("Demanda não encontrada")]
    DemandNotFound,

    #[error("Atendente não encontrado")]
    AtendenteNotFound,

    #[error("Técnico não encontrado")]
    TecnicoNotFound,

    #[error("Status inválido: {0}")]
    InvalidStatus(String),

    #[error("Transição de status inválida: {de} -> {para}")]
    InvalidStatusTransition { de: DemandStatus, para: DemandStatus },

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::ProviderAlreadyExists => {
                (StatusCode::BAD_REQUEST, "Provedor já cadastrado".to_string())
            }
            AppError::ProviderNotFound => {
                (StatusCode::NOT_FOUND, "Provedor não encontrado".to_string())
            }
            AppError::DemandNotFound => {
                (StatusCode::NOT_FOUND, "Demanda não encontrada".to_string())
            }
            AppError::AtendenteNotFound => {
                (StatusCode::NOT_FOUND, "Atendente não encontrado".to_string())
            }
            AppError::TecnicoNotFound => {
                (StatusCode::NOT_FOUND, "Técnico não encontrado".to_string())
            }
            AppError::InvalidStatus(valor) => (
                StatusCode::BAD_REQUEST,
                format!("Status inválido: {}", valor),
            ),
            AppError::InvalidStatusTransition { de, para } => (
                StatusCode::BAD_REQUEST,
                format!("Transição de status inválida: {} -> {}", de, para),
            ),

            // DatabaseError e InternalServerError viram 500.
            // O `tracing` loga o detalhe; o cliente recebe só a mensagem genérica.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn demanda_nao_encontrada_vira_404() {
        let response = AppError::DemandNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Demanda não encontrada");
    }

    #[tokio::test]
    async fn conflito_de_email_vira_400() {
        let response = AppError::ProviderAlreadyExists.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Provedor já cadastrado");
    }

    #[tokio::test]
    async fn transicao_invalida_vira_400_com_os_dois_status() {
        let response = AppError::InvalidStatusTransition {
            de: DemandStatus::Concluida,
            para: DemandStatus::Pendente,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        let msg = body["error"].as_str().unwrap();
        assert!(msg.contains("CONCLUIDA"));
        assert!(msg.contains("PENDENTE"));
    }

    #[tokio::test]
    async fn status_desconhecido_vira_400() {
        let response = AppError::InvalidStatus("FINALIZADA".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Status inválido: FINALIZADA");
    }

    #[tokio::test]
    async fn erro_de_banco_vira_500_sem_vazar_detalhe() {
        let response = AppError::DatabaseError(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Ocorreu um erro inesperado.");
    }

    #[tokio::test]
    async fn erro_de_validacao_retorna_detalhes_por_campo() {
        let mut errors = validator::ValidationErrors::new();
        let mut err = validator::ValidationError::new("length");
        err.message = Some("A descrição deve ter no mínimo 10 caracteres".into());
        errors.add("descricao", err);

        let response = AppError::ValidationError(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Um ou mais campos são inválidos.");
        assert!(body["details"]["descricao"][0]
            .as_str()
            .unwrap()
            .contains("10 caracteres"));
    }
}
