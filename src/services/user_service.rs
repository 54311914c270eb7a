// src/services/user_service.rs

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::user::{UserRole, UserSummary},
};

// Diretório de usuários para os seletores do frontend.
#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    pub async fn list_consultores(&self) -> Result<Vec<UserSummary>, AppError> {
        self.repo.find_by_role(UserRole::Consultor).await
    }

    pub async fn list_atendentes(&self) -> Result<Vec<UserSummary>, AppError> {
        self.repo.find_by_role(UserRole::Atendente).await
    }
}
