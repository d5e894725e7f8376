//! backend/src/io/rest/mappers/user_mapper.rs

use crate::domain::models::{Role as DomainRole, User};
use shared::{Role as SharedRole, UserListResponse, UserSummary};

/// Mapper from domain users to the admin-facing summaries
pub struct UserMapper;

impl UserMapper {
    pub fn role_to_dto(role: DomainRole) -> SharedRole {
        match role {
            DomainRole::User => SharedRole::User,
            DomainRole::Admin => SharedRole::Admin,
        }
    }

    /// Drops the password hash
    pub fn to_summary(user: User) -> UserSummary {
        UserSummary {
            id: user.id,
            email: user.email,
            gender: user.gender,
            role: Self::role_to_dto(user.role),
        }
    }

    pub fn to_user_list_dto(users: Vec<User>) -> UserListResponse {
        UserListResponse {
            users: users.into_iter().map(Self::to_summary).collect(),
        }
    }
}
