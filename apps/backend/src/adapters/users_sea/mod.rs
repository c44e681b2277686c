//! SeaORM adapter for the user repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set};

use crate::auth::password::HashedPassword;
use crate::entities::users;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;
use crate::repos::users::{User, UserRepository};

pub mod dto;

pub use dto::UserCreate;

/// Persistent user store backed by the `users` table.
#[derive(Debug, Clone)]
pub struct SeaUserRepository {
    db: DatabaseConnection,
}

impl SeaUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// Adapter functions return DbErr; the trait impl maps to DomainError.

pub async fn insert_user(
    db: &DatabaseConnection,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: NotSet,
        email: Set(dto.email),
        password_hash: Set(dto.password_hash.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(db).await
}

pub async fn find_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            password_hash: HashedPassword::from_stored(model.password_hash),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl UserRepository for SeaUserRepository {
    async fn create(
        &self,
        email: &str,
        password_hash: &HashedPassword,
    ) -> Result<User, DomainError> {
        let row = insert_user(&self.db, UserCreate::new(email, password_hash))
            .await
            .map_err(map_db_err)?;
        Ok(User::from(row))
    }

    async fn find_by_email(&self, email: &str) -> Result<User, DomainError> {
        find_user_by_email(&self.db, email)
            .await
            .map_err(map_db_err)?
            .map(User::from)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "User not found"))
    }
}
