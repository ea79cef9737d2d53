//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{DeleteResult, User, UserPayload};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List users inside the pagination window, ordered by ID
    async fn list(&self, params: PaginationParams) -> AppResult<Vec<User>>;

    /// Create a new user
    async fn create(&self, payload: UserPayload) -> AppResult<User>;

    /// Replace every field of an existing user
    async fn update(&self, id: i32, payload: UserPayload) -> AppResult<User>;

    /// Delete user by ID, reporting how many rows went away
    async fn delete(&self, id: i32) -> AppResult<DeleteResult>;
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn list(&self, params: PaginationParams) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .offset(params.offset())
            .limit(params.limit())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn create(&self, payload: UserPayload) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            first_name: Set(payload.first_name),
            last_name: Set(payload.last_name),
            age: Set(payload.age),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update(&self, id: i32, payload: UserPayload) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut active: ActiveModel = user.into();
        active.first_name = Set(payload.first_name);
        active.last_name = Set(payload.last_name);
        active.age = Set(payload.age);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<DeleteResult> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(DeleteResult {
            affected: result.rows_affected,
        })
    }
}
