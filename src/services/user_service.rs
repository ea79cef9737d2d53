//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{DeleteResult, FullName, User, UserPayload};
use crate::errors::AppResult;
use crate::infra::UserRepository;
use crate::types::PaginationParams;

/// User service trait for dependency injection.
///
/// This is the persistence collaborator the HTTP handlers talk to.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List users inside the `from`/`to` window
    async fn list_users(&self, params: &PaginationParams) -> AppResult<Vec<User>>;

    /// List full names of users inside the `from`/`to` window
    async fn list_full_names(&self, params: &PaginationParams) -> AppResult<Vec<FullName>>;

    /// Create a new user
    async fn create(&self, user: UserPayload) -> AppResult<User>;

    /// Replace an existing user
    async fn update(&self, user: UserPayload, id: i32) -> AppResult<User>;

    /// Delete a user
    async fn delete(&self, id: i32) -> AppResult<DeleteResult>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self, params: &PaginationParams) -> AppResult<Vec<User>> {
        tracing::debug!(offset = params.offset(), limit = ?params.limit(), "Listing users");
        self.repo.list(*params).await
    }

    async fn list_full_names(&self, params: &PaginationParams) -> AppResult<Vec<FullName>> {
        let users = self.repo.list(*params).await?;
        Ok(users.iter().map(FullName::from).collect())
    }

    async fn create(&self, user: UserPayload) -> AppResult<User> {
        let created = self.repo.create(user).await?;
        tracing::info!(user_id = created.id, "User created");
        Ok(created)
    }

    async fn update(&self, user: UserPayload, id: i32) -> AppResult<User> {
        let updated = self.repo.update(id, user).await?;
        tracing::info!(user_id = id, "User updated");
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> AppResult<DeleteResult> {
        let result = self.repo.delete(id).await?;
        tracing::info!(user_id = id, affected = result.affected, "User deleted");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mockall::predicate::eq;

    use crate::errors::AppError;
    use crate::infra::MockUserRepository;

    fn create_test_user(id: i32, first_name: &str, last_name: &str, age: i32) -> User {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        User {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            age,
            created_at: at,
            updated_at: at,
        }
    }

    fn payload(age: i32) -> UserPayload {
        UserPayload {
            first_name: "Ann".to_string(),
            last_name: "Smith".to_string(),
            age,
        }
    }

    #[tokio::test]
    async fn test_list_users_forwards_window() {
        let params = PaginationParams::new(10.0, 20.0);

        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .with(eq(params))
            .times(1)
            .returning(|_| Ok(vec![create_test_user(11, "Ann", "Smith", 25)]));

        let service = UserManager::new(Arc::new(repo));
        let users = service.list_users(&params).await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, 11);
    }

    #[tokio::test]
    async fn test_list_full_names_derives_names() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().returning(|_| {
            Ok(vec![
                create_test_user(1, "Ann", "Smith", 25),
                create_test_user(2, "Bob", "Jones", 40),
            ])
        });

        let service = UserManager::new(Arc::new(repo));
        let names = service
            .list_full_names(&PaginationParams::default())
            .await
            .unwrap();

        assert_eq!(
            names,
            vec![
                FullName { id: 1, full_name: "Ann Smith".to_string() },
                FullName { id: 2, full_name: "Bob Jones".to_string() },
            ]
        );
    }

    #[tokio::test]
    async fn test_create_returns_stored_record() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .with(eq(payload(25)))
            .times(1)
            .returning(|p| Ok(create_test_user(1, &p.first_name, &p.last_name, p.age)));

        let service = UserManager::new(Arc::new(repo));
        let user = service.create(payload(25)).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.full_name(), "Ann Smith");
    }

    #[tokio::test]
    async fn test_update_is_idempotent_for_same_payload() {
        let mut repo = MockUserRepository::new();
        repo.expect_update()
            .with(eq(5), eq(payload(30)))
            .times(2)
            .returning(|id, p| Ok(create_test_user(id, &p.first_name, &p.last_name, p.age)));

        let service = UserManager::new(Arc::new(repo));
        let first = service.update(payload(30), 5).await.unwrap();
        let second = service.update(payload(30), 5).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_update_missing_user_propagates_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().returning(|_, _| Err(AppError::NotFound));

        let service = UserManager::new(Arc::new(repo));
        let result = service.update(payload(30), 404).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_reports_affected_rows() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete()
            .with(eq(42))
            .times(1)
            .returning(|_| Ok(DeleteResult { affected: 1 }));

        let service = UserManager::new(Arc::new(repo));
        let result = service.delete(42).await.unwrap();

        assert_eq!(result.affected, 1);
    }

    #[tokio::test]
    async fn test_store_errors_are_not_swallowed() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .returning(|_| Err(AppError::internal("connection reset")));

        let service = UserManager::new(Arc::new(repo));
        let result = service.list_users(&PaginationParams::default()).await;

        assert!(matches!(result.unwrap_err(), AppError::Internal(_)));
    }
}
