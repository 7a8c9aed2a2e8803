//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppResult, OptionExt};
use domain::{DomainError, EntityId, NewUser, Password, RegisterUser, UpdateUser, User};

use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
///
/// Every lookup only sees registered accounts; an unregistered or unknown
/// id fails with `USER_NOT_FOUND`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new account. The email must be unused, even by unregistered accounts.
    async fn register(&self, input: RegisterUser) -> AppResult<User>;

    async fn get_user(&self, id: EntityId) -> AppResult<User>;

    /// List registered users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    async fn update_user(&self, id: EntityId, changes: UpdateUser) -> AppResult<User>;

    /// Soft delete: status becomes `UNREGISTERED`
    async fn unregister_user(&self, id: EntityId) -> AppResult<User>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, input: RegisterUser) -> AppResult<User> {
        if self
            .repo
            .find_by_email_with_unregistered(&input.email)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict("email").into());
        }

        let password = Password::new(&input.password)?;

        let user = self
            .repo
            .create(NewUser {
                name: input.name,
                email: input.email,
                password_hash: password.into_string(),
                address: input.address,
            })
            .await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    async fn get_user(&self, id: EntityId) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_user_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn update_user(&self, id: EntityId, changes: UpdateUser) -> AppResult<User> {
        if changes.is_empty() {
            return self.get_user(id).await;
        }
        self.repo.update(id, changes).await
    }

    async fn unregister_user(&self, id: EntityId) -> AppResult<User> {
        let user = self.repo.unregister(id).await?;
        tracing::info!(user_id = %user.id, "user unregistered");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use chrono::Utc;
    use common::{AppError, ErrorDescriptor};
    use domain::UserStatus;
    use mockall::predicate::*;

    fn user(id: i64) -> User {
        User {
            id: EntityId(id),
            name: "Kim".to_string(),
            email: "kim@example.com".to_string(),
            password: "$argon2id$hash".to_string(),
            status: UserStatus::Registered,
            address: "Seoul".to_string(),
            registered_at: Utc::now(),
            unregistered_at: None,
            last_login_at: None,
        }
    }

    fn register_input(password: &str) -> RegisterUser {
        RegisterUser {
            name: "Kim".to_string(),
            email: "kim@example.com".to_string(),
            password: password.to_string(),
            address: "Seoul".to_string(),
        }
    }

    fn result_code(err: &AppError) -> Option<i32> {
        err.as_api_error().map(|e| e.error_code().error_code())
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email_with_unregistered()
            .withf(|email| email == "kim@example.com")
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new_user| {
                new_user.password_hash != "password123"
                    && Password::from_hash(new_user.password_hash.clone()).verify("password123")
            })
            .times(1)
            .returning(|_| Ok(user(1)));

        let service = UserManager::new(Arc::new(repo));
        let created = service.register(register_input("password123")).await.unwrap();
        assert_eq!(created.id, EntityId(1));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email_with_unregistered()
            .returning(|_| Ok(Some(user(1))));
        repo.expect_create().never();

        let service = UserManager::new(Arc::new(repo));
        let err = service.register(register_input("password123")).await.unwrap_err();

        let api = err.as_api_error().unwrap();
        assert_eq!(api.error_code().error_code(), 400);
        assert_eq!(api.description(), "email already exists");
    }

    #[tokio::test]
    async fn test_register_short_password_is_bad_request() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email_with_unregistered()
            .returning(|_| Ok(None));
        repo.expect_create().never();

        let service = UserManager::new(Arc::new(repo));
        let err = service.register(register_input("short")).await.unwrap_err();
        assert_eq!(result_code(&err), Some(400));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(EntityId(42)))
            .returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(repo));
        let err = service.get_user(EntityId(42)).await.unwrap_err();
        assert_eq!(result_code(&err), Some(1404));
    }

    #[tokio::test]
    async fn test_get_user_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(EntityId(7)))
            .returning(|id| Ok(Some(user(id.value()))));

        let service = UserManager::new(Arc::new(repo));
        assert_eq!(service.get_user(EntityId(7)).await.unwrap().id, EntityId(7));
    }

    #[tokio::test]
    async fn test_empty_update_skips_write() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().never();
        repo.expect_find_by_id().returning(|id| Ok(Some(user(id.value()))));

        let service = UserManager::new(Arc::new(repo));
        let updated = service
            .update_user(EntityId(3), UpdateUser::default())
            .await
            .unwrap();
        assert_eq!(updated.id, EntityId(3));
    }

    #[tokio::test]
    async fn test_update_passes_changes() {
        let mut repo = MockUserRepository::new();
        repo.expect_update()
            .withf(|id, changes| *id == EntityId(3) && changes.name.as_deref() == Some("Lee"))
            .returning(|id, changes| {
                let mut updated = user(id.value());
                if let Some(name) = changes.name {
                    updated.name = name;
                }
                Ok(updated)
            });

        let service = UserManager::new(Arc::new(repo));
        let updated = service
            .update_user(
                EntityId(3),
                UpdateUser {
                    name: Some("Lee".to_string()),
                    address: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Lee");
    }

    #[tokio::test]
    async fn test_unregister_propagates_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_unregister()
            .returning(|_| Err(AppError::user_not_found()));

        let service = UserManager::new(Arc::new(repo));
        let err = service.unregister_user(EntityId(5)).await.unwrap_err();
        assert_eq!(result_code(&err), Some(1404));
    }

    #[tokio::test]
    async fn test_repository_failure_is_unclassified() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .returning(|| Err(AppError::internal("pool exhausted")));

        let service = UserManager::new(Arc::new(repo));
        let err = service.list_users().await.unwrap_err();
        assert!(err.as_api_error().is_none());
    }
}
