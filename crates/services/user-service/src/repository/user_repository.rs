//! User repository implementation.
//!
//! Unregistering is a soft delete: the row stays with status `UNREGISTERED`.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult, OptionExt};
use domain::{DomainError, EntityId, NewUser, UpdateUser, User, UserStatus, STATUS_REGISTERED};

/// Postgres text for SQLSTATE 23505, for errors that arrive without a driver code
const UNIQUE_VIOLATION_MESSAGE: &str = "duplicate key value violates unique constraint";

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups exclude unregistered accounts unless the method name says otherwise.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find registered user by ID
    async fn find_by_id(&self, id: EntityId) -> AppResult<Option<User>>;

    /// Find user by email regardless of status
    async fn find_by_email_with_unregistered(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new registered user
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Update profile fields of a registered user
    async fn update(&self, id: EntityId, changes: UpdateUser) -> AppResult<User>;

    /// Mark a registered user as unregistered
    async fn unregister(&self, id: EntityId) -> AppResult<User>;

    /// List registered users ordered by ID
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// SeaORM-backed repository
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.db.as_ref()
    }

    async fn find_registered_model(&self, id: EntityId) -> AppResult<Option<user::Model>> {
        Ok(UserEntity::find_by_id(id.value())
            .filter(user::Column::Status.eq(STATUS_REGISTERED))
            .one(self.conn())
            .await?)
    }
}

/// The only unique column besides the key is `email`.
fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || err.to_string().contains(UNIQUE_VIOLATION_MESSAGE)
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: EntityId) -> AppResult<Option<User>> {
        Ok(self.find_registered_model(id).await?.map(User::from))
    }

    async fn find_by_email_with_unregistered(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.conn())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            name: Set(new_user.name),
            email: Set(new_user.email),
            password: Set(new_user.password_hash),
            status: Set(UserStatus::Registered.into()),
            address: Set(new_user.address),
            registered_at: Set(chrono::Utc::now()),
            unregistered_at: Set(None),
            last_login_at: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(self.conn()).await.map_err(|err| {
            if is_unique_violation(&err) {
                AppError::from(DomainError::conflict("email"))
            } else {
                AppError::from(err)
            }
        })?;
        Ok(User::from(model))
    }

    async fn update(&self, id: EntityId, changes: UpdateUser) -> AppResult<User> {
        let user = self
            .find_registered_model(id)
            .await?
            .ok_or_user_not_found()?;

        let mut active: ActiveModel = user.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(address) = changes.address {
            active.address = Set(address);
        }

        let model = active.update(self.conn()).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn unregister(&self, id: EntityId) -> AppResult<User> {
        let user = self
            .find_registered_model(id)
            .await?
            .ok_or_user_not_found()?;

        let mut active: ActiveModel = user.into();
        active.status = Set(UserStatus::Unregistered.into());
        active.unregistered_at = Set(Some(chrono::Utc::now()));

        let model = active.update(self.conn()).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::Status.eq(STATUS_REGISTERED))
            .order_by_asc(user::Column::Id)
            .all(self.conn())
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::ErrorDescriptor;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn model(id: i64, status: &str) -> user::Model {
        user::Model {
            id,
            name: "Kim".to_string(),
            email: format!("user{}@example.com", id),
            password: "$argon2id$hash".to_string(),
            status: status.to_string(),
            address: "Seoul".to_string(),
            registered_at: Utc::now(),
            unregistered_at: None,
            last_login_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, STATUS_REGISTERED)]])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        let user = store.find_by_id(EntityId(1)).await.unwrap().unwrap();
        assert_eq!(user.id, EntityId(1));
        assert_eq!(user.status, UserStatus::Registered);
        assert_eq!(user.email, "user1@example.com");
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        assert!(store.find_by_id(EntityId(9)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_returns_registered_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(5, STATUS_REGISTERED)]])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        let user = store
            .create(NewUser {
                name: "Kim".to_string(),
                email: "user5@example.com".to_string(),
                password_hash: "$argon2id$hash".to_string(),
                address: "Seoul".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, EntityId(5));
        assert!(user.is_registered());
    }

    #[tokio::test]
    async fn test_create_duplicate_email_is_bad_request() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Query(sea_orm::RuntimeErr::Internal(
                "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
            ))])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        let err = store
            .create(NewUser {
                name: "Kim".to_string(),
                email: "taken@example.com".to_string(),
                password_hash: "$argon2id$hash".to_string(),
                address: "Seoul".to_string(),
            })
            .await
            .unwrap_err();

        let reply = common::handler::resolve(&err);
        assert_eq!(reply.status.as_u16(), 400);
        assert_eq!(reply.body.result.result_code, 400);
        assert_eq!(reply.body.result.result_description, "email already exists");
    }

    #[test]
    fn test_other_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&DbErr::Custom("connection reset".to_string())));
    }

    #[tokio::test]
    async fn test_unregister_unknown_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        let err = store.unregister(EntityId(3)).await.unwrap_err();
        let api = err.as_api_error().unwrap();
        assert_eq!(api.error_code().error_code(), 1404);
    }

    #[tokio::test]
    async fn test_list_maps_all_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                model(1, STATUS_REGISTERED),
                model(2, STATUS_REGISTERED),
            ]])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        let users = store.list().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].id, EntityId(2));
    }

    #[tokio::test]
    async fn test_database_error_is_unclassified() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([sea_orm::DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
