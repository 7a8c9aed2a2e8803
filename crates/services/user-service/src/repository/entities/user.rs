//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{EntityId, User, UserStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    /// `REGISTERED` or `UNREGISTERED`
    pub status: String,
    pub address: String,
    pub registered_at: DateTimeUtc,
    pub unregistered_at: Option<DateTimeUtc>,
    pub last_login_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: EntityId(model.id),
            name: model.name,
            email: model.email,
            password: model.password,
            status: UserStatus::from(model.status.as_str()),
            address: model.address,
            registered_at: model.registered_at,
            unregistered_at: model.unregistered_at,
            last_login_at: model.last_login_at,
        }
    }
}
