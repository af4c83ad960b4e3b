use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::RiskLevel;

/// Sea-ORM Entity for the risk_zones table.
///
/// Join target for the high-risk report; rows are seeded by migration and
/// have no CRUD surface.
pub mod risk_zone {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "risk_zones")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub city: String,
        pub risk_level: RiskLevel,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Sea-ORM Entity for the users table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub username: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub role_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // Join metadata only; city carries no foreign key
    #[sea_orm(
        belongs_to = "risk_zone::Entity",
        from = "Column::City",
        to = "risk_zone::Column::City"
    )]
    RiskZone,
}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain User
impl From<Model> for crate::models::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            phone: model.phone,
            email: model.email,
            city: model.city,
            role_id: model.role_id,
        }
    }
}

// Conversion from Sea-ORM Model to the summary projection
impl From<Model> for crate::models::UserSummary {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            city: model.city,
            role_id: model.role_id,
        }
    }
}

// Conversion from Sea-ORM Model to a report row
impl From<Model> for crate::models::HighRiskUser {
    fn from(model: Model) -> Self {
        Self {
            username: model.username,
            phone: model.phone,
            email: model.email,
            city: model.city,
        }
    }
}

// Conversion from domain CreateUser to Sea-ORM ActiveModel
impl From<crate::models::CreateUser> for ActiveModel {
    fn from(input: crate::models::CreateUser) -> Self {
        ActiveModel {
            id: NotSet,
            username: Set(input.username),
            phone: Set(input.phone),
            email: Set(input.email),
            city: Set(input.city),
            role_id: Set(input.role_id),
        }
    }
}
