use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Geographic location keyed by a caller-supplied code (usually a postal code).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "localities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub locality_name: String,
    pub province_name: String,
    pub country_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::seller::Entity")]
    Sellers,
    #[sea_orm(has_many = "super::carry::Entity")]
    Carries,
}

impl Related<super::seller::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sellers.def()
    }
}

impl Related<super::carry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Carries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
