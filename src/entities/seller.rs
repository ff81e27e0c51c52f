use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vendor company anchored in a locality.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sellers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub cid: i32,
    pub company_name: String,
    pub address: String,
    pub telephone: String,
    pub locality_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::locality::Entity",
        from = "Column::LocalityId",
        to = "super::locality::Column::Id"
    )]
    Locality,
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::locality::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Locality.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
