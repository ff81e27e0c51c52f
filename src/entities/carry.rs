use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Storage bound of `carries.cid`; enforced by the domain before any insert.
pub const CID_MAX_LEN: usize = 10;

/// Carrier serving a locality.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "carries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub cid: String,
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
}

impl Related<super::locality::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Locality.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
