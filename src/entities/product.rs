use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i32,

    pub description: String,

    /// Days of shelf life lost per day outside the cold chain
    pub expiration_rate: f64,

    /// Degrees per hour reached while freezing
    pub freezing_rate: f64,

    /// Dimensions in centimetres
    pub height: f64,
    pub length: f64,
    pub width: f64,

    /// Net weight in kilograms
    pub net_weight: f64,

    /// Business identifier, unique across the catalogue
    #[sea_orm(unique)]
    pub product_code: String,

    pub recommended_freezing_temperature: f64,

    pub product_type_id: i32,

    /// Owning seller, when known
    pub seller_id: Option<i32>,
}

/// Product entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product_type::Entity",
        from = "Column::ProductTypeId",
        to = "super::product_type::Column::Id"
    )]
    ProductType,
    #[sea_orm(
        belongs_to = "super::seller::Entity",
        from = "Column::SellerId",
        to = "super::seller::Column::Id"
    )]
    Seller,
    #[sea_orm(has_many = "super::product_record::Entity")]
    ProductRecords,
    #[sea_orm(has_many = "super::product_batch::Entity")]
    ProductBatches,
}

impl Related<super::seller::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seller.def()
    }
}

impl Related<super::product_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductRecords.def()
    }
}

impl Related<super::product_batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductBatches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
