use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lot of a product stored in a section.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_batches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub batch_number: i32,
    pub current_quantity: i32,
    pub current_temperature: i32,
    pub due_date: Date,
    pub initial_quantity: i32,
    pub manufacturing_date: Date,
    /// Hour of the day (0-23) the batch left the line
    pub manufacturing_hour: i32,
    pub minimum_temperature: i32,
    pub product_id: i32,
    pub section_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::section::Entity",
        from = "Column::SectionId",
        to = "super::section::Column::Id"
    )]
    Section,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
