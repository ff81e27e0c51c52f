use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub order_number: String,
    pub order_date: Date,
    pub tracking_code: String,
    pub buyer_id: i32,
    pub product_record_id: i32,
    pub order_status_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::buyer::Entity",
        from = "Column::BuyerId",
        to = "super::buyer::Column::Id"
    )]
    Buyer,
    #[sea_orm(
        belongs_to = "super::product_record::Entity",
        from = "Column::ProductRecordId",
        to = "super::product_record::Column::Id"
    )]
    ProductRecord,
    #[sea_orm(
        belongs_to = "super::order_status::Entity",
        from = "Column::OrderStatusId",
        to = "super::order_status::Column::Id"
    )]
    OrderStatus,
}

impl Related<super::buyer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Buyer.def()
    }
}

impl Related<super::product_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
