//! Rows returned by the aggregate reports. Each row describes one parent with
//! the number of children attached to it; parents without children report 0.

use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct SellersPerLocality {
    pub locality_id: String,
    pub locality_name: String,
    pub sellers_count: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct CarriesPerLocality {
    pub locality_id: String,
    pub locality_name: String,
    pub carries_count: i64,
}

/// `products_count` is the stock held in the section: the sum of
/// `current_quantity` over its batches.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct ProductsPerSection {
    pub section_id: i32,
    pub section_number: i32,
    pub products_count: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct RecordsPerProduct {
    pub product_id: i32,
    pub description: String,
    pub records_count: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct PurchaseOrdersPerBuyer {
    pub id: i32,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub purchase_orders_count: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct InboundOrdersPerEmployee {
    pub id: i32,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub warehouse_id: i32,
    pub inbound_orders_count: i64,
}
