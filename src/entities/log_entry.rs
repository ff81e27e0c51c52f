use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Row of the `logs` table written by the event logger.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// RFC3339 timestamp
    pub logged_at: String,
    pub os_user: String,
    pub request_id: Option<String>,
    pub file: String,
    pub line: i32,
    pub function: String,
    pub message: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
