//! Marketplace character sale model.

use portal_core::sale_status::SaleStatus;
use portal_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `character_sales` table.
///
/// `char_id` references a character in the game server database, which this
/// system does not own.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharacterSale {
    pub id: DbId,
    pub char_id: i64,
    pub char_name: String,
    pub char_level: i32,
    pub seller_id: DbId,
    pub seller_name: String,
    pub price: Decimal,
    pub status: String,
    pub listed_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CharacterSale {
    pub fn status(&self) -> Option<SaleStatus> {
        SaleStatus::from_str(&self.status)
    }
}
