//! Character sale status names.
//!
//! These must match the check constraint in `20260301000002_create_character_sales.sql`.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a marketplace character sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    ForSale,
    Pending,
    Sold,
    Cancelled,
    Completed,
}

impl SaleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForSale => "for_sale",
            Self::Pending => "pending",
            Self::Sold => "sold",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "for_sale" => Some(Self::ForSale),
            "pending" => Some(Self::Pending),
            "sold" => Some(Self::Sold),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Whether the character is still held for this sale.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::ForSale | Self::Pending)
    }

    /// Statuses that the custody migration inspects.
    pub const ACTIVE: &'static [&'static str] = &["for_sale", "pending"];
}

impl std::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
