//! Resource (feature flag) categories.
//!
//! Categories are fixed domain tags stored as text in `system_resources.category`.

use serde::{Deserialize, Serialize};

/// Domain tag a resource belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    Shop,
    Wallet,
    Social,
    Games,
    Auction,
    Inventory,
    Payment,
    Notification,
    Api,
    Admin,
    Other,
}

impl ResourceCategory {
    /// Return the category name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shop => "shop",
            Self::Wallet => "wallet",
            Self::Social => "social",
            Self::Games => "games",
            Self::Auction => "auction",
            Self::Inventory => "inventory",
            Self::Payment => "payment",
            Self::Notification => "notification",
            Self::Api => "api",
            Self::Admin => "admin",
            Self::Other => "other",
        }
    }

    /// Parse a category string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "shop" => Some(Self::Shop),
            "wallet" => Some(Self::Wallet),
            "social" => Some(Self::Social),
            "games" => Some(Self::Games),
            "auction" => Some(Self::Auction),
            "inventory" => Some(Self::Inventory),
            "payment" => Some(Self::Payment),
            "notification" => Some(Self::Notification),
            "api" => Some(Self::Api),
            "admin" => Some(Self::Admin),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// All valid category values.
    pub const ALL: &'static [&'static str] = &[
        "shop",
        "wallet",
        "social",
        "games",
        "auction",
        "inventory",
        "payment",
        "notification",
        "api",
        "admin",
        "other",
    ];
}

impl std::fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
