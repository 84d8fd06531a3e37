//! Static routing and hierarchy tables consulted by the resource gate.
//!
//! A [`GateConfig`] is built once at process start (either from the built-in
//! tables or from a JSON file) and shared read-only afterwards. It answers two
//! questions without touching storage:
//!
//! - which resource gates a request path (exact match, else longest prefix)
//! - which parent module a resource hangs under
//!
//! The built-in tables describe the portal's page paths (`/app/shop/`,
//! `/social/` and so on). They only take effect on routers mounted behind
//! the gate middleware; JSON API routes are guarded per route instead.
//!
//! The hierarchy is evaluated one level deep: a child is effectively active
//! when its own flag and its direct parent's flag are both set.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::error::CoreError;

/// Immutable path/hierarchy configuration for the resource gate.
#[derive(Debug, Clone)]
pub struct GateConfig {
    exact: HashMap<String, String>,
    /// Same entries as `exact`, longest path first.
    prefixes: Vec<(String, String)>,
    hierarchy: HashMap<String, String>,
    master_modules: HashSet<String>,
}

/// On-disk shape of a gate configuration override file.
#[derive(Debug, Deserialize)]
struct GateConfigFile {
    routes: HashMap<String, String>,
    #[serde(default)]
    hierarchy: HashMap<String, String>,
    #[serde(default)]
    master_modules: Vec<String>,
}

impl GateConfig {
    pub fn new(
        routes: HashMap<String, String>,
        hierarchy: HashMap<String, String>,
        master_modules: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut prefixes: Vec<(String, String)> = routes
            .iter()
            .map(|(path, name)| (path.clone(), name.clone()))
            .collect();
        prefixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        Self {
            exact: routes,
            prefixes,
            hierarchy,
            master_modules: master_modules.into_iter().collect(),
        }
    }

    /// Parse a JSON override file:
    ///
    /// ```json
    /// {
    ///   "routes": { "/app/shop/": "shop_module" },
    ///   "hierarchy": { "shop_cart": "shop_module" },
    ///   "master_modules": ["shop_module"]
    /// }
    /// ```
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let file: GateConfigFile = serde_json::from_str(raw)
            .map_err(|e| CoreError::Validation(format!("Invalid gate config: {e}")))?;

        for (child, parent) in &file.hierarchy {
            if child == parent {
                return Err(CoreError::Validation(format!(
                    "Resource '{child}' cannot be its own parent"
                )));
            }
        }

        Ok(Self::new(file.routes, file.hierarchy, file.master_modules))
    }

    /// Resolve a request path to the resource that gates it.
    ///
    /// Exact matches win; otherwise the longest registered path that `path`
    /// starts with is used. Returns `None` for unmapped paths.
    pub fn resolve(&self, path: &str) -> Option<&str> {
        if let Some(name) = self.exact.get(path) {
            return Some(name);
        }
        self.prefixes
            .iter()
            .find(|(prefix, _)| path.starts_with(prefix.as_str()))
            .map(|(_, name)| name.as_str())
    }

    /// Direct parent module of a resource, if any.
    pub fn parent_of(&self, name: &str) -> Option<&str> {
        self.hierarchy.get(name).map(String::as_str)
    }

    pub fn is_master(&self, name: &str) -> bool {
        self.master_modules.contains(name)
    }

    pub fn master_modules(&self) -> impl Iterator<Item = &str> {
        self.master_modules.iter().map(String::as_str)
    }

    pub fn route_count(&self) -> usize {
        self.exact.len()
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        let routes = DEFAULT_ROUTES
            .iter()
            .map(|(path, name)| (path.to_string(), name.to_string()))
            .collect();
        let hierarchy = DEFAULT_HIERARCHY
            .iter()
            .map(|(child, parent)| (child.to_string(), parent.to_string()))
            .collect();
        let masters = DEFAULT_MASTER_MODULES.iter().map(|m| m.to_string());
        Self::new(routes, hierarchy, masters)
    }
}

/// Combine a resource's own flag with its parent's flag.
///
/// `parent` is `None` when the resource has no parent module.
pub fn effective_active(own: bool, parent: Option<bool>) -> bool {
    own && parent.unwrap_or(true)
}

// ---------------------------------------------------------------------------
// Built-in tables
// ---------------------------------------------------------------------------

pub const DEFAULT_ROUTES: &[(&str, &str)] = &[
    // Shop
    ("/app/shop/", "shop_module"),
    ("/app/shop/cart/", "shop_cart"),
    ("/app/shop/cart/add-item/", "shop_cart"),
    ("/app/shop/cart/add-package/", "shop_cart"),
    ("/app/shop/cart/checkout/", "shop_checkout"),
    ("/app/shop/purchases/", "shop_purchases"),
    ("/app/shop/manager/dashboard/", "shop_dashboard"),
    // Wallet
    ("/app/wallet/", "wallet_module"),
    ("/app/wallet/dashboard/", "wallet_dashboard"),
    ("/app/wallet/transfer/", "wallet_transfer"),
    ("/app/wallet/history/", "wallet_history"),
    // Social
    ("/social/", "social_module"),
    ("/social/feed/", "social_feed"),
    ("/social/profile/", "social_profile"),
    ("/social/search/", "social_search"),
    // Games
    ("/app/game/", "games_module"),
    ("/app/game/battle-pass/", "battle_pass"),
    ("/app/game/box-opening/", "box_opening"),
    ("/app/game/roulette/", "roulette"),
    // Auction
    ("/app/auction/", "auction_module"),
    ("/app/auction/list/", "auction_list"),
    ("/app/auction/create/", "auction_create"),
    // Inventory
    ("/app/inventory/", "inventory_module"),
    ("/app/inventory/dashboard/", "inventory_dashboard"),
    // Payment
    ("/app/payment/", "payment_module"),
    ("/app/payment/process/", "payment_process"),
    ("/app/payment/history/", "payment_history"),
];

pub const DEFAULT_HIERARCHY: &[(&str, &str)] = &[
    ("battle_pass", "games_module"),
    ("box_opening", "games_module"),
    ("roulette", "games_module"),
    ("shop_dashboard", "shop_module"),
    ("shop_items", "shop_module"),
    ("shop_packages", "shop_module"),
    ("shop_cart", "shop_module"),
    ("shop_checkout", "shop_module"),
    ("shop_purchases", "shop_module"),
    ("wallet_dashboard", "wallet_module"),
    ("wallet_transfer", "wallet_module"),
    ("wallet_history", "wallet_module"),
    ("social_feed", "social_module"),
    ("social_profile", "social_module"),
    ("social_search", "social_module"),
    ("auction_list", "auction_module"),
    ("auction_create", "auction_module"),
    ("inventory_dashboard", "inventory_module"),
    ("payment_process", "payment_module"),
    ("payment_history", "payment_module"),
];

pub const DEFAULT_MASTER_MODULES: &[&str] = &[
    "shop_module",
    "wallet_module",
    "social_module",
    "games_module",
    "auction_module",
    "inventory_module",
    "payment_module",
    "notification_module",
    "admin_module",
    "api_module",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn config(routes: &[(&str, &str)]) -> GateConfig {
        GateConfig::new(
            routes
                .iter()
                .map(|(p, n)| (p.to_string(), n.to_string()))
                .collect(),
            HashMap::new(),
            Vec::new(),
        )
    }

    #[test]
    fn exact_match_wins_over_prefix() {
        let cfg = GateConfig::default();
        assert_eq!(cfg.resolve("/app/shop/cart/"), Some("shop_cart"));
        assert_eq!(cfg.resolve("/app/shop/"), Some("shop_module"));
    }

    #[test]
    fn longest_prefix_is_chosen() {
        let cfg = GateConfig::default();
        assert_eq!(cfg.resolve("/app/shop/cart/remove/7/"), Some("shop_cart"));
        assert_eq!(cfg.resolve("/app/shop/item/42/"), Some("shop_module"));
        assert_eq!(cfg.resolve("/app/game/roulette/spin/"), Some("roulette"));
    }

    #[test]
    fn unmapped_path_resolves_to_none() {
        let cfg = GateConfig::default();
        assert_eq!(cfg.resolve("/pages/dashboard/"), None);
        assert_eq!(cfg.resolve("/app/sho"), None);
        assert_eq!(cfg.resolve(""), None);
    }

    #[test]
    fn prefix_order_does_not_depend_on_insertion() {
        let a = config(&[("/a/", "outer"), ("/a/b/", "inner")]);
        let b = config(&[("/a/b/", "inner"), ("/a/", "outer")]);
        assert_eq!(a.resolve("/a/b/c"), Some("inner"));
        assert_eq!(b.resolve("/a/b/c"), Some("inner"));
    }

    #[test]
    fn parent_lookup_is_single_level() {
        let cfg = GateConfig::default();
        assert_eq!(cfg.parent_of("battle_pass"), Some("games_module"));
        assert_eq!(cfg.parent_of("games_module"), None);
        assert_eq!(cfg.parent_of("unknown"), None);
    }

    #[test]
    fn effective_active_truth_table() {
        assert!(effective_active(true, None));
        assert!(!effective_active(false, None));
        assert!(effective_active(true, Some(true)));
        assert!(!effective_active(true, Some(false)));
        assert!(!effective_active(false, Some(true)));
        assert!(!effective_active(false, Some(false)));
    }

    #[test]
    fn default_masters_are_recognised() {
        let cfg = GateConfig::default();
        assert!(cfg.is_master("shop_module"));
        assert!(cfg.is_master("api_module"));
        assert!(!cfg.is_master("shop_cart"));
        assert_eq!(cfg.master_modules().count(), 10);
    }

    #[test]
    fn json_override_is_parsed() {
        let cfg = GateConfig::from_json(
            r#"{
                "routes": { "/market/": "marketplace_module" },
                "hierarchy": { "market_buy": "marketplace_module" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.resolve("/market/list/"), Some("marketplace_module"));
        assert_eq!(cfg.parent_of("market_buy"), Some("marketplace_module"));
        assert_eq!(cfg.master_modules().count(), 0);
    }

    #[test]
    fn json_override_rejects_self_parent() {
        let err = GateConfig::from_json(r#"{ "routes": {}, "hierarchy": { "a": "a" } }"#);
        assert!(matches!(err, Err(CoreError::Validation(_))));
    }

    #[test]
    fn json_override_rejects_garbage() {
        assert!(GateConfig::from_json("not json").is_err());
    }
}
