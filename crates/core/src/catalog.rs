//! Default resource catalog used by the `seed-resources` command.

use crate::resources::ResourceCategory;

/// A resource definition seeded on first install.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: ResourceCategory,
    pub icon: &'static str,
    pub sort_order: i32,
}

/// Resource name guarding the character marketplace listing.
pub const MARKETPLACE_RESOURCE: &str = "marketplace_module";

const fn entry(
    name: &'static str,
    display_name: &'static str,
    description: &'static str,
    category: ResourceCategory,
    icon: &'static str,
    sort_order: i32,
) -> CatalogEntry {
    CatalogEntry {
        name,
        display_name,
        description,
        category,
        icon,
        sort_order,
    }
}

use ResourceCategory as C;

#[rustfmt::skip]
pub const DEFAULT_CATALOG: &[CatalogEntry] = &[
    entry("shop_module", "Shop", "Complete shop with items, packages and cart", C::Shop, "fas fa-shopping-cart", 1),
    entry("shop_dashboard", "Shop Dashboard", "Shop management panel", C::Shop, "fas fa-tachometer-alt", 2),
    entry("shop_items", "Shop Items", "Management of individual items", C::Shop, "fas fa-box", 3),
    entry("shop_packages", "Shop Packages", "Management of item packages", C::Shop, "fas fa-gift", 4),
    entry("shop_cart", "Shopping Cart", "Shopping cart", C::Shop, "fas fa-shopping-basket", 5),
    entry("shop_checkout", "Checkout", "Checkout and payment flow", C::Shop, "fas fa-credit-card", 6),
    entry("shop_purchases", "Purchase History", "Purchase history view", C::Shop, "fas fa-history", 7),
    entry("wallet_module", "Wallet", "Digital wallet", C::Wallet, "fas fa-wallet", 1),
    entry("wallet_dashboard", "Wallet Dashboard", "Digital wallet panel", C::Wallet, "fas fa-chart-line", 2),
    entry("wallet_transfer", "Transfers", "Transfers between users", C::Wallet, "fas fa-exchange-alt", 3),
    entry("wallet_history", "Wallet History", "Wallet transaction history", C::Wallet, "fas fa-list-alt", 4),
    entry("social_module", "Social Network", "Complete social network", C::Social, "fas fa-users", 1),
    entry("social_feed", "Social Feed", "Social network post timeline", C::Social, "fas fa-stream", 2),
    entry("social_profile", "Social Profiles", "User profiles on the social network", C::Social, "fas fa-user-circle", 3),
    entry("social_search", "Social Search", "Social network search", C::Social, "fas fa-search", 4),
    entry("games_module", "Games", "Games and entertainment", C::Games, "fas fa-gamepad", 1),
    entry("battle_pass", "Battle Pass", "Battle pass system", C::Games, "fas fa-trophy", 2),
    entry("box_opening", "Box Opening", "Loot box opening", C::Games, "fas fa-box-open", 3),
    entry("roulette", "Roulette", "Prize roulette", C::Games, "fas fa-dice", 4),
    entry("auction_module", "Auctions", "Complete auction house", C::Auction, "fas fa-gavel", 1),
    entry("auction_list", "Auction List", "Active auction listing", C::Auction, "fas fa-list", 2),
    entry("auction_create", "Create Auction", "Creation of new auctions", C::Auction, "fas fa-plus-circle", 3),
    entry("inventory_module", "Inventory", "Inventory management", C::Inventory, "fas fa-archive", 1),
    entry("inventory_dashboard", "Inventory Dashboard", "Character inventory panel", C::Inventory, "fas fa-tachometer-alt", 2),
    entry("payment_module", "Payments", "Payment processing", C::Payment, "fas fa-credit-card", 1),
    entry("payment_process", "Payment Processing", "Payment transaction processing", C::Payment, "fas fa-cash-register", 2),
    entry("payment_history", "Payment History", "Payment transaction history", C::Payment, "fas fa-receipt", 3),
    entry("notification_module", "Notifications", "Push and floating notifications", C::Notification, "fas fa-bell", 1),
    entry("api_module", "API", "REST API", C::Api, "fas fa-code", 1),
    entry("admin_module", "Administration", "Panel administration", C::Admin, "fas fa-cogs", 1),
    entry(MARKETPLACE_RESOURCE, "Character Marketplace", "Player-to-player character sales", C::Other, "fas fa-store", 1),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::gate::{DEFAULT_HIERARCHY, DEFAULT_MASTER_MODULES, DEFAULT_ROUTES};

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = DEFAULT_CATALOG.iter().map(|e| e.name).collect();
        assert_eq!(names.len(), DEFAULT_CATALOG.len());
    }

    #[test]
    fn every_routed_resource_is_seeded() {
        let names: HashSet<_> = DEFAULT_CATALOG.iter().map(|e| e.name).collect();
        for (path, name) in DEFAULT_ROUTES {
            assert!(names.contains(name), "{path} routes to unseeded '{name}'");
        }
    }

    #[test]
    fn every_hierarchy_entry_is_seeded() {
        let names: HashSet<_> = DEFAULT_CATALOG.iter().map(|e| e.name).collect();
        for (child, parent) in DEFAULT_HIERARCHY {
            assert!(names.contains(child), "child '{child}' not seeded");
            assert!(names.contains(parent), "parent '{parent}' not seeded");
        }
    }

    #[test]
    fn every_master_module_is_seeded() {
        let names: HashSet<_> = DEFAULT_CATALOG.iter().map(|e| e.name).collect();
        for master in DEFAULT_MASTER_MODULES {
            assert!(names.contains(master), "master '{master}' not seeded");
        }
    }
}
