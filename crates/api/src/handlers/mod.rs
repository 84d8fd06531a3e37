pub mod admin_resources;
pub mod marketplace;
pub mod resources;
