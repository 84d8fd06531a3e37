pub mod master_account;
pub mod migrate_sales;
pub mod seed;
