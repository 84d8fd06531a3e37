//! Marketplace custody tooling.
//!
//! Characters listed for sale are supposed to sit in a dedicated master
//! account on the game server while the sale is open. This crate provides:
//!
//! - [`store::GameStore`], the narrow interface to the game server database,
//!   with a MySQL implementation in [`lineage`]
//! - [`ledger::SaleLedger`], the portal-side sale records
//! - [`migration`], which finds sales stuck in the old owner-held model or
//!   pointing at deleted characters and repairs them
//! - [`provisioning`], which creates the master account itself

pub mod config;
pub mod ledger;
pub mod lineage;
pub mod migration;
pub mod provisioning;
pub mod report;
pub mod store;
