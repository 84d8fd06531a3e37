#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use portal_core::types::DbId;
use portal_db::models::character_sale::CharacterSale;
use portal_marketplace::ledger::{LedgerError, SaleLedger};
use portal_marketplace::migration::Confirmation;
use portal_marketplace::store::{GameCharacter, GameStore, StoreError};
use rust_decimal::Decimal;

pub const MASTER: &str = "MARKETPLACE_SYSTEM";

/// Build an active sale row.
pub fn sale(id: DbId, char_id: i64, char_name: &str) -> CharacterSale {
    let listed_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    CharacterSale {
        id,
        char_id,
        char_name: char_name.to_string(),
        char_level: 52,
        seller_id: 9,
        seller_name: "seller".to_string(),
        price: Decimal::new(15000, 2),
        status: "for_sale".to_string(),
        listed_at,
        updated_at: listed_at,
    }
}

// ---------------------------------------------------------------------------
// Game store
// ---------------------------------------------------------------------------

/// In-memory game database.
#[derive(Default)]
pub struct FakeGameStore {
    pub characters: Mutex<HashMap<i64, GameCharacter>>,
    /// login -> password hash
    pub accounts: Mutex<HashMap<String, String>>,
    pub transfers: Mutex<Vec<(i64, String)>>,
    pub unavailable: bool,
    pub fail_lookup_for: Option<i64>,
    pub fail_transfer_for: Option<i64>,
    pub reject_account_writes: bool,
}

impl FakeGameStore {
    pub fn with_character(self, char_id: i64, name: &str, account: &str) -> Self {
        self.characters.lock().unwrap().insert(
            char_id,
            GameCharacter {
                char_id,
                char_name: name.to_string(),
                level: 52,
                account_name: account.to_string(),
            },
        );
        self
    }

    pub fn with_account(self, login: &str, hash: &str) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(login.to_string(), hash.to_string());
        self
    }

    pub fn owner_of(&self, char_id: i64) -> Option<String> {
        self.characters
            .lock()
            .unwrap()
            .get(&char_id)
            .map(|c| c.account_name.clone())
    }

    pub fn transfer_count(&self) -> usize {
        self.transfers.lock().unwrap().len()
    }

    pub fn account_hash(&self, login: &str) -> Option<String> {
        self.accounts.lock().unwrap().get(login).cloned()
    }
}

#[async_trait]
impl GameStore for FakeGameStore {
    async fn ping(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        Ok(())
    }

    async fn find_character(&self, char_id: i64) -> Result<Option<GameCharacter>, StoreError> {
        if self.fail_lookup_for == Some(char_id) {
            return Err(StoreError::Unavailable("lookup timed out".into()));
        }
        Ok(self.characters.lock().unwrap().get(&char_id).cloned())
    }

    async fn verify_ownership(&self, char_id: i64, account: &str) -> Result<bool, StoreError> {
        Ok(self.owner_of(char_id).as_deref() == Some(account))
    }

    async fn transfer_ownership(&self, char_id: i64, account: &str) -> Result<bool, StoreError> {
        if self.fail_transfer_for == Some(char_id) {
            return Ok(false);
        }
        let mut characters = self.characters.lock().unwrap();
        let Some(character) = characters.get_mut(&char_id) else {
            return Ok(false);
        };
        character.account_name = account.to_string();
        self.transfers
            .lock()
            .unwrap()
            .push((char_id, account.to_string()));
        Ok(true)
    }

    async fn account_exists(&self, login: &str) -> Result<bool, StoreError> {
        Ok(self.accounts.lock().unwrap().contains_key(login))
    }

    async fn create_or_update_account(
        &self,
        login: &str,
        password_hash: &str,
    ) -> Result<bool, StoreError> {
        if self.reject_account_writes {
            return Ok(false);
        }
        self.accounts
            .lock()
            .unwrap()
            .insert(login.to_string(), password_hash.to_string());
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Sale ledger
// ---------------------------------------------------------------------------

/// In-memory sale table.
#[derive(Default)]
pub struct FakeLedger {
    pub sales: Mutex<Vec<CharacterSale>>,
    pub cancelled: Mutex<Vec<DbId>>,
    pub fail_cancel_for: Option<DbId>,
}

impl FakeLedger {
    pub fn with_sales(sales: Vec<CharacterSale>) -> Self {
        Self {
            sales: Mutex::new(sales),
            ..Default::default()
        }
    }

    pub fn status_of(&self, sale_id: DbId) -> Option<String> {
        self.sales
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == sale_id)
            .map(|s| s.status.clone())
    }

    pub fn cancelled_ids(&self) -> Vec<DbId> {
        self.cancelled.lock().unwrap().clone()
    }
}

#[async_trait]
impl SaleLedger for FakeLedger {
    async fn list_active(&self) -> Result<Vec<CharacterSale>, LedgerError> {
        Ok(self
            .sales
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.status().is_some_and(|st| st.is_active()))
            .cloned()
            .collect())
    }

    async fn cancel(&self, sale_id: DbId) -> Result<(), LedgerError> {
        if self.fail_cancel_for == Some(sale_id) {
            return Err(LedgerError::NotActive(sale_id));
        }
        let mut sales = self.sales.lock().unwrap();
        let sale = sales
            .iter_mut()
            .find(|s| s.id == sale_id && s.status().is_some_and(|st| st.is_active()))
            .ok_or(LedgerError::NotActive(sale_id))?;
        sale.status = "cancelled".to_string();
        self.cancelled.lock().unwrap().push(sale_id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Confirmation
// ---------------------------------------------------------------------------

/// Scripted operator answer that records whether it was asked.
pub struct ScriptedConfirmation {
    pub answer: bool,
    pub asked: usize,
}

impl ScriptedConfirmation {
    pub fn answering(answer: bool) -> Self {
        Self { answer, asked: 0 }
    }
}

impl Confirmation for ScriptedConfirmation {
    fn confirm(&mut self, _summary: &str) -> std::io::Result<bool> {
        self.asked += 1;
        Ok(self.answer)
    }
}
