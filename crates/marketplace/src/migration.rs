//! Reconciliation of open sales against the master-account custody model.
//!
//! A run goes through three phases:
//!
//! 1. **Classify** every active sale as [`Custody::Reconciled`] (character is
//!    in the master account), [`Custody::Legacy`] (still owned by someone
//!    else) or [`Custody::Missing`] (character no longer exists).
//! 2. **Report** the classification.
//! 3. **Act** on legacy and missing sales, unless this is a dry run and only
//!    after the operator confirms (or `force` is set).
//!
//! Each sale is acted on independently. A failure is recorded in that sale's
//! [`SaleOutcome`] and the batch moves on. Sale records and the game database
//! are never updated in one transaction; if the process dies between the two,
//! re-running classification shows the sale again.

use std::io::{BufRead, Write};

use portal_core::types::DbId;
use portal_db::models::character_sale::CharacterSale;

use crate::ledger::{LedgerError, SaleLedger};
use crate::report;
use crate::store::{GameStore, StoreError};

/// The exact answer the operator must type to proceed.
pub const CONFIRMATION_LITERAL: &str = "YES";

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Game database unavailable: {0}")]
    StoreUnavailable(StoreError),

    #[error("Game database error while classifying sale #{sale_id}: {source}")]
    Classification { sale_id: DbId, source: StoreError },

    #[error("Could not load sales: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What to do with sales whose character is still in the seller's account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionMode {
    /// Cancel the sale; the character stays where it is.
    Cancel,
    /// Move the character into the master account and keep the sale listed.
    MoveToMaster,
}

#[derive(Debug, Clone, Copy)]
pub struct MigrationOptions {
    pub dry_run: bool,
    pub force: bool,
    pub mode: ActionMode,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Custody {
    Reconciled,
    Legacy { current_account: String },
    Missing,
}

/// A sale still held by its original owner.
#[derive(Debug, Clone)]
pub struct LegacySale {
    pub sale: CharacterSale,
    pub current_account: String,
}

#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub reconciled: Vec<CharacterSale>,
    pub legacy: Vec<LegacySale>,
    pub missing: Vec<CharacterSale>,
}

impl Classification {
    pub fn total(&self) -> usize {
        self.reconciled.len() + self.legacy.len() + self.missing.len()
    }

    /// Whether any sale needs repairing.
    pub fn needs_action(&self) -> bool {
        !self.legacy.is_empty() || !self.missing.is_empty()
    }

    fn push(&mut self, sale: CharacterSale, custody: Custody) {
        match custody {
            Custody::Reconciled => self.reconciled.push(sale),
            Custody::Legacy { current_account } => self.legacy.push(LegacySale {
                sale,
                current_account,
            }),
            Custody::Missing => self.missing.push(sale),
        }
    }
}

/// Determine the custody model of one sale's character.
pub async fn classify_sale(
    store: &dyn GameStore,
    master_account: &str,
    sale: &CharacterSale,
) -> Result<Custody, StoreError> {
    let Some(character) = store.find_character(sale.char_id).await? else {
        return Ok(Custody::Missing);
    };

    if store.verify_ownership(sale.char_id, master_account).await? {
        Ok(Custody::Reconciled)
    } else {
        Ok(Custody::Legacy {
            current_account: character.account_name,
        })
    }
}

/// Classify every sale. Read-only; safe to repeat.
///
/// A store error aborts classification rather than being read as a missing
/// character, since a missing character leads to cancellation.
pub async fn classify(
    store: &dyn GameStore,
    master_account: &str,
    sales: Vec<CharacterSale>,
) -> Result<Classification, MigrationError> {
    let mut classification = Classification::default();
    for sale in sales {
        let custody = classify_sale(store, master_account, &sale)
            .await
            .map_err(|source| MigrationError::Classification {
                sale_id: sale.id,
                source,
            })?;
        tracing::debug!(sale_id = sale.id, char_id = sale.char_id, ?custody, "Sale classified");
        classification.push(sale, custody);
    }
    Ok(classification)
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Why a sale is being cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    CharacterMissing,
    LegacyCustody,
}

/// The mutation planned for a single sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleAction {
    Cancel(CancelReason),
    MoveToMaster,
}

#[derive(Debug, Clone)]
pub struct PlannedAction {
    pub sale_id: DbId,
    pub char_id: i64,
    pub char_name: String,
    pub action: SaleAction,
}

/// Result of acting on a single sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Cancelled,
    Moved,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct SaleOutcome {
    pub sale_id: DbId,
    pub char_name: String,
    pub action: SaleAction,
    pub outcome: Outcome,
}

/// Build the action list: missing sales first, then legacy sales.
///
/// Missing characters can only be cancelled. Legacy sales follow `mode`.
pub fn plan(classification: &Classification, mode: ActionMode) -> Vec<PlannedAction> {
    let missing = classification.missing.iter().map(|sale| PlannedAction {
        sale_id: sale.id,
        char_id: sale.char_id,
        char_name: sale.char_name.clone(),
        action: SaleAction::Cancel(CancelReason::CharacterMissing),
    });

    let legacy_action = match mode {
        ActionMode::Cancel => SaleAction::Cancel(CancelReason::LegacyCustody),
        ActionMode::MoveToMaster => SaleAction::MoveToMaster,
    };
    let legacy = classification.legacy.iter().map(|l| PlannedAction {
        sale_id: l.sale.id,
        char_id: l.sale.char_id,
        char_name: l.sale.char_name.clone(),
        action: legacy_action,
    });

    missing.chain(legacy).collect()
}

/// Carry out one planned action. Never returns an error; failures become
/// [`Outcome::Failed`].
pub async fn execute(
    ledger: &dyn SaleLedger,
    store: &dyn GameStore,
    master_account: &str,
    planned: &PlannedAction,
) -> Outcome {
    let result = match planned.action {
        SaleAction::Cancel(_) => ledger
            .cancel(planned.sale_id)
            .await
            .map(|()| Outcome::Cancelled)
            .map_err(|e| e.to_string()),
        SaleAction::MoveToMaster => match store
            .transfer_ownership(planned.char_id, master_account)
            .await
        {
            Ok(true) => Ok(Outcome::Moved),
            Ok(false) => Err("character transfer failed".to_string()),
            Err(e) => Err(e.to_string()),
        },
    };

    result.unwrap_or_else(|reason| {
        tracing::error!(sale_id = planned.sale_id, error = %reason, "Sale action failed");
        Outcome::Failed(reason)
    })
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Aggregate of a finished action phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub cancelled: usize,
    pub moved: usize,
    pub failures: Vec<(DbId, String)>,
}

impl MigrationReport {
    pub fn from_outcomes(outcomes: &[SaleOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut report, o| {
            match &o.outcome {
                Outcome::Cancelled => report.cancelled += 1,
                Outcome::Moved => report.moved += 1,
                Outcome::Failed(reason) => report.failures.push((o.sale_id, reason.clone())),
            }
            report
        })
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

// ---------------------------------------------------------------------------
// Confirmation
// ---------------------------------------------------------------------------

/// Operator confirmation before mutations begin.
pub trait Confirmation {
    fn confirm(&mut self, summary: &str) -> std::io::Result<bool>;
}

/// Line-based prompt requiring [`CONFIRMATION_LITERAL`] exactly.
pub struct PromptConfirmation<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirmation<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirmation for PromptConfirmation<R, W> {
    fn confirm(&mut self, summary: &str) -> std::io::Result<bool> {
        writeln!(self.output, "{summary}")?;
        write!(self.output, "\nType '{CONFIRMATION_LITERAL}' to confirm: ")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim_end_matches(['\r', '\n']) == CONFIRMATION_LITERAL)
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// How a run ended.
#[derive(Debug)]
pub enum MigrationRun {
    NoActiveSales,
    /// Every active sale is already in the master account.
    AlreadyReconciled { reconciled: usize },
    DryRun(Classification),
    /// The operator declined the confirmation.
    Aborted,
    Completed {
        outcomes: Vec<SaleOutcome>,
        report: MigrationReport,
    },
}

/// Drives a full classify / report / act run.
pub struct CustodyMigration<'a> {
    ledger: &'a dyn SaleLedger,
    store: &'a dyn GameStore,
    master_account: &'a str,
}

impl<'a> CustodyMigration<'a> {
    pub fn new(ledger: &'a dyn SaleLedger, store: &'a dyn GameStore, master_account: &'a str) -> Self {
        Self {
            ledger,
            store,
            master_account,
        }
    }

    pub async fn run(
        &self,
        options: MigrationOptions,
        confirmation: &mut dyn Confirmation,
        out: &mut dyn Write,
    ) -> Result<MigrationRun, MigrationError> {
        writeln!(out, "{}", report::banner("MARKETPLACE CUSTODY MIGRATION"))?;

        self.store
            .ping()
            .await
            .map_err(MigrationError::StoreUnavailable)?;

        let sales = self.ledger.list_active().await?;
        if sales.is_empty() {
            writeln!(out, "No active marketplace sales.")?;
            return Ok(MigrationRun::NoActiveSales);
        }
        writeln!(out, "Found {} active sales.", sales.len())?;
        tracing::info!(active = sales.len(), master = self.master_account, "Classifying sales");

        let classification = classify(self.store, self.master_account, sales).await?;
        write!(out, "{}", report::render_analysis(&classification))?;

        if !classification.needs_action() {
            writeln!(out, "\nAll sales already use the master account. Nothing to do.")?;
            return Ok(MigrationRun::AlreadyReconciled {
                reconciled: classification.reconciled.len(),
            });
        }

        write!(out, "{}", report::render_details(&classification))?;

        if options.dry_run {
            write!(out, "{}", report::render_dry_run_notice())?;
            return Ok(MigrationRun::DryRun(classification));
        }

        if !options.force {
            let summary = report::render_confirmation_summary(&classification, options.mode);
            if !confirmation.confirm(&summary)? {
                writeln!(out, "\nOperation cancelled by user.")?;
                tracing::info!("Custody migration declined at confirmation");
                return Ok(MigrationRun::Aborted);
            }
        }

        writeln!(out, "{}", report::banner("PROCESSING"))?;
        let actions = plan(&classification, options.mode);
        let mut outcomes = Vec::with_capacity(actions.len());
        for planned in &actions {
            let outcome = execute(self.ledger, self.store, self.master_account, planned).await;
            writeln!(out, "{}", report::render_outcome_line(planned, &outcome))?;
            outcomes.push(SaleOutcome {
                sale_id: planned.sale_id,
                char_name: planned.char_name.clone(),
                action: planned.action,
                outcome,
            });
        }

        let migration_report = MigrationReport::from_outcomes(&outcomes);
        write!(out, "{}", report::render_final(&migration_report, options.mode))?;
        tracing::info!(
            cancelled = migration_report.cancelled,
            moved = migration_report.moved,
            failed = migration_report.failed(),
            "Custody migration finished"
        );

        Ok(MigrationRun::Completed {
            outcomes,
            report: migration_report,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn outcome(sale_id: DbId, outcome: Outcome) -> SaleOutcome {
        SaleOutcome {
            sale_id,
            char_name: format!("char{sale_id}"),
            action: SaleAction::Cancel(CancelReason::LegacyCustody),
            outcome,
        }
    }

    #[test]
    fn report_folds_outcomes() {
        let outcomes = vec![
            outcome(1, Outcome::Cancelled),
            outcome(2, Outcome::Moved),
            outcome(3, Outcome::Failed("boom".into())),
            outcome(4, Outcome::Cancelled),
        ];
        let report = MigrationReport::from_outcomes(&outcomes);
        assert_eq!(report.cancelled, 2);
        assert_eq!(report.moved, 1);
        assert_eq!(report.failures, vec![(3, "boom".to_string())]);
    }

    #[test]
    fn empty_outcomes_give_empty_report() {
        assert_eq!(MigrationReport::from_outcomes(&[]), MigrationReport::default());
    }

    #[test]
    fn prompt_accepts_exact_literal() {
        let mut output = Vec::new();
        let mut prompt = PromptConfirmation::new(Cursor::new("YES\n"), &mut output);
        assert!(prompt.confirm("summary").unwrap());
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("summary"));
        assert!(printed.contains("Type 'YES' to confirm"));
    }

    #[test]
    fn prompt_accepts_crlf_line_ending() {
        let mut prompt = PromptConfirmation::new(Cursor::new("YES\r\n"), Vec::new());
        assert!(prompt.confirm("summary").unwrap());
    }

    #[test]
    fn prompt_rejects_anything_else() {
        for answer in ["yes\n", "Y\n", " YES\n", "YES \n", "YESS\n", "\n", ""] {
            let mut prompt = PromptConfirmation::new(Cursor::new(answer), Vec::new());
            assert!(!prompt.confirm("summary").unwrap(), "accepted {answer:?}");
        }
    }
}
