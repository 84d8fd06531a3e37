//! Human-readable rendering for the custody migration.
//!
//! Every function here is pure: it takes the run's data and returns text.

use std::fmt::Write as _;

use portal_db::models::character_sale::CharacterSale;

use crate::migration::{
    ActionMode, CancelReason, Classification, MigrationReport, Outcome, PlannedAction, SaleAction,
};

const RULE_WIDTH: usize = 70;
const LISTED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// A title framed by horizontal rules.
pub fn banner(title: &str) -> String {
    format!("\n{rule}\n  {title}\n{rule}", rule = rule())
}

/// Per-class counts.
pub fn render_analysis(c: &Classification) -> String {
    let mut out = String::from("\nANALYSIS:\n");
    let _ = writeln!(out, "  - Sales already in the master account: {}", c.reconciled.len());
    let _ = writeln!(out, "  - Sales still held by the seller:      {}", c.legacy.len());
    if !c.missing.is_empty() {
        let _ = writeln!(out, "  - Characters missing from game DB:     {}", c.missing.len());
    }
    out
}

fn seller_line(sale: &CharacterSale) -> String {
    format!("  - Seller: {} (#{})", sale.seller_name, sale.seller_id)
}

/// Detail lines for legacy and missing sales.
pub fn render_details(c: &Classification) -> String {
    let mut out = String::new();

    if !c.legacy.is_empty() {
        let _ = writeln!(out, "{}", banner("SALES HELD BY THE SELLER"));
        for legacy in &c.legacy {
            let sale = &legacy.sale;
            let _ = writeln!(
                out,
                "\n  ID: {} | {} (Level {})",
                sale.id, sale.char_name, sale.char_level
            );
            let _ = writeln!(out, "{}", seller_line(sale));
            let _ = writeln!(out, "  - Price: {}", sale.price);
            let _ = writeln!(out, "  - Current game account: {}", legacy.current_account);
            let _ = writeln!(out, "  - Listed at: {}", sale.listed_at.format(LISTED_AT_FORMAT));
        }
    }

    if !c.missing.is_empty() {
        let _ = writeln!(out, "{}", banner("CHARACTERS NOT FOUND"));
        for sale in &c.missing {
            let _ = writeln!(
                out,
                "\n  ID: {} | {} (char_id: {})",
                sale.id, sale.char_name, sale.char_id
            );
            let _ = writeln!(out, "{}", seller_line(sale));
            let _ = writeln!(out, "  - Listed at: {}", sale.listed_at.format(LISTED_AT_FORMAT));
            let _ = writeln!(out, "  - This character no longer exists in the game database");
        }
    }

    out
}

pub fn render_dry_run_notice() -> String {
    format!(
        "{}\n  No changes were made. Run again without --dry-run to apply them.\n{}\n",
        banner("DRY RUN"),
        rule()
    )
}

/// What the operator is about to confirm.
pub fn render_confirmation_summary(c: &Classification, mode: ActionMode) -> String {
    let mut out = banner("CONFIRMATION REQUIRED");
    match mode {
        ActionMode::MoveToMaster => {
            let _ = write!(
                out,
                "\n\nYou are about to MOVE {} characters into the master account \
                 and keep their sales listed.",
                c.legacy.len()
            );
            if !c.missing.is_empty() {
                let _ = write!(
                    out,
                    "\n{} sales whose character no longer exists will be cancelled.",
                    c.missing.len()
                );
            }
        }
        ActionMode::Cancel => {
            let _ = write!(
                out,
                "\n\nYou are about to CANCEL {} sales.\n\
                 Characters stay in their current accounts.",
                c.legacy.len() + c.missing.len()
            );
        }
    }
    out
}

/// One progress line per processed sale.
pub fn render_outcome_line(planned: &PlannedAction, outcome: &Outcome) -> String {
    match (outcome, planned.action) {
        (Outcome::Cancelled, SaleAction::Cancel(CancelReason::CharacterMissing)) => format!(
            "[ok] Sale #{} ({}) cancelled: character no longer exists",
            planned.sale_id, planned.char_name
        ),
        (Outcome::Cancelled, _) => format!(
            "[ok] Sale #{} ({}) cancelled",
            planned.sale_id, planned.char_name
        ),
        (Outcome::Moved, _) => format!(
            "[ok] Sale #{} ({}) moved to the master account",
            planned.sale_id, planned.char_name
        ),
        (Outcome::Failed(reason), _) => format!(
            "[error] Sale #{} ({}): {reason}",
            planned.sale_id, planned.char_name
        ),
    }
}

pub fn render_final(report: &MigrationReport, mode: ActionMode) -> String {
    let mut out = banner("FINAL REPORT");
    out.push('\n');
    if mode == ActionMode::MoveToMaster {
        let _ = writeln!(out, "Characters moved to master account: {}", report.moved);
    }
    let _ = writeln!(out, "Sales cancelled: {}", report.cancelled);
    if report.failed() > 0 {
        let _ = writeln!(out, "Errors: {}", report.failed());
        for (sale_id, reason) in &report.failures {
            let _ = writeln!(out, "  - sale #{sale_id}: {reason}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planned(action: SaleAction) -> PlannedAction {
        PlannedAction {
            sale_id: 1001,
            char_id: 55,
            char_name: "Aria".into(),
            action,
        }
    }

    #[test]
    fn banner_is_framed() {
        let b = banner("TITLE");
        assert!(b.contains("  TITLE"));
        assert_eq!(b.matches(&"=".repeat(RULE_WIDTH)).count(), 2);
    }

    #[test]
    fn analysis_omits_missing_line_when_none() {
        let text = render_analysis(&Classification::default());
        assert!(text.contains("master account: 0"));
        assert!(!text.contains("missing"));
    }

    #[test]
    fn outcome_lines_name_the_sale() {
        let missing = render_outcome_line(
            &planned(SaleAction::Cancel(CancelReason::CharacterMissing)),
            &Outcome::Cancelled,
        );
        assert!(missing.contains("#1001"));
        assert!(missing.contains("no longer exists"));

        let failed = render_outcome_line(
            &planned(SaleAction::MoveToMaster),
            &Outcome::Failed("character transfer failed".into()),
        );
        assert!(failed.starts_with("[error] Sale #1001 (Aria)"));
        assert!(failed.ends_with("character transfer failed"));
    }

    #[test]
    fn final_report_lists_failures() {
        let report = MigrationReport {
            cancelled: 2,
            moved: 0,
            failures: vec![(7, "Sale #7 is no longer active".into())],
        };
        let text = render_final(&report, ActionMode::Cancel);
        assert!(text.contains("Sales cancelled: 2"));
        assert!(text.contains("Errors: 1"));
        assert!(text.contains("sale #7"));
        assert!(!text.contains("moved"));
    }

    #[test]
    fn move_mode_summary_mentions_move() {
        let text = render_confirmation_summary(&Classification::default(), ActionMode::MoveToMaster);
        assert!(text.contains("MOVE 0 characters"));
    }
}
