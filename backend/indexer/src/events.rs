//! Canonical event types emitted by the split escrow contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/split_escrow/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the escrow contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Manager, client and custody token recorded (`setup` topic).
    ProjectSetup,
    /// A contributor was registered (`contrib` topic).
    ContributorAdded,
    /// The contributor list was frozen (`locked` topic).
    ContributorsLocked,
    /// The client deposited funds (`funded` topic).
    ProjectFunded,
    /// One contributor received their payout (`paid` topic).
    ContributorPaid,
    /// Payout finished (`completed` topic).
    ProjectCompleted,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "setup" => Self::ProjectSetup,
            "contrib" => Self::ContributorAdded,
            "locked" => Self::ContributorsLocked,
            "funded" => Self::ProjectFunded,
            "paid" => Self::ContributorPaid,
            "completed" => Self::ProjectCompleted,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectSetup => "project_setup",
            Self::ContributorAdded => "contributor_added",
            Self::ContributorsLocked => "contributors_locked",
            Self::ProjectFunded => "project_funded",
            Self::ContributorPaid => "contributor_paid",
            Self::ProjectCompleted => "project_completed",
            Self::Unknown => "unknown",
        }
    }

    /// Inverse of [`EventKind::as_str`], used to validate API path segments.
    pub fn from_db_str(s: &str) -> Option<Self> {
        [
            Self::ProjectSetup,
            Self::ContributorAdded,
            Self::ContributorsLocked,
            Self::ProjectFunded,
            Self::ContributorPaid,
            Self::ProjectCompleted,
            Self::Unknown,
        ]
        .into_iter()
        .find(|k| k.as_str() == s)
    }
}

/// A fully decoded escrow event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscrowEvent {
    /// RPC-assigned event id; unique per event and used for idempotent inserts.
    pub event_id: String,
    pub event_type: String,
    pub contributor_index: Option<i64>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub contributor_index: Option<i64>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}

/// Escrow totals reconstructed from indexed events.
///
/// Amounts are decimal strings because contract amounts are `i128`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowSummary {
    pub contributors: usize,
    pub deposits: usize,
    pub total_funded: String,
    pub total_paid: String,
    pub dust: String,
    pub is_locked: bool,
    pub is_completed: bool,
}

impl EscrowSummary {
    /// Fold a ledger-ordered list of records into a summary.
    ///
    /// Amounts that fail to parse are skipped.
    pub fn from_records(records: &[EventRecord]) -> Self {
        let mut contributors = 0usize;
        let mut deposits = 0usize;
        let mut funded: i128 = 0;
        let mut paid: i128 = 0;
        let mut is_locked = false;
        let mut is_completed = false;

        for r in records {
            let amount = r
                .amount
                .as_deref()
                .and_then(|a| a.parse::<i128>().ok())
                .unwrap_or(0);
            match EventKind::from_db_str(&r.event_type) {
                Some(EventKind::ContributorAdded) => contributors += 1,
                Some(EventKind::ContributorsLocked) => is_locked = true,
                Some(EventKind::ProjectFunded) => {
                    deposits += 1;
                    funded = funded.saturating_add(amount);
                }
                Some(EventKind::ContributorPaid) => paid = paid.saturating_add(amount),
                Some(EventKind::ProjectCompleted) => is_completed = true,
                _ => {}
            }
        }

        let dust = if is_completed { funded - paid } else { 0 };
        Self {
            contributors,
            deposits,
            total_funded: funded.to_string(),
            total_paid: paid.to_string(),
            dust: dust.to_string(),
            is_locked,
            is_completed,
        }
    }
}
