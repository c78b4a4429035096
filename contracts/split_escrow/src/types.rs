//! # Types
//!
//! Shared data structures used across all modules of the split escrow.
//!
//! ## Design decisions
//!
//! ### Config / State / Contributors split
//!
//! The singleton project is stored as three separate ledger entries:
//!
//! - [`ProjectConfig`] — written once at setup; never mutated.
//! - [`ProjectState`] — written on lock, on every deposit and on completion.
//! - `Vec<Contributor>` — appended while configuring, `paid` flags flipped on
//!   completion.
//!
//! The public API exposes the reconstructed [`Project`] struct for convenience.
//!
//! ### Status as a Finite-State Machine
//!
//! [`ProjectStatus`] is derived from the flags in [`ProjectState`], never stored:
//!
//! ```text
//! Configuring ──► AwaitingFunds ──► AwaitingCompletion ──► Completed
//! ```
//!
//! Every transition is forward-only.

use soroban_sdk::{contracttype, Address, Vec};

/// Lifecycle status of the escrow, derived from [`ProjectState`].
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProjectStatus {
    /// Contributor list still open.
    Configuring,
    /// Contributors locked; nothing deposited yet.
    AwaitingFunds,
    /// Funded; waiting for the manager or client to complete.
    AwaitingCompletion,
    /// Payout executed.
    Completed,
}

/// Immutable project parties, written once at setup.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub manager: Address,
    pub client: Address,
    /// Custody asset (Stellar Asset Contract address).
    pub token: Address,
}

/// Mutable project flags and the funding accumulator.
///
/// Zero-valued until the first write, which matches a freshly deployed
/// contract.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProjectState {
    /// Sum of all accepted deposits. Historical; never decreased by payout.
    pub total_funded: i128,
    pub is_locked: bool,
    pub is_completed: bool,
}

/// A registered payee.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contributor {
    pub address: Address,
    /// Whole percent, `1..=100`.
    pub share_percentage: u32,
    pub paid: bool,
}

/// Inbound deposit record passed to `fund`.
///
/// `destination` must be the escrow contract's own address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    pub destination: Address,
    pub amount: i128,
}

/// One outbound transfer intent produced by the payout computation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payout {
    /// Position of the contributor in registration order.
    pub index: u32,
    pub address: Address,
    pub amount: i128,
}

/// The full split for a given funded total.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayoutPlan {
    pub payouts: Vec<Payout>,
    pub total_paid: i128,
    /// Floor-division remainder left in custody.
    pub dust: i128,
}

/// Full on-chain representation of the escrow.
///
/// Used as the public API return type; reconstructed internally from the
/// split storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    pub manager: Address,
    pub client: Address,
    pub token: Address,
    pub total_funded: i128,
    pub is_locked: bool,
    pub is_completed: bool,
    /// Contributors in registration order.
    pub contributors: Vec<Contributor>,
}
