//! # Split Escrow Contract
//!
//! A single Soroban contract, `SplitEscrow`, that holds a client's deposits in
//! custody and splits them between registered contributors by percentage:
//!
//! | Phase        | Entry Point(s)                                   |
//! |--------------|--------------------------------------------------|
//! | Bootstrap    | [`SplitEscrow::setup`]                           |
//! | Registration | [`SplitEscrow::register_contributor`], [`SplitEscrow::lock`] |
//! | Funding      | [`SplitEscrow::fund`]                            |
//! | Payout       | [`SplitEscrow::complete_and_payout`]             |
//! | Queries      | `status`, `contributor_count`, `get_project`, `get_contributors`, `preview_payouts`, `custody_balance` |
//!
//! ## Architecture
//!
//! Guard clauses and arithmetic live in [`escrow`]. Storage access is fully
//! delegated to [`storage`]. This file contains **only** the public entry
//! points: it authenticates the caller, loads state, runs the transition,
//! moves tokens, persists and emits events.
//!
//! Any `Err` returned from an entry point aborts the invocation and the host
//! rolls back every write and transfer made during it.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env, Vec};

mod escrow;
pub mod events;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_payout;

pub use escrow::{MIN_FUNDING, TOTAL_SHARES};
pub use types::{Contributor, Deposit, Payout, PayoutPlan, Project, ProjectStatus};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Unauthorized = 1,
    DuplicateSetup = 2,
    AlreadyLocked = 3,
    NotLocked = 4,
    AlreadyCompleted = 5,
    NotFunded = 6,
    InvalidShare = 7,
    EmptyContributorSet = 8,
    SharesDoNotSumTo100 = 9,
    WrongDestination = 10,
    BelowMinimum = 11,
    Overflow = 12,
}

/// Broad failure classes for [`Error`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorCategory {
    /// Wrong caller for a gated entry point.
    Authorization,
    /// Entry point invoked in the wrong lifecycle state.
    StateSequencing,
    /// Arguments or contributor set rejected.
    ValidationFailure,
    /// Checked arithmetic failed.
    Arithmetic,
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Unauthorized => ErrorCategory::Authorization,
            Error::DuplicateSetup
            | Error::AlreadyLocked
            | Error::NotLocked
            | Error::AlreadyCompleted
            | Error::NotFunded => ErrorCategory::StateSequencing,
            Error::InvalidShare
            | Error::EmptyContributorSet
            | Error::SharesDoNotSumTo100
            | Error::WrongDestination
            | Error::BelowMinimum => ErrorCategory::ValidationFailure,
            Error::Overflow => ErrorCategory::Arithmetic,
        }
    }
}

#[contract]
pub struct SplitEscrow;

#[contractimpl]
impl SplitEscrow {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Record the manager, the client and the custody token.
    ///
    /// Can succeed exactly once; later calls fail with
    /// `Error::DuplicateSetup` whatever their arguments.
    ///
    /// - `manager` must sign the transaction, so a third-party deployer
    ///   cannot set up a project on behalf of a manager who has not signed.
    pub fn setup(env: Env, manager: Address, client: Address, token: Address) -> Result<(), Error> {
        manager.require_auth();
        escrow::setup(storage::load_config(&env).as_ref())?;

        let config = types::ProjectConfig {
            manager: manager.clone(),
            client: client.clone(),
            token: token.clone(),
        };
        storage::save_config(&env, &config);
        storage::save_state(&env, &types::ProjectState::default());

        events::emit_project_setup(&env, manager, client, token);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────

    /// Append a contributor with `share_percentage` percent of the payout.
    ///
    /// `caller` must be the manager and the list must still be open.
    /// The same address may be registered more than once; each entry is paid
    /// independently. Returns the contributor's index.
    pub fn register_contributor(
        env: Env,
        caller: Address,
        address: Address,
        share_percentage: u32,
    ) -> Result<u32, Error> {
        caller.require_auth();
        let config = storage::load_config(&env).ok_or(Error::Unauthorized)?;
        let state = storage::load_state(&env);
        let mut contributors = storage::load_contributors(&env);

        let index = escrow::register_contributor(
            &config,
            &state,
            &mut contributors,
            &caller,
            address.clone(),
            share_percentage,
        )?;
        storage::save_contributors(&env, &contributors);

        events::emit_contributor_added(&env, index, address, share_percentage);
        Ok(index)
    }

    /// Freeze the contributor list. Shares must sum to exactly 100.
    pub fn lock(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        let config = storage::load_config(&env).ok_or(Error::Unauthorized)?;
        let mut state = storage::load_state(&env);
        let contributors = storage::load_contributors(&env);

        escrow::lock(&config, &mut state, &contributors, &caller)?;
        storage::save_state(&env, &state);

        events::emit_contributors_locked(&env, caller, contributors.len());
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Deposit funds into escrow.
    ///
    /// `caller` must be the client, `deposit.destination` must be this
    /// contract and `deposit.amount` at least [`MIN_FUNDING`]. The amount is
    /// pulled from the client in the custody token and added to the pool.
    pub fn fund(env: Env, caller: Address, deposit: Deposit) -> Result<(), Error> {
        caller.require_auth();
        let config = storage::load_config(&env).ok_or(Error::Unauthorized)?;
        let mut state = storage::load_state(&env);
        let custody = env.current_contract_address();

        escrow::fund(&config, &mut state, &caller, &deposit, &custody)?;

        let token_client = token::Client::new(&env, &config.token);
        token_client.transfer(&caller, &custody, &deposit.amount);

        storage::save_state(&env, &state);

        events::emit_project_funded(&env, caller, deposit.amount, state.total_funded);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Payout
    // ─────────────────────────────────────────────────────────

    /// Complete the project and pay every unpaid contributor
    /// `floor(total_funded * share / 100)`, in registration order.
    ///
    /// `caller` must be the manager or the client. The rounding remainder
    /// stays in the contract. If any transfer fails the whole call reverts
    /// and nobody is marked paid.
    pub fn complete_and_payout(env: Env, caller: Address) -> Result<PayoutPlan, Error> {
        caller.require_auth();
        let config = storage::load_config(&env).ok_or(Error::Unauthorized)?;
        let mut state = storage::load_state(&env);
        let mut contributors = storage::load_contributors(&env);

        let plan = escrow::complete(&env, &config, &mut state, &mut contributors, &caller)?;

        let token_client = token::Client::new(&env, &config.token);
        let custody = env.current_contract_address();
        for payout in plan.payouts.iter() {
            if payout.amount > 0 {
                token_client.transfer(&custody, &payout.address, &payout.amount);
            }
            events::emit_contributor_paid(&env, payout.index, payout.address, payout.amount);
        }

        storage::save_contributors(&env, &contributors);
        storage::save_state(&env, &state);

        events::emit_project_completed(
            &env,
            caller,
            state.total_funded,
            plan.total_paid,
            plan.dust,
        );
        Ok(plan)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn status(env: Env) -> ProjectStatus {
        escrow::status(&storage::load_state(&env))
    }

    pub fn contributor_count(env: Env) -> u32 {
        storage::load_contributors(&env).len()
    }

    /// Full project view, or `None` before setup.
    pub fn get_project(env: Env) -> Option<Project> {
        storage::load_project(&env)
    }

    pub fn get_contributors(env: Env) -> Vec<Contributor> {
        storage::load_contributors(&env)
    }

    /// The split `complete_and_payout` would perform right now.
    pub fn preview_payouts(env: Env) -> Result<PayoutPlan, Error> {
        let state = storage::load_state(&env);
        if state.is_completed {
            return Err(Error::AlreadyCompleted);
        }
        let contributors = storage::load_contributors(&env);
        escrow::plan_payouts(&env, state.total_funded, &contributors)
    }

    /// Tokens currently held by the contract. After completion this is the
    /// undistributed dust.
    pub fn custody_balance(env: Env) -> i128 {
        match storage::load_config(&env) {
            Some(config) => {
                token::Client::new(&env, &config.token).balance(&env.current_contract_address())
            }
            None => 0,
        }
    }
}
