//! # Escrow state machine
//!
//! One transition function per entry point. Each takes the loaded state by
//! reference, validates its guard clauses in a fixed order and either mutates
//! the in-memory state or returns a typed [`Error`]. Nothing here touches
//! storage, tokens or events; `lib.rs` persists the result only when the
//! transition succeeds, and the host discards everything on failure.

use soroban_sdk::{Address, Env, Vec};

use crate::types::{Contributor, Deposit, Payout, PayoutPlan, ProjectConfig, ProjectState, ProjectStatus};
use crate::Error;

/// Smallest accepted deposit, in the custody token's base units.
pub const MIN_FUNDING: i128 = 1_000_000;

/// Shares must sum to exactly this many percent before locking.
pub const TOTAL_SHARES: u32 = 100;

fn require_manager(config: &ProjectConfig, caller: &Address) -> Result<(), Error> {
    if *caller != config.manager {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// Reject a second setup. `existing` is the stored config, if any.
pub fn setup(existing: Option<&ProjectConfig>) -> Result<(), Error> {
    if existing.is_some() {
        return Err(Error::DuplicateSetup);
    }
    Ok(())
}

/// Append a contributor and return its index.
pub fn register_contributor(
    config: &ProjectConfig,
    state: &ProjectState,
    contributors: &mut Vec<Contributor>,
    caller: &Address,
    address: Address,
    share_percentage: u32,
) -> Result<u32, Error> {
    require_manager(config, caller)?;
    if state.is_locked {
        return Err(Error::AlreadyLocked);
    }
    if share_percentage == 0 || share_percentage > TOTAL_SHARES {
        return Err(Error::InvalidShare);
    }

    let index = contributors.len();
    contributors.push_back(Contributor {
        address,
        share_percentage,
        paid: false,
    });
    Ok(index)
}

/// Freeze the contributor list once shares sum to exactly 100.
pub fn lock(
    config: &ProjectConfig,
    state: &mut ProjectState,
    contributors: &Vec<Contributor>,
    caller: &Address,
) -> Result<(), Error> {
    require_manager(config, caller)?;
    if state.is_locked {
        return Err(Error::AlreadyLocked);
    }
    if contributors.is_empty() {
        return Err(Error::EmptyContributorSet);
    }

    let mut total = 0u32;
    for c in contributors.iter() {
        total = total
            .checked_add(c.share_percentage)
            .ok_or(Error::Overflow)?;
    }
    if total != TOTAL_SHARES {
        return Err(Error::SharesDoNotSumTo100);
    }

    state.is_locked = true;
    Ok(())
}

/// Accept a client deposit into the pool.
///
/// `custody` is the escrow contract's own address.
pub fn fund(
    config: &ProjectConfig,
    state: &mut ProjectState,
    caller: &Address,
    deposit: &Deposit,
    custody: &Address,
) -> Result<(), Error> {
    if *caller != config.client {
        return Err(Error::Unauthorized);
    }
    if !state.is_locked {
        return Err(Error::NotLocked);
    }
    if state.is_completed {
        return Err(Error::AlreadyCompleted);
    }
    if deposit.destination != *custody {
        return Err(Error::WrongDestination);
    }
    if deposit.amount < MIN_FUNDING {
        return Err(Error::BelowMinimum);
    }

    state.total_funded = state
        .total_funded
        .checked_add(deposit.amount)
        .ok_or(Error::Overflow)?;
    Ok(())
}

/// `floor(total * share / 100)`, multiplying first.
pub fn share_of(total: i128, share_percentage: u32) -> Result<i128, Error> {
    let product = total
        .checked_mul(i128::from(share_percentage))
        .ok_or(Error::Overflow)?;
    Ok(product / i128::from(TOTAL_SHARES))
}

/// Compute the payout for every unpaid contributor, in registration order.
pub fn plan_payouts(
    env: &Env,
    total: i128,
    contributors: &Vec<Contributor>,
) -> Result<PayoutPlan, Error> {
    let mut payouts = Vec::new(env);
    let mut total_paid = 0i128;

    for index in 0..contributors.len() {
        let c = contributors.get_unchecked(index);
        if c.paid {
            continue;
        }
        let amount = share_of(total, c.share_percentage)?;
        total_paid = total_paid.checked_add(amount).ok_or(Error::Overflow)?;
        payouts.push_back(Payout {
            index,
            address: c.address,
            amount,
        });
    }

    Ok(PayoutPlan {
        payouts,
        total_paid,
        dust: total - total_paid,
    })
}

/// Mark every unpaid contributor paid, complete the project and return the
/// transfers the caller must issue.
pub fn complete(
    env: &Env,
    config: &ProjectConfig,
    state: &mut ProjectState,
    contributors: &mut Vec<Contributor>,
    caller: &Address,
) -> Result<PayoutPlan, Error> {
    if *caller != config.manager && *caller != config.client {
        return Err(Error::Unauthorized);
    }
    if state.total_funded <= 0 {
        return Err(Error::NotFunded);
    }
    if state.is_completed {
        return Err(Error::AlreadyCompleted);
    }

    let plan = plan_payouts(env, state.total_funded, contributors)?;
    for payout in plan.payouts.iter() {
        let mut c = contributors.get_unchecked(payout.index);
        c.paid = true;
        contributors.set(payout.index, c);
    }

    state.is_completed = true;
    Ok(plan)
}

pub fn status(state: &ProjectState) -> ProjectStatus {
    if !state.is_locked {
        ProjectStatus::Configuring
    } else if state.total_funded == 0 {
        ProjectStatus::AwaitingFunds
    } else if !state.is_completed {
        ProjectStatus::AwaitingCompletion
    } else {
        ProjectStatus::Completed
    }
}
