//! # Events
//!
//! Every successful transition publishes exactly one event (completion
//! publishes one `paid` event per transfer plus a final `completed`). The
//! leading topic is a short symbol the off-chain indexer keys on; `contrib`
//! and `paid` carry the contributor index as a second topic.
//!
//! | Topic       | Data                   |
//! |-------------|------------------------|
//! | `setup`     | [`ProjectSetup`]       |
//! | `contrib`   | [`ContributorAdded`]   |
//! | `locked`    | [`ContributorsLocked`] |
//! | `funded`    | [`ProjectFunded`]      |
//! | `paid`      | [`ContributorPaid`]    |
//! | `completed` | [`ProjectCompleted`]   |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectSetup {
    pub manager: Address,
    pub client: Address,
    pub token: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributorAdded {
    pub index: u32,
    pub address: Address,
    pub share_percentage: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributorsLocked {
    pub manager: Address,
    pub contributor_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectFunded {
    pub client: Address,
    pub amount: i128,
    /// Running total after this deposit.
    pub total_funded: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributorPaid {
    pub index: u32,
    pub address: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCompleted {
    pub caller: Address,
    pub total_funded: i128,
    pub total_paid: i128,
    pub dust: i128,
}

pub fn emit_project_setup(env: &Env, manager: Address, client: Address, token: Address) {
    env.events().publish(
        (symbol_short!("setup"),),
        ProjectSetup {
            manager,
            client,
            token,
        },
    );
}

pub fn emit_contributor_added(env: &Env, index: u32, address: Address, share_percentage: u32) {
    env.events().publish(
        (symbol_short!("contrib"), index),
        ContributorAdded {
            index,
            address,
            share_percentage,
        },
    );
}

pub fn emit_contributors_locked(env: &Env, manager: Address, contributor_count: u32) {
    env.events().publish(
        (symbol_short!("locked"),),
        ContributorsLocked {
            manager,
            contributor_count,
        },
    );
}

pub fn emit_project_funded(env: &Env, client: Address, amount: i128, total_funded: i128) {
    env.events().publish(
        (symbol_short!("funded"),),
        ProjectFunded {
            client,
            amount,
            total_funded,
        },
    );
}

pub fn emit_contributor_paid(env: &Env, index: u32, address: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("paid"), index),
        ContributorPaid {
            index,
            address,
            amount,
        },
    );
}

pub fn emit_project_completed(
    env: &Env,
    caller: Address,
    total_funded: i128,
    total_paid: i128,
    dust: i128,
) {
    env.events().publish(
        (symbol_short!("completed"),),
        ProjectCompleted {
            caller,
            total_funded,
            total_paid,
            dust,
        },
    );
}
