//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the escrow:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key       | Type            | Description                         |
//! |-----------|-----------------|-------------------------------------|
//! | `Config`  | `ProjectConfig` | Manager, client, custody token      |
//! | `State`   | `ProjectState`  | Funding accumulator and flags       |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key            | Type               | Description                    |
//! |----------------|--------------------|--------------------------------|
//! | `Contributors` | `Vec<Contributor>` | Payees in registration order   |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! An absent `State` or `Contributors` entry reads back as its zero value, so a
//! freshly deployed contract needs no explicit initialisation write.

use soroban_sdk::{contracttype, Env, Vec};

use crate::types::{Contributor, Project, ProjectConfig, ProjectState};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Immutable parties and custody token (Instance).
    Config,
    /// Mutable flags and funding total (Instance).
    State,
    /// Ordered contributor list (Persistent).
    Contributors,
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Returns `None` until setup has succeeded.
pub fn load_config(env: &Env) -> Option<ProjectConfig> {
    let config = env.storage().instance().get(&DataKey::Config);
    if config.is_some() {
        bump_instance(env);
    }
    config
}

pub fn save_config(env: &Env, config: &ProjectConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

/// Load the mutable state, or the zero state if nothing was written yet.
pub fn load_state(env: &Env) -> ProjectState {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .unwrap_or_default()
}

pub fn save_state(env: &Env, state: &ProjectState) {
    env.storage().instance().set(&DataKey::State, state);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Load the contributor list, or an empty list if none were registered.
pub fn load_contributors(env: &Env) -> Vec<Contributor> {
    let key = DataKey::Contributors;
    match env.storage().persistent().get(&key) {
        Some(contributors) => {
            bump_persistent(env, &key);
            contributors
        }
        None => Vec::new(env),
    }
}

pub fn save_contributors(env: &Env, contributors: &Vec<Contributor>) {
    let key = DataKey::Contributors;
    env.storage().persistent().set(&key, contributors);
    bump_persistent(env, &key);
}

/// Load the full `Project` by combining config, state and contributors.
/// Returns `None` before setup.
pub fn load_project(env: &Env) -> Option<Project> {
    let config = load_config(env)?;
    let state = load_state(env);
    Some(Project {
        manager: config.manager,
        client: config.client,
        token: config.token,
        total_funded: state.total_funded,
        is_locked: state.is_locked,
        is_completed: state.is_completed,
        contributors: load_contributors(env),
    })
}
