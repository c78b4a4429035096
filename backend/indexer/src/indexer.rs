//! Long-running background task that polls the Soroban RPC and writes
//! decoded escrow events to the database.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::db;
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Where the next poll starts: a ledger, or an opaque pagination cursor
/// that takes precedence over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub ledger: u32,
    pub cursor: Option<String>,
}

impl Position {
    /// Resume from the persisted cursor row, falling back to `start_ledger`
    /// on a fresh database.
    pub fn resume(saved_ledger: i64, saved_cursor: Option<String>, start_ledger: u32) -> Self {
        let ledger = if saved_ledger > 0 {
            u32::try_from(saved_ledger).unwrap_or(u32::MAX)
        } else {
            start_ledger
        };
        Self {
            ledger,
            cursor: saved_cursor,
        }
    }

    /// Advance after a successful page.
    ///
    /// The ledger never moves backwards. A returned cursor is kept so the next
    /// call paginates from exactly where this one stopped.
    pub fn advance(&self, latest_ledger: Option<u64>, next_cursor: Option<String>) -> Self {
        let ledger = latest_ledger
            .map(|l| u32::try_from(l).unwrap_or(u32::MAX).max(self.ledger))
            .unwrap_or(self.ledger);
        Self {
            ledger,
            cursor: next_cursor,
        }
    }
}

/// Spawn the indexer loop as a background [`tokio`] task.
pub async fn run(state: Arc<IndexerState>) {
    info!("Indexer starting — contract: {}", state.config.contract_id);

    let saved_ledger = db::get_last_ledger(&state.pool).await.unwrap_or(0);
    let saved_cursor = db::get_cursor_string(&state.pool).await.unwrap_or(None);
    let mut position = Position::resume(saved_ledger, saved_cursor, state.config.start_ledger);

    info!("Resuming from ledger {}", position.ledger);

    loop {
        match poll_once(&state.pool, &state.client, &state.config, &position).await {
            Ok(next) => position = next,
            Err(e) => error!("Indexer poll error: {e}"),
        }

        tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)).await;
    }
}

/// Perform a single poll iteration and return the position to resume from.
async fn poll_once(
    pool: &SqlitePool,
    client: &Client,
    config: &Config,
    position: &Position,
) -> crate::errors::Result<Position> {
    let (raw_events, next_cursor, latest_ledger) = rpc::fetch_events(
        client,
        &config.rpc_url,
        &config.contract_id,
        position.ledger,
        position.cursor.as_deref(),
        config.events_per_page,
    )
    .await?;

    if raw_events.is_empty() {
        debug!("No new events since ledger {}", position.ledger);
    } else {
        let decoded = rpc::decode_events(&raw_events, &config.contract_id);
        let inserted = db::insert_events(pool, &decoded).await?;
        info!(
            "Polled {} raw events → {} new records stored",
            raw_events.len(),
            inserted
        );
    }

    let next = position.advance(latest_ledger, next_cursor);

    // Persist cursor so restarts are deterministic.
    db::save_cursor(pool, i64::from(next.ledger), next.cursor.as_deref()).await?;

    Ok(next)
}
