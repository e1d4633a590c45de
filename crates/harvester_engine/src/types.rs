use std::time::Duration;

use harvester_core::Outcome;
use thiserror::Error;

use crate::driver::DriverError;
use crate::persist::PersistError;

/// Session-level failures. Everything below this level is absorbed and logged.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error(transparent)]
    Driver(#[from] DriverError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("session stopped without a terminal status (phase {0})")]
    Stalled(String),
}

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestReport {
    pub outcome: Outcome,
    /// Distinct posts collected, all of them persisted.
    pub records: usize,
    pub scroll_steps: u64,
    /// Rate-limit waits applied before scroll steps, in order.
    pub backoff_waits: Vec<Duration>,
}
