//! Error types for the bar engine

use crate::block::BlockId;
use std::time::Duration;

/// Conditions that stop the bar
#[derive(Debug, thiserror::Error)]
pub enum BarError {
    #[error("no blocks configured")]
    NoBlocks,

    #[error("block {id} has an invalid refresh interval ({interval:?})")]
    InvalidInterval { id: BlockId, interval: Duration },

    #[error("more than one block uses id {0}")]
    DuplicateId(BlockId),

    #[error("failed to write to the status bar host: {0}")]
    Output(#[from] std::io::Error),
}

/// Click events that could not be delivered. Never fatal.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("malformed click event: {0}")]
    Malformed(String),

    #[error("no block with instance {0:?}")]
    UnknownInstance(String),
}

impl From<serde_json::Error> for RouteError {
    fn from(e: serde_json::Error) -> Self {
        RouteError::Malformed(e.to_string())
    }
}
