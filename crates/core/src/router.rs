//! Click router: turns host input lines into click dispatches

use crate::block::BlockId;
use crate::error::RouteError;
use crate::executor::RefreshExecutor;
use crate::handle::BlockHandle;
use log::{debug, info, warn};
use rg_status_types::ClickEvent;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;

/// Split one input line into raw event objects.
///
/// The host frames its events as an endless JSON array: a lone `[`, then
/// objects each prefixed with `,` after the first. Framing tokens and blank
/// lines yield no events. A line may also carry an array of objects.
pub fn decode_line(line: &str) -> Result<Vec<Map<String, Value>>, RouteError> {
    let line = line.trim();
    if line.is_empty() || line == "[" || line == "]" {
        return Ok(Vec::new());
    }

    let payload = line.strip_prefix(',').unwrap_or(line).trim_start();
    match serde_json::from_str::<Value>(payload)? {
        Value::Object(event) => Ok(vec![event]),
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(event) => Some(event),
                other => {
                    debug!("Ignoring non-object click entry: {}", other);
                    None
                }
            })
            .collect()),
        other => Err(RouteError::Malformed(format!("unexpected value {}", other))),
    }
}

/// Routes click events to blocks by their instance id
pub struct ClickRouter {
    blocks: HashMap<BlockId, Arc<BlockHandle>>,
    executor: RefreshExecutor,
}

impl ClickRouter {
    pub fn new(blocks: &[Arc<BlockHandle>], executor: RefreshExecutor) -> Self {
        Self {
            blocks: blocks
                .iter()
                .map(|handle| (handle.id(), Arc::clone(handle)))
                .collect(),
            executor,
        }
    }

    /// Find the target of a raw event and parse its payload.
    ///
    /// `Ok(None)` means the event has no `instance` and should be ignored.
    pub fn resolve(
        &self,
        event: Map<String, Value>,
    ) -> Result<Option<(Arc<BlockHandle>, ClickEvent)>, RouteError> {
        let instance = match event.get("instance") {
            None => return Ok(None),
            Some(Value::String(instance)) => instance.clone(),
            Some(Value::Number(instance)) => instance.to_string(),
            Some(other) => {
                return Err(RouteError::Malformed(format!("instance {} is not a string", other)))
            }
        };

        // The host echoes the instance verbatim, so "042" is not block 42
        let handle = instance
            .parse::<BlockId>()
            .ok()
            .filter(|id| id.to_string() == instance)
            .and_then(|id| self.blocks.get(&id))
            .ok_or_else(|| RouteError::UnknownInstance(instance.clone()))?;

        let click = ClickEvent::from_payload(event)?;
        Ok(Some((Arc::clone(handle), click)))
    }

    /// Route every event on one input line, returning the dispatched handlers.
    ///
    /// Problems are logged and the offending event dropped.
    pub fn route_line(&self, line: &str) -> Vec<JoinHandle<bool>> {
        let events = match decode_line(line) {
            Ok(events) => events,
            Err(e) => {
                debug!("Ignoring input line {:?}: {}", line, e);
                return Vec::new();
            }
        };

        let mut dispatched = Vec::new();
        for event in events {
            match self.resolve(event) {
                Ok(Some((handle, click))) => {
                    debug!("Button {} on block {}", click.button.code(), handle.id());
                    dispatched.push(self.executor.click(handle, click));
                }
                Ok(None) => {}
                Err(e @ RouteError::UnknownInstance(_)) => warn!("Dropping click event: {}", e),
                Err(e) => debug!("Dropping click event: {}", e),
            }
        }
        dispatched
    }

    /// Read events until the input closes.
    ///
    /// Handlers are not awaited, so a slow handler never holds up reading.
    pub async fn run<R>(&self, reader: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            self.route_line(&line);
        }
        info!("Click event input closed");
        Ok(())
    }
}
