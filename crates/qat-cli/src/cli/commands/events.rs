//! Log orchestrator notifications while a command runs.

use qat_core::sync::SyncEvent;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

/// Drain `events` into the log until every orchestrator clone is dropped.
pub fn spawn_event_log(mut events: UnboundedReceiver<SyncEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                SyncEvent::CatalogUpdated(catalog) => {
                    tracing::debug!("event: catalog updated ({} assets)", catalog.len());
                }
                SyncEvent::OperationSucceeded { operation, summary } => {
                    tracing::debug!("event: {:?} succeeded: {}", operation, summary);
                }
                SyncEvent::OperationFailed {
                    operation,
                    kind,
                    message,
                } => {
                    tracing::debug!("event: {:?} failed ({:?}): {}", operation, kind, message);
                }
            }
        }
    })
}
