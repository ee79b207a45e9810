//! Background worker
//!
//! Runs the I/O behind each `Task` on the tokio runtime and reports the
//! outcome as an `Action`. Requests are never cancelled; the app discards
//! results whose load id is stale.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::action::{Action, GridSource, Task};
use crate::api::CatalogClient;
use crate::debounce::Debouncer;

pub struct Worker {
    client: Arc<CatalogClient>,
    tx: UnboundedSender<Action>,
    debouncer: Debouncer,
}

impl Worker {
    pub fn new(
        client: CatalogClient,
        tx: UnboundedSender<Action>,
        debounce: std::time::Duration,
    ) -> Self {
        Self {
            client: Arc::new(client),
            tx,
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Start a task; results arrive later on the action channel
    pub fn run(&mut self, task: Task) {
        tracing::debug!(?task, "running task");
        match task {
            Task::LoadCategory {
                action,
                page,
                load_id,
            } => {
                let client = Arc::clone(&self.client);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let items = client.category(&action, page).await;
                    let _ = tx.send(Action::ItemsLoaded {
                        source: GridSource::Category(action),
                        items,
                        load_id,
                    });
                });
            }
            Task::Search { query, load_id } => {
                let client = Arc::clone(&self.client);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let items = client.search(&query).await;
                    let _ = tx.send(Action::ItemsLoaded {
                        source: GridSource::Search(query),
                        items,
                        load_id,
                    });
                });
            }
            Task::LoadDetail {
                detail_path,
                load_id,
            } => {
                let client = Arc::clone(&self.client);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = client.detail(&detail_path).await.map_err(|e| {
                        tracing::warn!(error = %e, %detail_path, "detail fetch failed");
                        e.to_string()
                    });
                    let _ = tx.send(Action::DetailLoaded { result, load_id });
                });
            }
            Task::DebounceSearch(text) => {
                self.debouncer
                    .schedule(self.tx.clone(), Action::SearchSettled(text));
            }
            Task::OpenExternal(url) => {
                let tx = self.tx.clone();
                tokio::task::spawn_blocking(move || {
                    if let Err(e) = open::that(&url) {
                        tracing::warn!(error = %e, %url, "could not open url");
                        let _ = tx.send(Action::Error(format!("Could not open {}", url)));
                    }
                });
            }
        }
    }
}
