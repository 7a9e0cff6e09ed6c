//! Completion handle for a batch of background prepares.

use crate::prelude::*;

/// Opens once every prepare in its batch has finished, successfully or not.
/// Dropping a gate does not stop the prepares behind it.
#[derive(Debug, Default)]
pub struct PrefetchGate {
    task: Option<JoinHandle<()>>,
}

impl PrefetchGate {
    /// A gate with nothing to wait for.
    pub fn open() -> Self {
        Self::default()
    }

    pub(crate) fn spawned(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    /// Non-blocking check, suitable for calling once per frame.
    pub fn is_open(&self) -> bool {
        self.task.as_ref().is_none_or(|task| task.is_finished())
    }

    /// Suspend until the batch has finished.
    pub async fn wait(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                debug!("Prefetch task ended abnormally: {}", e);
            }
        }
    }
}
