//! User-facing notices raised by the query layer.

use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: Uuid,
    pub kind: AlertKind,
    pub message: String,
}

/// Shared, ordered list of active alerts.
#[derive(Clone, Default)]
pub struct AlertQueue {
    inner: Arc<Mutex<Vec<Alert>>>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an alert and return its id.
    pub fn push(&self, kind: AlertKind, message: impl Into<String>) -> Uuid {
        let alert = Alert {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
        };
        let id = alert.id;
        tracing::debug!(alert_id = %id, kind = ?kind, message = %alert.message, "Alert raised");
        self.inner.lock().push(alert);
        id
    }

    /// Remove an alert. Returns false if it was already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut alerts = self.inner.lock();
        let before = alerts.len();
        alerts.retain(|a| a.id != id);
        alerts.len() != before
    }

    pub fn list(&self) -> Vec<Alert> {
        self.inner.lock().clone()
    }

    /// Remove and return every alert, oldest first.
    pub fn drain(&self) -> Vec<Alert> {
        std::mem::take(&mut *self.inner.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
