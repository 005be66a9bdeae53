//! User-facing alerts
//!
//! Components catch errors at their boundary and hand the message to the
//! `AlertService`. A front end renders the current alerts and dismisses
//! them; every alert is also written to the log. The channel keeps at most
//! [`MAX_ALERTS`] alerts and drops the oldest when a new one arrives.

use crate::tasks::lock;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

/// Default number of alerts the channel keeps
pub const MAX_ALERTS: usize = 50;

// ============================================================================
// Alert
// ============================================================================

/// Alert severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl AlertLevel {
    /// Get the display name for this level
    pub fn display_name(&self) -> &'static str {
        match self {
            AlertLevel::Success => "success",
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Error => "error",
        }
    }
}

/// One message on the alert channel
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: Uuid,
    pub level: AlertLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// AlertService
// ============================================================================

/// Shared alert channel
#[derive(Debug, Clone)]
pub struct AlertService {
    alerts: Arc<Mutex<VecDeque<Alert>>>,
    capacity: usize,
}

impl Default for AlertService {
    fn default() -> Self {
        Self::with_capacity(MAX_ALERTS)
    }
}

impl AlertService {
    /// Create an empty channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty channel keeping at most `capacity` alerts (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            alerts: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Push an alert and return its id
    pub fn add(&self, level: AlertLevel, message: impl Into<String>) -> Uuid {
        let message = message.into();
        match level {
            AlertLevel::Error | AlertLevel::Warning => {
                warn!("[{}] {}", level.display_name(), message)
            }
            AlertLevel::Success | AlertLevel::Info => {
                info!("[{}] {}", level.display_name(), message)
            }
        }
        let alert = Alert {
            id: Uuid::new_v4(),
            level,
            message,
            timestamp: Utc::now(),
        };
        let id = alert.id;
        let mut alerts = lock(&self.alerts);
        while alerts.len() >= self.capacity {
            alerts.pop_front();
        }
        alerts.push_back(alert);
        id
    }

    /// Push an error alert
    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.add(AlertLevel::Error, message)
    }

    /// Push a warning alert
    pub fn warning(&self, message: impl Into<String>) -> Uuid {
        self.add(AlertLevel::Warning, message)
    }

    /// Push an info alert
    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.add(AlertLevel::Info, message)
    }

    /// Push a success alert
    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.add(AlertLevel::Success, message)
    }

    /// Snapshot of the current alerts, oldest first
    pub fn alerts(&self) -> Vec<Alert> {
        lock(&self.alerts).iter().cloned().collect()
    }

    /// Messages of the current error alerts
    pub fn errors(&self) -> Vec<String> {
        lock(&self.alerts)
            .iter()
            .filter(|a| a.level == AlertLevel::Error)
            .map(|a| a.message.clone())
            .collect()
    }

    /// Remove one alert; returns false if it was not present
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut alerts = lock(&self.alerts);
        let before = alerts.len();
        alerts.retain(|a| a.id != id);
        alerts.len() != before
    }

    /// Remove every alert
    pub fn clear(&self) {
        lock(&self.alerts).clear();
    }

    /// Check if the channel is empty
    pub fn is_empty(&self) -> bool {
        lock(&self.alerts).is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
