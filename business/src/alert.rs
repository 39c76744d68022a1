//! Transient alert banners.
//!
//! At most one transient alert exists at a time: presenting a new one
//! replaces it. Permanent alerts (server responses) are left alone.

use chrono::{DateTime, TimeDelta, Utc};

/// How long a transient alert stays up unless dismissed.
pub const ALERT_TIMEOUT: TimeDelta = TimeDelta::milliseconds(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Error => "⚠",
            Self::Success => "✔",
            Self::Info | Self::Warning => "ℹ",
        }
    }
}

pub type AlertId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: AlertId,
    pub message: String,
    pub severity: Severity,
    /// `None` for permanent alerts.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Alert {
    pub fn is_permanent(&self) -> bool {
        self.expires_at.is_none()
    }
}

/// Receiver of user-facing messages.
///
/// Components that validate input report through this instead of owning a
/// presenter, so tests can record what would have been shown.
pub trait AlertSink {
    fn present(&mut self, message: &str, severity: Severity);
}

#[derive(Debug)]
pub struct AlertPresenter {
    alerts: Vec<Alert>,
    next_id: AlertId,
    timeout: TimeDelta,
}

impl Default for AlertPresenter {
    fn default() -> Self {
        Self::with_timeout(ALERT_TIMEOUT)
    }
}

impl AlertPresenter {
    pub fn with_timeout(timeout: TimeDelta) -> Self {
        Self {
            alerts: Vec::new(),
            next_id: 0,
            timeout,
        }
    }

    fn next_id(&mut self) -> AlertId {
        self.next_id += 1;
        self.next_id
    }

    /// Replaces the transient alert with a new one expiring `timeout` after
    /// `now`.
    pub fn present_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: DateTime<Utc>,
    ) -> AlertId {
        self.alerts.retain(Alert::is_permanent);

        let id = self.next_id();
        let message = message.into();
        log::debug!(
            target: "leafcheck_business::alert",
            "present id={} severity={:?} message={}",
            id,
            severity,
            message
        );
        self.alerts.push(Alert {
            id,
            message,
            severity,
            expires_at: Some(now + self.timeout),
        });
        id
    }

    /// Adds an alert that only goes away when dismissed.
    pub fn pin(&mut self, message: impl Into<String>, severity: Severity) -> AlertId {
        let id = self.next_id();
        self.alerts.push(Alert {
            id,
            message: message.into(),
            severity,
            expires_at: None,
        });
        id
    }

    /// Removes an alert early. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: AlertId) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        before != self.alerts.len()
    }

    /// Expires alerts whose deadline has passed.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.alerts
            .retain(|alert| alert.expires_at.is_none_or(|deadline| deadline > now));
    }

    /// Earliest pending expiry, for scheduling the next repaint.
    pub fn next_expiry(&self) -> Option<DateTime<Utc>> {
        self.alerts.iter().filter_map(|alert| alert.expires_at).min()
    }

    /// All visible alerts, oldest first.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn transient(&self) -> Option<&Alert> {
        self.alerts.iter().find(|alert| !alert.is_permanent())
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

impl AlertSink for AlertPresenter {
    fn present(&mut self, message: &str, severity: Severity) {
        self.present_at(message, severity, Utc::now());
    }
}

impl AlertSink for Vec<(String, Severity)> {
    fn present(&mut self, message: &str, severity: Severity) {
        self.push((message.to_owned(), severity));
    }
}
