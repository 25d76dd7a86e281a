//! # Toasts
//!
//! Transient toast notifications for the workspace.
//!
//! ## Philosophy
//!
//! - **Structured, not stdout**: Notifications are typed values, not print statements
//! - **Deterministic**: Time is supplied by the caller; expiry is a pure
//!   function of `created_at_ms + duration_ms`
//! - **Testable**: Active toasts can be inspected
//!
//! ## Example
//!
//! ```
//! use services_notification::ToastQueue;
//!
//! let mut toasts = ToastQueue::new();
//! toasts.error("Failed to load /secret");
//! assert_eq!(toasts.active().len(), 1);
//!
//! toasts.expire(1_000);
//! assert!(toasts.active().is_empty());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;

/// How long a toast stays up unless told otherwise
pub const DEFAULT_DURATION_MS: u64 = 1_000;

/// Upper bound on toasts kept at once
const MAX_TOASTS: usize = 32;

/// Identifier of a toast, increasing from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToastId(u64);

impl ToastId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast:{}", self.0)
    }
}

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    #[default]
    Info,
    Error,
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastLevel::Info => write!(f, "INFO"),
            ToastLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A transient notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub level: ToastLevel,
    pub created_at_ms: u64,
    pub duration_ms: u64,
}

impl Toast {
    /// Checks if this toast has expired at `now_ms`
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.created_at_ms.saturating_add(self.duration_ms)
    }
}

/// Active toasts, oldest first
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    next_id: u64,
    /// Logical time used as `created_at_ms` for new toasts
    current_time_ms: u64,
}

impl ToastQueue {
    /// Empty queue with the clock at 0
    pub fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
            next_id: 1,
            current_time_ms: 0,
        }
    }

    /// Sets the logical time and drops expired toasts
    pub fn set_time(&mut self, now_ms: u64) {
        self.current_time_ms = now_ms;
        self.expire(now_ms);
    }

    /// Shows a toast with an explicit level and duration
    pub fn show_with(
        &mut self,
        message: impl Into<String>,
        level: ToastLevel,
        duration_ms: u64,
    ) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;

        let toast = Toast {
            id,
            message: message.into(),
            level,
            created_at_ms: self.current_time_ms,
            duration_ms,
        };
        debug!(id = %id, level = %level, message = %toast.message, "toast shown");
        self.toasts.push_back(toast);

        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
        id
    }

    /// Shows an info toast for the default duration
    pub fn show(&mut self, message: impl Into<String>) -> ToastId {
        self.show_with(message, ToastLevel::Info, DEFAULT_DURATION_MS)
    }

    /// Shows an error toast for the default duration
    pub fn error(&mut self, message: impl Into<String>) -> ToastId {
        self.show_with(message, ToastLevel::Error, DEFAULT_DURATION_MS)
    }

    /// Removes a toast; returns whether it was present
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Drops every toast expired at `now_ms`
    pub fn expire(&mut self, now_ms: u64) {
        self.toasts.retain(|t| !t.is_expired(now_ms));
    }

    /// Returns the toasts currently shown, oldest first
    pub fn active(&self) -> Vec<&Toast> {
        self.toasts.iter().collect()
    }

    /// Returns the newest toast
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}
