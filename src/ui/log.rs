//! Status line shown in the bottom bar.

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiLogLevel {
    Info,
    Warning,
    Error,
}

impl UiLogLevel {
    pub fn color(&self) -> Color32 {
        match self {
            UiLogLevel::Info => Color32::LIGHT_GRAY,
            UiLogLevel::Warning => Color32::YELLOW,
            UiLogLevel::Error => Color32::RED,
        }
    }
}

/// Mirrors a message to the `log` facade and keeps the latest one on screen
/// until it expires.
#[derive(Debug, Clone)]
pub struct UiLogger {
    message: Option<(String, UiLogLevel)>,
    shown_at: Option<Instant>,
    timeout: Duration,
}

impl Default for UiLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl UiLogger {
    pub fn new() -> Self {
        Self {
            message: None,
            shown_at: None,
            timeout: Duration::from_secs(LOG_TIMEOUT as u64),
        }
    }

    fn show(&mut self, msg: String, level: UiLogLevel, timeout: Option<u64>) {
        self.message = Some((msg, level));
        self.shown_at = Some(Instant::now());
        self.timeout = Duration::from_secs(timeout.unwrap_or(LOG_TIMEOUT as u64));
    }

    pub fn info(&mut self, msg: impl Into<String>, timeout: Option<u64>) {
        let msg = msg.into();
        log::info!("{}", msg);
        self.show(msg, UiLogLevel::Info, timeout);
    }

    pub fn warn(&mut self, msg: impl Into<String>, timeout: Option<u64>) {
        let msg = msg.into();
        log::warn!("{}", msg);
        self.show(msg, UiLogLevel::Warning, timeout);
    }

    pub fn error(&mut self, msg: impl Into<String>, timeout: Option<u64>) {
        let msg = msg.into();
        log::error!("{}", msg);
        self.show(msg, UiLogLevel::Error, timeout);
    }

    pub fn message(&self) -> Option<(&str, UiLogLevel)> {
        self.message.as_ref().map(|(msg, level)| (msg.as_str(), *level))
    }

    /// Drop the message once its timeout has passed; call once per frame.
    pub fn clear_expired(&mut self) {
        if self.shown_at.is_some_and(|t| t.elapsed() >= self.timeout) {
            self.message = None;
            self.shown_at = None;
        }
    }
}
