use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Base debounce interval. Inbound uses it as-is, outbound doubles it.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
/// How long the overlay stays up in auto-hide mode.
pub const DEFAULT_AUTO_HIDE_MS: u64 = 2200;
/// Display timeout handed to the notification system.
pub const DEFAULT_NOTIFICATION_TIMEOUT_MS: u64 = 2500;

/// How an inbound prompt changes the overlay flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityMode {
    /// Every debounced prompt flips the flag with no timeout (default).
    /// An even number of fires leaves the overlay hidden.
    Toggle,
    /// Every debounced prompt forces the flag on, then hides it after
    /// the given duration. A new prompt restarts the countdown.
    AutoHide(Duration),
}

/// Runtime configuration for the take-shot coordinator.
///
/// Values come from env vars when loaded with [`TakeShotConfig::load`].
/// The .env file is loaded by the binary at startup via dotenvy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakeShotConfig {
    /// Base debounce interval (`T_in`); the outbound gate waits twice this.
    pub debounce: Duration,
    /// Toggle or auto-hide behavior for the overlay flag.
    pub visibility: VisibilityMode,
    /// Emit the `prompted_to_take_shot` acknowledgment when an inbound prompt fires.
    pub echo_acknowledgment: bool,
    /// Timeout passed along with each transient notification.
    pub notification_timeout: Duration,
}

impl Default for TakeShotConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            visibility: VisibilityMode::Toggle,
            echo_acknowledgment: true,
            notification_timeout: Duration::from_millis(DEFAULT_NOTIFICATION_TIMEOUT_MS),
        }
    }
}

impl TakeShotConfig {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default, so an empty environment yields
    /// [`TakeShotConfig::default`]. Malformed values are an error.
    pub fn load() -> Result<Self> {
        let debounce_ms = env_millis("TAKESHOT_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS)?;
        let notification_ms = env_millis(
            "TAKESHOT_NOTIFICATION_TIMEOUT_MS",
            DEFAULT_NOTIFICATION_TIMEOUT_MS,
        )?;

        let visibility = match env::var("TAKESHOT_VISIBILITY").as_deref() {
            Ok("auto-hide") => {
                // Only read when it can matter; toggle mode ignores it
                let auto_hide_ms = env_millis("TAKESHOT_AUTO_HIDE_MS", DEFAULT_AUTO_HIDE_MS)?;
                VisibilityMode::AutoHide(Duration::from_millis(auto_hide_ms))
            }
            Ok("toggle") | Err(_) => VisibilityMode::Toggle,
            Ok(other) => anyhow::bail!(
                "TAKESHOT_VISIBILITY must be \"toggle\" or \"auto-hide\", got {other:?}"
            ),
        };

        let echo_acknowledgment = match env::var("TAKESHOT_ECHO_ACK").as_deref() {
            Ok("false") | Ok("0") | Ok("no") => false,
            Ok("true") | Ok("1") | Ok("yes") | Err(_) => true,
            Ok(other) => anyhow::bail!("TAKESHOT_ECHO_ACK must be a boolean, got {other:?}"),
        };

        let config = Self {
            debounce: Duration::from_millis(debounce_ms),
            visibility,
            echo_acknowledgment,
            notification_timeout: Duration::from_millis(notification_ms),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject intervals that would make the gates fire on every event.
    pub fn validate(&self) -> Result<()> {
        if self.debounce.is_zero() {
            anyhow::bail!("debounce interval must be greater than zero");
        }
        if let VisibilityMode::AutoHide(d) = self.visibility {
            if d.is_zero() {
                anyhow::bail!("auto-hide duration must be greater than zero");
            }
        }
        Ok(())
    }

    /// Quiet period for the inbound gate (`T_in`).
    pub fn inbound_delay(&self) -> Duration {
        self.debounce
    }

    /// Quiet period for the outbound gate (`T_out` = 2 × base).
    pub fn outbound_delay(&self) -> Duration {
        self.debounce * 2
    }

    /// Builder-style override used by tests and the CLI.
    pub fn with_visibility(mut self, visibility: VisibilityMode) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_echo_acknowledgment(mut self, echo: bool) -> Self {
        self.echo_acknowledgment = echo;
        self
    }
}

fn env_millis(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{name} must be a whole number of milliseconds, got {raw:?}")),
        Err(_) => Ok(default),
    }
}
