//! Saral: terminal client for the Samvidhaan Saral legal-text analysis API.
//!
//! Saral sends a question or a passage of legal text to the analysis backend
//! and shows the structured explanation it returns. Around that single call it
//! provides:
//! - Routing of input to either the general simplify endpoint or the article
//!   lookup endpoint
//! - A session state machine (`Editing → Loading → Result | Error`)
//! - One-shot warm-up of a sleeping backend
//! - Periodic availability polling
//! - Session notices with auto-dismiss timers

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Command-line front end (main.rs)                   │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action execution                                 │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Background    │
//! │ (ui/)         │   │ (api/)        │   │ (background/) │
//! │ - View models │   │ - Classifier  │   │ - Warm-up     │
//! │ - Rendering   │   │ - Dispatcher  │   │ - Availability│
//! │               │   │ - Transport   │   │ - Notices     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - User paths (infrastructure/)                     │
//! │  - Error types (domain/error)                       │
//! │  - Analysis result, request descriptor (domain/)    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber                               │
//! │  - OpenTelemetry span export to file                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: Endpoint classification, dispatch and HTTP transport
//! - [`app`]: Session state machine with event/action model
//! - [`background`]: Warm-up, availability polling and notices
//! - [`domain`]: Core domain types (analysis result, request, errors)
//! - [`infrastructure`]: User configuration and data paths
//! - [`observability`]: Logging and trace export
//! - [`ui`]: View models and plain-text rendering
//!
//! # Configuration
//!
//! Defaults, overridden by `~/.config/saral/config.toml` (or `--config`),
//! overridden by command-line flags:
//!
//! ```toml
//! base_url = "https://samvidhaan-saral-api.onrender.com"
//! poll_interval_ms = 30000
//! warmup_retry_delay_ms = 10000
//! trace_level = "debug"
//! trace_file = "traces.jsonl"
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use saral::{initialize, Config};
//!
//! # async fn run() -> saral::Result<()> {
//! let (mut session, mut services) = initialize(&Config::default())?;
//! session.set_input("Article 21");
//! session.submit().await;
//! println!("{}", saral::ui::render(&session.state().compute_viewmodel(
//!     services.availability(),
//!     &services.notifications(),
//! )));
//! services.shutdown();
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod background;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, SessionState};
pub use domain::{AnalysisResult, DispatchError, HttpMethod, RequestDescriptor, Result, SaralError};

use api::{Dispatcher, ReqwestTransport, Transport};
use app::Session;
use background::{BackgroundServices, DEFAULT_NOTICES};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Backend used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://samvidhaan-saral-api.onrender.com";

/// Client configuration.
///
/// Every key is optional in the TOML file; unknown keys are rejected.
///
/// # Example
///
/// ```rust
/// use saral::Config;
///
/// let config = Config::from_toml_str("poll_interval_ms = 5000\nwarmup = false").unwrap();
/// assert_eq!(config.poll_interval_ms, 5000);
/// assert!(!config.warmup);
/// assert_eq!(config.base_url, saral::DEFAULT_BASE_URL);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Backend root; endpoint paths are appended to it.
    pub base_url: String,

    /// Wait between the wake-up request and the second warm-up probe.
    pub warmup_retry_delay_ms: u64,

    /// Availability probe interval.
    pub poll_interval_ms: u64,

    /// Timeout for analysis requests.
    pub request_timeout_ms: u64,

    /// Timeout for warm-up and availability probes.
    pub probe_timeout_ms: u64,

    /// How long each notice stays visible unless dismissed.
    pub notification_duration_ms: u64,

    /// Notices shown at session start.
    pub notifications: Vec<String>,

    /// Run the warm-up once at start.
    pub warmup: bool,

    /// Poll the backend for availability.
    pub poll_availability: bool,

    /// Log filter, e.g. `debug` or `saral=trace`. `RUST_LOG` wins over it.
    pub trace_level: Option<String>,

    /// Span export file. Relative paths are placed in the data directory.
    pub trace_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            warmup_retry_delay_ms: 10_000,
            poll_interval_ms: 30_000,
            request_timeout_ms: 60_000,
            probe_timeout_ms: 10_000,
            notification_duration_ms: 120_000,
            notifications: DEFAULT_NOTICES.iter().map(|s| (*s).to_string()).collect(),
            warmup: true,
            poll_availability: true,
            trace_level: None,
            trace_file: None,
        }
    }
}

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub trace_level: Option<String>,
    pub no_warmup: bool,
    pub no_poll: bool,
}

impl Config {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`SaralError::ConfigFile`] for malformed TOML or unknown keys,
    /// [`SaralError::Config`] for invalid values.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`, or from the default location when
    /// `path` is `None` and a file exists there, or falls back to defaults.
    ///
    /// # Errors
    ///
    /// Fails if an explicitly given file cannot be read, or if any file
    /// found is invalid.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let file = match path {
            Some(p) => Some(infrastructure::expand_tilde(p).into()),
            None => infrastructure::default_config_file(),
        };

        let Some(file) = file else {
            tracing::debug!("no configuration file, using defaults");
            return Ok(Self::default());
        };

        Self::load_file(&file)
    }

    fn load_file(file: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(file)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %file.display(), "configuration loaded");
        Ok(config)
    }

    /// Applies command-line overrides and re-validates.
    ///
    /// # Errors
    ///
    /// [`SaralError::Config`] if an override makes the configuration invalid.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if let Some(level) = overrides.trace_level {
            self.trace_level = Some(level);
        }
        if overrides.no_warmup {
            self.warmup = false;
        }
        if overrides.no_poll {
            self.poll_availability = false;
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks value constraints.
    ///
    /// # Errors
    ///
    /// [`SaralError::Config`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(SaralError::Config("base_url must not be empty".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(SaralError::Config(format!(
                "base_url must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        for (key, value) in [
            ("poll_interval_ms", self.poll_interval_ms),
            ("request_timeout_ms", self.request_timeout_ms),
            ("probe_timeout_ms", self.probe_timeout_ms),
        ] {
            if value == 0 {
                return Err(SaralError::Config(format!("{key} must be greater than zero")));
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn warmup_retry_delay(&self) -> Duration {
        Duration::from_millis(self.warmup_retry_delay_ms)
    }

    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    #[must_use]
    pub const fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }
}

/// Builds the HTTP transport, the session and the background services.
///
/// Must be called from within a tokio runtime, once per session.
///
/// # Errors
///
/// [`SaralError::Http`] if the HTTP client cannot be constructed.
pub fn initialize(config: &Config) -> Result<(Session, BackgroundServices)> {
    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::from_config(config)?);
    Ok(initialize_with(config, transport))
}

/// [`initialize`] with a caller-supplied transport.
#[must_use]
pub fn initialize_with(config: &Config, transport: Arc<dyn Transport>) -> (Session, BackgroundServices) {
    tracing::info!(base_url = %config.base_url, "starting session");
    let services = BackgroundServices::start(config, &transport);
    let session = Session::new(Dispatcher::new(config.base_url.clone(), transport));
    (session, services)
}
