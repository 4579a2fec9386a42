//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.concierge/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::session::DEFAULT_SESSION_PREFIX;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConciergeConfig {
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WebhookConfig {
    pub url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub session_prefix: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    pub greeting: Option<String>,
    pub reply_fallback: Option<String>,
    pub failure_fallback: Option<String>,
    pub pacing_delay_ms: Option<u64>,
    pub reset_on_close: Option<bool>,
    pub assistant_name: Option<String>,
    pub tagline: Option<String>,
    pub placeholder: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_WEBHOOK_URL: &str = "http://localhost:5678/webhook/ChatVortexia";
pub const DEFAULT_PACING_DELAY_MS: u64 = 1500;

pub const DEFAULT_GREETING: &str =
    "¡Hola! Soy el asistente de Vortexia. ¿En qué puedo ayudarte a transformar tu negocio con IA?";
pub const DEFAULT_REPLY_FALLBACK: &str = "Gracias por tu mensaje. Nuestro equipo te contactará pronto \
    para discutir cómo podemos transformar tu negocio con IA.";
pub const DEFAULT_FAILURE_FALLBACK: &str = "Gracias por tu interés. Nuestro equipo revisará tu consulta \
    y te contactará pronto para explorar las posibilidades de automatización para tu empresa.";

const DEFAULT_ASSISTANT_NAME: &str = "VORTEXIA";
const DEFAULT_TAGLINE: &str = "Asistente de Automatización IA";
const DEFAULT_PLACEHOLDER: &str = "Escribe tu consulta sobre IA...";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// The three fixed strings the controller may put in the transcript on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTexts {
    pub greeting: String,
    /// Webhook answered but gave no usable `response`.
    pub reply_fallback: String,
    /// Webhook could not be reached or answered with garbage.
    pub failure_fallback: String,
}

impl Default for ChatTexts {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
            reply_fallback: DEFAULT_REPLY_FALLBACK.to_string(),
            failure_fallback: DEFAULT_FAILURE_FALLBACK.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub webhook_url: String,
    pub request_timeout: Option<Duration>,
    pub session_prefix: String,
    pub texts: ChatTexts,
    pub pacing_delay: Duration,
    pub reset_on_close: bool,
    pub assistant_name: String,
    pub tagline: String,
    pub placeholder: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&ConciergeConfig::default(), &CliOverrides::default())
    }
}

/// Values that can come from the command line (None / false = not given).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub webhook_url: Option<String>,
    pub reset_on_close: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.concierge/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".concierge").join("config.toml"))
}

/// Load config from `~/.concierge/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ConciergeConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ConciergeConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ConciergeConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ConciergeConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ConciergeConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ConciergeConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Concierge Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [webhook]
# url = "https://automation.example.com/webhook/ChatVortexia"   # Or CONCIERGE_WEBHOOK_URL
# request_timeout_secs = 30          # Unset = wait as long as the transport does
# session_prefix = "vortexia-chat"   # Or CONCIERGE_SESSION_PREFIX

# [chat]
# greeting = "¡Hola! Soy el asistente de Vortexia. ¿En qué puedo ayudarte a transformar tu negocio con IA?"
# reply_fallback = "Gracias por tu mensaje. Nuestro equipo te contactará pronto."
# failure_fallback = "Gracias por tu interés. Nuestro equipo revisará tu consulta."
# pacing_delay_ms = 1500             # Or CONCIERGE_PACING_MS
# reset_on_close = false             # true = closing the panel starts a new conversation
# assistant_name = "VORTEXIA"
# tagline = "Asistente de Automatización IA"
# placeholder = "Escribe tu consulta sobre IA..."
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ConciergeConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with the environment lookup injected.
pub fn resolve_with_env(
    config: &ConciergeConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Webhook URL: CLI → env → config → default
    let webhook_url = cli
        .webhook_url
        .clone()
        .or_else(|| env("CONCIERGE_WEBHOOK_URL"))
        .or_else(|| config.webhook.url.clone())
        .unwrap_or_else(|| DEFAULT_WEBHOOK_URL.to_string());

    // Session prefix: env → config → default
    let session_prefix = env("CONCIERGE_SESSION_PREFIX")
        .or_else(|| config.webhook.session_prefix.clone())
        .unwrap_or_else(|| DEFAULT_SESSION_PREFIX.to_string());

    // Pacing: env → config → default. A garbage env value is ignored.
    let pacing_ms = env("CONCIERGE_PACING_MS")
        .and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(ms) => Some(ms),
            Err(_) => {
                warn!("Ignoring invalid CONCIERGE_PACING_MS: {:?}", raw);
                None
            }
        })
        .or(config.chat.pacing_delay_ms)
        .unwrap_or(DEFAULT_PACING_DELAY_MS);

    let chat = &config.chat;
    let texts = ChatTexts {
        greeting: non_blank(&chat.greeting).unwrap_or_else(|| DEFAULT_GREETING.to_string()),
        reply_fallback: non_blank(&chat.reply_fallback)
            .unwrap_or_else(|| DEFAULT_REPLY_FALLBACK.to_string()),
        failure_fallback: non_blank(&chat.failure_fallback)
            .unwrap_or_else(|| DEFAULT_FAILURE_FALLBACK.to_string()),
    };

    ResolvedConfig {
        webhook_url,
        request_timeout: config
            .webhook
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs),
        session_prefix,
        texts,
        pacing_delay: Duration::from_millis(pacing_ms),
        reset_on_close: cli.reset_on_close || chat.reset_on_close.unwrap_or(false),
        assistant_name: chat
            .assistant_name
            .clone()
            .unwrap_or_else(|| DEFAULT_ASSISTANT_NAME.to_string()),
        tagline: chat.tagline.clone().unwrap_or_else(|| DEFAULT_TAGLINE.to_string()),
        placeholder: chat
            .placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
    }
}

/// Transcript text must be non-empty, so blank overrides fall back to defaults.
fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
