use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Environment variable naming an optional JSON config file.
pub const CONFIG_PATH_VAR: &str = "HUDDLE_CONFIG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    #[default]
    Live,
}

impl FromStr for Environment {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "live" => Ok(Environment::Live),
            other => Err(eyre::eyre!("unknown environment name: {other}")),
        }
    }
}

/// Where documents are persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    S3,
    Memory,
}

impl FromStr for StoreKind {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s3" => Ok(StoreKind::S3),
            "memory" => Ok(StoreKind::Memory),
            other => Err(eyre::eyre!("unknown store kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    pub title: String,
    pub description: String,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            title: "Assessments".to_string(),
            description: "Take an assessment and get your results by email".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugMode {
    pub dev: bool,
    pub staging: bool,
    pub live: bool,
}

/// Application configuration, passed explicitly into services and handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub bucket: String,
    pub store: StoreKind,
    pub environment: Environment,
    pub assessment_admin_list_page_size: usize,
    pub default_meta: Meta,
    /// Send participants HTML results instead of plain text.
    pub completed_assessment_html_emails: bool,
    pub send_emails_to_admins_on_completed_assessment: bool,
    pub completed_assessment_address: String,
    pub development_environment_url: String,
    pub staging_environment_url: String,
    pub live_environment_url: String,
    pub dev_port: u16,
    pub debug_mode: DebugMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bucket: "huddle-assessments".to_string(),
            store: StoreKind::S3,
            environment: Environment::Live,
            assessment_admin_list_page_size: 10,
            default_meta: Meta::default(),
            completed_assessment_html_emails: true,
            send_emails_to_admins_on_completed_assessment: false,
            completed_assessment_address: String::new(),
            development_environment_url: String::new(),
            staging_environment_url: String::new(),
            live_environment_url: String::new(),
            dev_port: 3000,
            debug_mode: DebugMode::default(),
        }
    }
}

impl AppConfig {
    /// Public base URL for the running environment. Falls back to localhost
    /// when the environment has no URL configured.
    pub fn root_url(&self) -> String {
        let url = match self.environment {
            Environment::Development => &self.development_environment_url,
            Environment::Staging => &self.staging_environment_url,
            Environment::Live => &self.live_environment_url,
        };
        if url.is_empty() {
            format!("http://localhost:{}", self.dev_port)
        } else {
            url.clone()
        }
    }

    pub fn debug_mode(&self) -> bool {
        match self.environment {
            Environment::Development => self.debug_mode.dev,
            Environment::Staging => self.debug_mode.staging,
            Environment::Live => self.debug_mode.live,
        }
    }
}

/// Load configuration from the process environment.
pub fn load() -> eyre::Result<AppConfig> {
    load_from(|name| std::env::var(name).ok())
}

/// Load configuration using `var` to resolve environment variables.
///
/// Order: built-in defaults, then the JSON file named by `HUDDLE_CONFIG`
/// (fields missing from the file keep their defaults), then individual
/// variable overrides.
pub fn load_from(var: impl Fn(&str) -> Option<String>) -> eyre::Result<AppConfig> {
    let mut config = match var(CONFIG_PATH_VAR).filter(|p| !p.is_empty()) {
        Some(path) => read_file(Path::new(&path))?,
        None => AppConfig::default(),
    };

    apply_overrides(&mut config, &var)?;

    if config.assessment_admin_list_page_size == 0 {
        return Err(eyre::eyre!("assessmentAdminListPageSize must be at least 1"));
    }

    Ok(config)
}

fn read_file(path: &Path) -> eyre::Result<AppConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    let config = serde_json::from_str(&contents)
        .map_err(|e| eyre::eyre!("invalid config at {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), "config loaded");
    Ok(config)
}

fn apply_overrides(
    config: &mut AppConfig,
    var: &impl Fn(&str) -> Option<String>,
) -> eyre::Result<()> {
    let get = |name: &str| var(name).filter(|v| !v.is_empty());

    if let Some(bucket) = get("HUDDLE_BUCKET") {
        config.bucket = bucket;
    }
    if let Some(store) = get("HUDDLE_STORE") {
        config.store = store.parse()?;
    }
    if let Some(env_name) = get("ENV_NAME") {
        config.environment = env_name.parse()?;
    }
    if let Some(size) = get("HUDDLE_PAGE_SIZE") {
        config.assessment_admin_list_page_size = size
            .parse()
            .map_err(|e| eyre::eyre!("HUDDLE_PAGE_SIZE '{size}': {e}"))?;
    }
    if let Some(flag) = get("HUDDLE_HTML_EMAILS") {
        config.completed_assessment_html_emails = parse_flag("HUDDLE_HTML_EMAILS", &flag)?;
    }
    if let Some(flag) = get("HUDDLE_NOTIFY_ADMINS") {
        config.send_emails_to_admins_on_completed_assessment =
            parse_flag("HUDDLE_NOTIFY_ADMINS", &flag)?;
    }
    if let Some(address) = get("HUDDLE_ADMIN_ADDRESS") {
        config.completed_assessment_address = address;
    }

    Ok(())
}

fn parse_flag(name: &str, value: &str) -> eyre::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(eyre::eyre!("{name}: expected a boolean, got '{other}'")),
    }
}
