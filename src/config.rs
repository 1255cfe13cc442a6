use crate::error::SyncError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sandbox client id/secret used when nothing else is configured
pub const FALLBACK_CLIENT_CREDENTIAL: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// Project-level file carrying instance connection details
pub const DW_JSON: &str = "dw.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Instance hostname without protocol (e.g. `dev01-eu01-acme.demandware.net`)
    pub hostname: String,
    pub client_id: String,
    pub client_secret: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// OCAPI Data API version segment
    pub api_version: String,
    /// OAuth2 token endpoint for client credentials
    pub auth_url: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

/// Values given explicitly on the command line; they win over every file or env source
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub hostname: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// Shape of `dw.json`, which uses dashed keys for the client credentials
#[derive(Debug, Default, Serialize, Deserialize)]
struct DwJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    hostname: Option<String>,
    #[serde(alias = "client-id", skip_serializing_if = "Option::is_none")]
    client_id: Option<String>,
    #[serde(alias = "client-secret", skip_serializing_if = "Option::is_none")]
    client_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

impl DwJson {
    fn read(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read(path).map_err(|e| SyncError::io(path, e))?;
        let mut dw: DwJson = serde_json::from_slice(&content).map_err(|e| SyncError::json(path, e))?;

        // Empty credentials count as absent so the fallback still applies
        dw.client_id = dw.client_id.filter(|v| !v.is_empty());
        dw.client_secret = dw.client_secret.filter(|v| !v.is_empty());
        Ok(dw)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            client_id: FALLBACK_CLIENT_CREDENTIAL.to_string(),
            client_secret: FALLBACK_CLIENT_CREDENTIAL.to_string(),
            username: None,
            password: None,
            api_version: "v21_10".to_string(),
            auth_url: "https://account.demandware.com/dwsso/oauth2/access_token".to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_retries: 5,
            retry_delay_ms: 2000,
        }
    }
}

/// Result of validating one configured value
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValidation {
    pub name: &'static str,
    pub value: String,
    pub errors: Vec<String>,
}

impl FieldValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl AppConfig {
    /// Load configuration for a project directory.
    ///
    /// Sources, lowest precedence first: built-in defaults, `dw.json` in
    /// `project_root`, `SFCCDX_*` environment variables, command line.
    pub fn load(project_root: &Path, overrides: &ConfigOverrides) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add dw.json if it exists
        let dw_json = DwJson::read(&project_root.join(DW_JSON))?;
        config = config.add_source(config::Config::try_from(&dw_json)?);

        // Add environment variables with prefix "SFCCDX_", e.g. SFCCDX_HTTP__MAX_RETRIES
        config = config.add_source(
            config::Environment::with_prefix("SFCCDX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        config = config
            .set_override_option("hostname", overrides.hostname.clone())?
            .set_override_option("client_id", overrides.client_id.clone())?
            .set_override_option("client_secret", overrides.client_secret.clone())?;

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Base URL of the OCAPI Data API on the configured instance
    pub fn data_api_base(&self) -> Result<String, SyncError> {
        if self.hostname.trim().is_empty() {
            return Err(SyncError::Config(
                "no hostname configured (use --hostname, dw.json or SFCCDX_HOSTNAME)".to_string(),
            ));
        }
        Ok(format!("https://{}/s/-/dw/data/{}", self.hostname, self.api_version))
    }

    /// Validate the connection settings the `environment` command shows
    pub fn validate(&self) -> Vec<FieldValidation> {
        vec![
            FieldValidation {
                name: "hostname",
                value: self.hostname.clone(),
                errors: validate_hostname(&self.hostname),
            },
            required_string("clientid", &self.client_id, 3),
            required_string("clientsecret", &self.client_secret, 3),
            required_string("username", self.username.as_deref().unwrap_or_default(), 1),
            required_string("password", self.password.as_deref().unwrap_or_default(), 1),
        ]
    }
}

fn validate_hostname(hostname: &str) -> Vec<String> {
    if hostname.trim().is_empty() {
        return vec!["-- hostname should not be null or undefined".to_string()];
    }

    let lower = hostname.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return vec!["-- hostnames should not begin with protocol declarations (ex. https://)".to_string()];
    }

    Vec::new()
}

fn required_string(name: &'static str, value: &str, minimum_length: usize) -> FieldValidation {
    let errors = if value.is_empty() {
        vec![format!("-- {} should not be empty", name)]
    } else if value.chars().count() < minimum_length {
        vec![format!("-- {} should be at least {} characters long.", name, minimum_length)]
    } else {
        Vec::new()
    };

    FieldValidation {
        name,
        value: value.to_string(),
        errors,
    }
}
