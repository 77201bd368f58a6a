use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SEND_DELAY_MS: u64 = 100;
pub const DEFAULT_SESSION_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;
pub const DEFAULT_TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";
pub const DEFAULT_TWILIO_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ApiConfig {
    pub cors: Option<CorsConfig>,
    pub server: Option<ServerConfig>,
    pub database: Option<DatabaseConfig>,
    pub admin: Option<AdminConfig>,
    pub twilio: Option<TwilioConfig>,
    pub dispatch: Option<DispatchConfig>,
    pub session: Option<SessionConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

/// Fixed admin identity. When both fields are set, logins are checked
/// against these values instead of the stored admin account.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AdminConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl AdminConfig {
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Some((u, p)),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TwilioConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub from_number: Option<String>,
    pub api_base: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DispatchConfig {
    pub send_delay_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            send_delay_ms: DEFAULT_SEND_DELAY_MS,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    pub max_age_secs: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_age_secs: DEFAULT_SESSION_MAX_AGE_SECS,
        }
    }
}

const DEFAULT_CONFIG_FILE: &str = r#"
[cors]
allowed_origins = ["http://localhost:3000"]

[server]
host = "127.0.0.1"
port = 8080

[database]
# path = "/var/lib/smsdesk/db.sqlite3"

[admin]
# Fixed admin login. Leave unset to sign in with the account created by /api/users/setup.
# username = "admin"
# password = "change-me"

[twilio]
# account_sid = "ACxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx"
# auth_token = "your-auth-token"
# from_number = "+15005550006"

[dispatch]
send_delay_ms = 100

[session]
max_age_secs = 2592000
"#;

impl ApiConfig {
    /// Load the TOML config, writing the default file on first run, then
    /// overlay `SMSDESK_*` environment variables (`SMSDESK_TWILIO__AUTH_TOKEN`).
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        Self::load_with_env(path, env_overlay())
    }

    fn load_with_env(
        path: Option<&Path>,
        environment: Environment,
    ) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG_FILE).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .add_source(environment)
            .build()?;

        let config: ApiConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn server_address(&self) -> (String, u16) {
        match &self.server {
            Some(server) => (server.host.clone(), server.port),
            None => ("127.0.0.1".to_string(), 8080),
        }
    }

    pub fn dispatch(&self) -> DispatchConfig {
        self.dispatch.clone().unwrap_or_default()
    }

    pub fn session(&self) -> SessionConfig {
        self.session.clone().unwrap_or_default()
    }
}

/// Values stay strings so phone numbers and secrets keep leading `+` and zeros;
/// numeric fields are converted during deserialization.
fn env_overlay() -> Environment {
    Environment::with_prefix("SMSDESK")
        .prefix_separator("_")
        .separator("__")
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("smsdesk").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}
