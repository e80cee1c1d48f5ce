use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const CREDENTIAL_VAR: &str = "LOVABLE_API_KEY";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size_bytes: usize,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Gateway settings. The credential never leaves the server.
#[derive(Clone)]
pub struct UpstreamConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is unset
    pub filter: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but reads keys through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(v) = lookup("GENTLE_AI_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("GENTLE_AI_PORT").or_else(|| lookup("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Some(v) = lookup("API_MAX_REQUEST_SIZE_BYTES") {
            self.server.max_request_size_bytes = v.parse().unwrap_or(self.server.max_request_size_bytes);
        }

        // Upstream overrides
        if let Some(v) = lookup(CREDENTIAL_VAR) {
            let key = v.trim();
            self.upstream.api_key = (!key.is_empty()).then(|| key.to_string());
        }
        if let Some(v) = lookup("GENTLE_AI_ENDPOINT") {
            self.upstream.endpoint = v;
        }
        if let Some(v) = lookup("GENTLE_AI_MODEL") {
            self.upstream.model = v;
        }
        if let Some(v) = lookup("GENTLE_AI_TIMEOUT_SECS") {
            match v.parse::<u64>() {
                Ok(0) => self.upstream.timeout_secs = None,
                Ok(secs) => self.upstream.timeout_secs = Some(secs),
                Err(_) => {}
            }
        }

        // Logging overrides
        if let Some(v) = lookup("RUST_LOG") {
            self.logging.filter = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            upstream: UpstreamConfig::default(),
            logging: LoggingConfig {
                filter: "gentle_reflect=debug,tower_http=debug".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                max_request_size_bytes: 256 * 1024,
            },
            upstream: UpstreamConfig {
                timeout_secs: Some(60),
                ..UpstreamConfig::default()
            },
            logging: LoggingConfig {
                filter: "gentle_reflect=info,tower_http=info".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                max_request_size_bytes: 256 * 1024,
            },
            upstream: UpstreamConfig {
                timeout_secs: Some(30),
                ..UpstreamConfig::default()
            },
            logging: LoggingConfig {
                filter: "gentle_reflect=info,tower_http=warn".to_string(),
            },
        }
    }
}
