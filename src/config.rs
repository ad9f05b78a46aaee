use cookie::SameSite;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub cookie: CookieConfig,
    pub pages: PagesConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the backend API, e.g. `http://localhost:3001`.
    /// Upstream paths are appended verbatim.
    pub base_url: String,
}

/// Attributes applied to every identity cookie issued at login.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub same_site: SameSitePolicy,
    pub secure: bool,
    pub max_age_secs: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSitePolicy {
    /// Same-origin deployment: pages and API share a site.
    Lax,
    /// Cross-site deployment: `SameSite=None`, which browsers only accept with `Secure`.
    None,
}

#[derive(Debug, Clone)]
pub struct PagesConfig {
    pub dir: PathBuf,
    pub static_dir: PathBuf,
}

impl SameSitePolicy {
    pub fn same_site(self) -> SameSite {
        match self {
            SameSitePolicy::Lax => SameSite::Lax,
            SameSitePolicy::None => SameSite::None,
        }
    }
}

impl CookieConfig {
    pub fn is_secure(&self) -> bool {
        self.secure || self.same_site == SameSitePolicy::None
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            same_site: SameSitePolicy::Lax,
            secure: false,
            max_age_secs: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("MOBILE_SERVER__PORT")
            .or_else(|| lookup("MOBILE_PORT"))
            .unwrap_or_else(|| "3002".to_string());

        let same_site = match lookup("MOBILE_COOKIE__SAME_SITE")
            .unwrap_or_else(|| "lax".to_string())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "lax" => SameSitePolicy::Lax,
            "none" => SameSitePolicy::None,
            other => return Err(ConfigError::InvalidSameSite(other.to_string())),
        };

        let secure = match lookup("MOBILE_COOKIE__SECURE") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidBool("MOBILE_COOKIE__SECURE", value))?,
            None => false,
        };

        let max_age_secs = match lookup("MOBILE_COOKIE__MAX_AGE_SECS") {
            Some(value) => Some(value.trim().parse().map_err(|_| ConfigError::InvalidMaxAge)?),
            None => None,
        };

        Ok(Config {
            server: ServerConfig {
                host: lookup("MOBILE_SERVER__HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: port.trim().parse().map_err(|_| ConfigError::InvalidPort)?,
            },
            upstream: UpstreamConfig {
                base_url: lookup("MOBILE_UPSTREAM__BASE_URL")
                    .or_else(|| lookup("API_BASE_URL"))
                    .unwrap_or_else(|| "http://localhost:3001".to_string()),
            },
            cookie: CookieConfig {
                same_site,
                secure,
                max_age_secs,
            },
            pages: PagesConfig {
                dir: lookup("MOBILE_PAGES__DIR")
                    .unwrap_or_else(|| "pages".to_string())
                    .into(),
                static_dir: lookup("MOBILE_PAGES__STATIC_DIR")
                    .unwrap_or_else(|| "static".to_string())
                    .into(),
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("MOBILE_COOKIE__SAME_SITE must be `lax` or `none`, got `{0}`")]
    InvalidSameSite(String),
    #[error("{0} must be `true` or `false`, got `{1}`")]
    InvalidBool(&'static str, String),
    #[error("MOBILE_COOKIE__MAX_AGE_SECS must be a whole number of seconds")]
    InvalidMaxAge,
}
