//! Settings for the application, read from an optional `settings.toml` next
//! to the binary and from `BUDGETMATE__*` environment variables.
//!
//! See `settings.toml` at the repository root for an annotated example.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    #[default]
    Memory,
    Sqlite(String),
    Postgres(Postgres),
}

/// A PostgreSQL server, either local or hosted.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Postgres {
    pub host: String,
    #[serde(default = "default_postgres_port")]
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Hosted providers route on this instead of the host name.
    pub endpoint_id: Option<String>,
    #[serde(default)]
    pub ssl: bool,
}

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_hash_cost")]
    pub hash_cost: u32,
    #[serde(default)]
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub server: Server,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_postgres_port() -> u16 {
    5432
}

fn default_hash_cost() -> u32 {
    engine::DEFAULT_HASH_COST
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: default_port(),
            hash_cost: default_hash_cost(),
            database: Database::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(
                Environment::with_prefix("BUDGETMATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    #[cfg(test)]
    fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Address the listener binds to.
    pub fn address(&self) -> String {
        let bind = self.server.bind.as_deref().unwrap_or("127.0.0.1");
        format!("{bind}:{}", self.server.port)
    }
}

impl Database {
    /// Connection URL understood by `sea_orm::Database::connect`.
    ///
    /// Credentials are percent-encoded, so any character may appear in the
    /// user name or password.
    pub fn url(&self) -> Result<String, ConfigError> {
        match self {
            Self::Memory => Ok(String::from("sqlite::memory:")),
            Self::Sqlite(path) => Ok(format!("sqlite:{path}?mode=rwc")),
            Self::Postgres(pg) => pg.url(),
        }
    }
}

impl Postgres {
    fn url(&self) -> Result<String, ConfigError> {
        let invalid = |what: &str| ConfigError::Message(format!("invalid postgres {what}"));

        let mut url = Url::parse(&format!("postgres://{}:{}", self.host, self.port))
            .map_err(|err| ConfigError::Message(format!("invalid postgres host: {err}")))?;
        url.set_username(&self.user)
            .map_err(|()| invalid("user"))?;
        url.set_password(Some(&self.password))
            .map_err(|()| invalid("password"))?;
        url.path_segments_mut()
            .map_err(|()| invalid("database name"))?
            .push(&self.name);

        if self.ssl || self.endpoint_id.is_some() {
            let mut query = url.query_pairs_mut();
            if self.ssl {
                query.append_pair("sslmode", "require");
            }
            if let Some(endpoint) = &self.endpoint_id {
                query.append_pair("options", &format!("project={endpoint}"));
            }
        }

        Ok(url.into())
    }
}
