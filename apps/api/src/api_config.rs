use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use hrdesk_core::AppError;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const DEVELOPMENT_JWT_SECRET: &str = "hrdesk-development-secret-do-not-deploy";
const MIN_JWT_SECRET_BYTES: usize = 32;

/// Handling of the deprecated `JWT <token>` authorization prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyAuthScheme {
    Accept,
    Reject,
}

impl FromStr for LegacyAuthScheme {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            other => Err(AppError::Validation(format!(
                "LEGACY_AUTH_SCHEME must be either 'accept' or 'reject', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub development: bool,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub jwt_secret: String,
    pub jwt_leeway_seconds: u64,
    pub role_label_aliases: Vec<(String, String)>,
    pub legacy_auth_scheme: LegacyAuthScheme,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_source(migrate_only, |name| env::var(name).ok())
    }

    fn from_source(
        migrate_only: bool,
        source: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let optional = |name: &str| source(name).filter(|value| !value.trim().is_empty());

        let development = optional("APP_ENV")
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("development"));

        let database_url = optional("DATABASE_URL");
        if database_url.is_none() && (migrate_only || !development) {
            return Err(AppError::Validation("DATABASE_URL is required".to_owned()));
        }

        let database_max_connections = parse_or("DATABASE_MAX_CONNECTIONS", optional, 10)?;
        let frontend_url =
            optional("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        let api_host = optional("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parse_or("API_PORT", optional, 3001)?;

        let jwt_secret = match optional("JWT_SECRET") {
            Some(secret) if !development && secret.len() < MIN_JWT_SECRET_BYTES => {
                return Err(AppError::Validation(format!(
                    "JWT_SECRET must be at least {MIN_JWT_SECRET_BYTES} bytes"
                )));
            }
            Some(secret) => secret,
            None if development => {
                warn!("JWT_SECRET is not set; using the development secret");
                DEVELOPMENT_JWT_SECRET.to_owned()
            }
            None => return Err(AppError::Validation("JWT_SECRET is required".to_owned())),
        };
        let jwt_leeway_seconds = parse_or("JWT_LEEWAY_SECONDS", optional, 0)?;

        let role_label_aliases = optional("ROLE_LABEL_ALIASES")
            .map(|value| parse_role_label_aliases(value.as_str()))
            .transpose()?
            .unwrap_or_default();

        let legacy_auth_scheme = optional("LEGACY_AUTH_SCHEME")
            .map(|value| LegacyAuthScheme::from_str(value.as_str()))
            .transpose()?
            .unwrap_or(LegacyAuthScheme::Accept);

        Ok(Self {
            migrate_only,
            development,
            database_url,
            database_max_connections,
            frontend_url,
            api_host,
            api_port,
            jwt_secret,
            jwt_leeway_seconds,
            role_label_aliases,
            legacy_auth_scheme,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_or<T>(
    name: &str,
    optional: impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional(name)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|error| AppError::Validation(format!("invalid {name}: {error}")))
        })
        .transpose()
        .map(|value| value.unwrap_or(default))
}

/// Parses `label=role_key` pairs separated by commas.
fn parse_role_label_aliases(value: &str) -> Result<Vec<(String, String)>, AppError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (label, key) = pair.split_once('=').ok_or_else(|| {
                AppError::Validation(format!(
                    "ROLE_LABEL_ALIASES entry '{pair}' must look like 'label=role_key'"
                ))
            })?;
            Ok((label.trim().to_owned(), key.trim().to_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests;
