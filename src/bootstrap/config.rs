use std::env;

use crate::application::ports::rate_limiter::ThrottleRate;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_port: u16,
    pub frontend_url: Option<String>,
    pub public_base_url: Option<String>,
    pub database_url: String,
    pub db_max_connections: u32,
    pub page_size: u32,
    pub friend_request_rate: ThrottleRate,
    pub is_production: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);
        let frontend_url = env::var("FRONTEND_URL").ok();
        let public_base_url = env::var("PUBLIC_BASE_URL").ok().and_then(|v| {
            let trimmed = v.trim();
            if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
                Some(trimmed.trim_end_matches('/').to_string())
            } else {
                None
            }
        });
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => database_url_from_parts(&DatabaseParts::from_env())?,
        };
        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);
        let page_size = env::var("PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);
        if page_size == 0 {
            anyhow::bail!("PAGE_SIZE must be greater than zero");
        }
        let friend_request_rate = env::var("FRIEND_REQUEST_THROTTLE_RATE")
            .unwrap_or_else(|_| "3/minute".into())
            .parse::<ThrottleRate>()?;
        let is_production = matches!(
            env::var("RUST_ENV").ok().as_deref(),
            Some("production") | Some("prod")
        );

        if is_production
            && !frontend_url
                .as_deref()
                .map(|u| u.starts_with("http"))
                .unwrap_or(false)
        {
            anyhow::bail!(
                "FRONTEND_URL must be set to a full origin in production (e.g., https://app.example.com)"
            );
        }

        Ok(Self {
            api_port,
            frontend_url,
            public_base_url,
            database_url,
            db_max_connections,
            page_size,
            friend_request_rate,
            is_production,
        })
    }
}

/// Individual connection settings, used when `DATABASE_URL` is not provided.
#[derive(Debug, Clone)]
pub struct DatabaseParts {
    pub engine: String,
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl DatabaseParts {
    fn from_env() -> Self {
        let var = |key: &str, default: &str| env::var(key).unwrap_or_else(|_| default.into());
        Self {
            engine: var("DB_ENGINE", "postgresql"),
            name: var("DB_NAME", "social"),
            user: var("DB_USER", "social"),
            password: var("DB_PASSWORD", "social"),
            host: var("DB_HOST", "localhost"),
            port: env::var("DB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5432),
        }
    }
}

pub fn database_url_from_parts(parts: &DatabaseParts) -> anyhow::Result<String> {
    let engine = parts.engine.rsplit('.').next().unwrap_or_default();
    if !matches!(engine, "postgres" | "postgresql") {
        anyhow::bail!("unsupported DB_ENGINE '{}', only postgresql is available", parts.engine);
    }
    let mut url = url::Url::parse(&format!("postgres://{}", parts.host))
        .map_err(|e| anyhow::anyhow!("invalid DB_HOST '{}': {}", parts.host, e))?;
    url.set_username(&parts.user)
        .map_err(|_| anyhow::anyhow!("invalid DB_USER"))?;
    if !parts.password.is_empty() {
        url.set_password(Some(&parts.password))
            .map_err(|_| anyhow::anyhow!("invalid DB_PASSWORD"))?;
    }
    url.set_port(Some(parts.port))
        .map_err(|_| anyhow::anyhow!("invalid DB_PORT"))?;
    url.set_path(&parts.name);
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts() -> DatabaseParts {
        DatabaseParts {
            engine: "django.db.backends.postgresql".into(),
            name: "social".into(),
            user: "app".into(),
            password: "p@ss word".into(),
            host: "db".into(),
            port: 5433,
        }
    }

    #[test]
    fn builds_url_from_parts() {
        let url = database_url_from_parts(&parts()).unwrap();
        assert_eq!(url, "postgres://app:p%40ss%20word@db:5433/social");
    }

    #[test]
    fn rejects_other_engines() {
        let mut p = parts();
        p.engine = "mysql".into();
        assert!(database_url_from_parts(&p).is_err());
    }
}
