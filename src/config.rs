use actix_web::http::Uri;
use std::env;

pub const HOST: &str = "0.0.0.0";
pub const PORT: u16 = 3001;
pub const DATABASE_URL: &str = "mongodb://localhost:27017/proj5";

/// Frontend origin that is always allowed, in addition to `APPLICATION_URL`.
pub const FRONTEND_ORIGIN: &str = "https://crud-mern-app-ebon.vercel.app";

pub const CORS_METHODS: [&str; 6] = ["GET", "HEAD", "PUT", "PATCH", "POST", "DELETE"];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub application_url: Option<String>,
}

impl AppConfig {
    /// Reads `APPLICATION_URL`; everything else is fixed.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let application_url = lookup("APPLICATION_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        Self {
            host: HOST.to_string(),
            port: PORT,
            database_url: DATABASE_URL.to_string(),
            application_url,
        }
    }

    /// Origins accepted by the CORS layer. Invalid values are skipped with a
    /// warning, since actix-cors refuses to build with them.
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = Vec::new();

        if let Some(url) = &self.application_url {
            if is_valid_origin(url) {
                origins.push(url.clone());
            } else {
                log::warn!("⚠️  Ignoring invalid APPLICATION_URL origin: {}", url);
            }
        }

        if !origins.iter().any(|o| o == FRONTEND_ORIGIN) {
            origins.push(FRONTEND_ORIGIN.to_string());
        }

        origins
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn is_valid_origin(origin: &str) -> bool {
    origin != "*"
        && origin
            .parse::<Uri>()
            .map(|uri| uri.scheme().is_some() && uri.host().is_some())
            .unwrap_or(false)
}
