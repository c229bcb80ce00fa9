use std::env;

use tracing::{info, warn};

use crate::error::ConfigError;

const SUPABASE_URL_KEYS: &[&str] = &["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL", "VITE_SUPABASE_URL"];
const SUPABASE_KEY_KEYS: &[&str] = &[
    "SUPABASE_SERVICE_ROLE_KEY",
    "SUPABASE_SECRET_KEY",
    "SUPABASE_ANON_KEY",
    "NEXT_PUBLIC_SUPABASE_ANON_KEY",
    "VITE_SUPABASE_PUBLISHABLE_KEY",
];
const SITE_URL_KEYS: &[&str] = &["NEXT_PUBLIC_SITE_URL", "SITE_URL", "VITE_SITE_URL", "VERCEL_URL"];
const CORS_KEY: &str = "CORS_ALLOWED_ORIGIN";

#[derive(Debug, Clone)]
pub struct Config {
    /// Project URL without a trailing slash
    pub supabase_url: String,
    pub supabase_key: String,
    pub site_url: Option<String>,
    pub cors_origin: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let supabase_url = first_set(&lookup, SUPABASE_URL_KEYS)
            .ok_or(ConfigError::Missing(SUPABASE_URL_KEYS[0]))?;
        let supabase_key = first_set(&lookup, SUPABASE_KEY_KEYS)
            .ok_or(ConfigError::Missing(SUPABASE_KEY_KEYS[0]))?;

        let site_url = first_set(&lookup, SITE_URL_KEYS);
        if site_url.is_none() {
            info!("No site URL configured, deriving it from request headers");
        }

        let cors_origin = first_set(&lookup, &[CORS_KEY]).unwrap_or_else(|| {
            info!("{CORS_KEY} not set, using default: *");
            "*".to_string()
        });

        Ok(Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_key,
            site_url,
            cors_origin,
        })
    }
}

/// First non-blank value among `keys`, in order.
fn first_set<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    for (position, key) in keys.iter().enumerate() {
        if let Some(value) = lookup(key).map(|v| v.trim().to_string()) {
            if value.is_empty() {
                warn!("Environment variable {key} is blank, ignoring");
                continue;
            }
            if position > 0 {
                info!("Using {key} in place of {}", keys[0]);
            }
            return Some(value);
        }
    }
    None
}
