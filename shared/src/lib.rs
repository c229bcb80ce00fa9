pub mod articles;
pub mod config;
pub mod error;
pub mod reports;
pub mod responses;
pub mod share;
pub mod supabase;

#[cfg(any(test, feature = "memory-store"))]
pub mod memory;

pub use config::Config;
pub use error::{ConfigError, StoreError};
pub use supabase::{RecordStore, SupabaseClient};

/// Per-process state shared across invocations
pub struct AppState<S: RecordStore> {
    pub config: Config,
    pub store: S,
}

impl AppState<SupabaseClient> {
    pub fn from_config(config: Config) -> Result<Self, StoreError> {
        let store = SupabaseClient::new(&config.supabase_url, &config.supabase_key)?;
        Ok(Self { config, store })
    }
}
