use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Data API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Data API responded {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed data API payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
