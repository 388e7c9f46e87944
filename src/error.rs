use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("API error {status}: {cause}")]
    Api { status: u16, cause: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("No response after {attempts} attempts, all retry budgets exhausted")]
    RetriesExhausted { attempts: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
