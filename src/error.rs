use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Port unavailable: {0}")]
    PortUnavailable(String),

    #[error("Port I/O error: {0}")]
    PortIo(String),

    #[error("Console output error: {0}")]
    Console(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type LinkResult<T> = std::result::Result<T, LinkError>;
