use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid capacity: {0}")]
    InvalidCapacity(u8),

    #[error("Invalid occupancy {occupancy} for capacity {capacity}")]
    InvalidOccupancy { occupancy: u8, capacity: u8 },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
