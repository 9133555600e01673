use thiserror::Error;

/// Rejected player actions. The message is what a front-end shows; the
/// engine state is untouched whenever one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("No die at position {index}.")]
    InvalidDieIndex { index: usize },
    #[error("No shop available.")]
    NoShop,
    #[error("No item at that position.")]
    NoItemAtPosition,
    #[error("Already purchased.")]
    AlreadyPurchased,
    #[error("Not enough chips.")]
    InsufficientChips,
    #[error("Angle slots are full.")]
    AngleSlotsFull,
    #[error("The pot is not cleared yet.")]
    PotNotCleared,
    #[error("The pot is over.")]
    PotOver,
}

/// A persisted run that cannot be loaded.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt save: {0}")]
    Corrupt(String),
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Corrupt(e.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid run configuration: {0}")]
    Invalid(String),
}
