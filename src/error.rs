use thiserror::Error;

/// Errors raised by the settings core
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Default settings could not be fetched or parsed
    #[error("Failed to load default settings: {0}")]
    LoadFailure(String),

    /// Lookup or selection of a preset that does not exist
    #[error("Preset not found: {0}")]
    InvalidPreset(String),

    /// Create-preset request with a blank name
    #[error("Preset name must not be empty")]
    EmptyName,

    /// Create-preset request for a name that is already taken
    #[error("A preset named {0:?} already exists")]
    DuplicateName(String),

    /// Deletion of one of the shipped presets
    #[error("Built-in preset {0:?} cannot be deleted")]
    BuiltinPreset(String),

    /// Create-preset request without pending edits in `Custom`
    #[error("No custom edits to save as a preset")]
    NoCustomPreset,

    /// Mutation attempted before settings finished loading
    #[error("Settings are still loading")]
    NotReady,

    /// Mutation attempted after a load failure
    #[error("Settings are unavailable after a load failure")]
    Unavailable,

    #[error("Unknown unit system: {0}")]
    UnknownUnit(String),

    #[error("Unknown preset field: {0}")]
    UnknownField(String),

    /// Input line that does not parse as a command
    #[error("{0}")]
    Usage(#[from] clap::Error),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;
