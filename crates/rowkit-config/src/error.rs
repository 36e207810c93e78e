use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(rowkit_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(rowkit_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Configuration file already exists")]
    #[diagnostic(
        code(rowkit_config::already_exists),
        help("Remove the existing config file or use a different location")
    )]
    ConfigAlreadyExists,

    #[error("Invalid sample limit: {0}")]
    #[diagnostic(
        code(rowkit_config::sample_limit),
        help("sample_limit must be greater than zero")
    )]
    InvalidSampleLimit(u32),

    #[error("Path is empty")]
    #[diagnostic(code(rowkit_config::empty_path))]
    EmptyPath,

    #[error("Environment variable `{var}` referenced in `{input}` is not set")]
    #[diagnostic(
        code(rowkit_config::missing_env_var),
        help("Set the variable or use an absolute path")
    )]
    MissingEnvVar { var: String, input: String },

    #[error("Unclosed variable in `{0}`")]
    #[diagnostic(code(rowkit_config::unclosed_variable), help("Close the variable with a matching brace"))]
    UnclosedVariable(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(rowkit_config::io))]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
