use thiserror::Error;

use super::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("structure contains no residues")]
    EmptyStructure,

    #[error("invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}
