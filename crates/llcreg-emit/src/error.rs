//! Errors from the emitters.

use thiserror::Error;

/// Convenience alias for results within the emit crate.
pub type Result<T> = std::result::Result<T, EmitError>;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("unknown artifact: '{name}'. Available artifacts: register-schema, typedef-header, assign-header, address-enum, software-header, partition-concat")]
    UnknownArtifact { name: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
