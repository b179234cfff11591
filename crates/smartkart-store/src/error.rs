//! # Storage Error Types
//!
//! Failures while loading the catalog. These happen at start-up and stop
//! the server; request-time outcomes such as an unknown product id are
//! `Option`s, not errors.

use std::path::PathBuf;

use thiserror::Error;

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not valid JSON, or a product record is incoherent
    /// (e.g. variable weight without `price_per_kg`).
    #[error("Invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an id.
    #[error("Duplicate product_id in catalog: '{0}'")]
    DuplicateProduct(String),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::DuplicateProduct("A1".to_string());
        assert_eq!(err.to_string(), "Duplicate product_id in catalog: 'A1'");

        let err = StoreError::Io {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "Failed to read catalog missing.json: no such file");
    }
}
