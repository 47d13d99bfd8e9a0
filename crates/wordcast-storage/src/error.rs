use thiserror::Error;

/// Object storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Request never reached the storage service
    #[error("storage connection: {0}")]
    Connection(String),
    /// Storage service rejected the upload
    #[error("upload failed ({status}): {message}")]
    Upload { status: u16, message: String },
    /// Existence probe returned an unexpected status
    #[error("existence probe failed ({status}): {message}")]
    Probe { status: u16, message: String },
}

/// Metadata catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Request never reached the catalog service
    #[error("catalog connection: {0}")]
    Connection(String),
    /// Lookup was rejected
    #[error("catalog query failed ({status}): {message}")]
    Query { status: u16, message: String },
    /// Insert was rejected
    #[error("catalog write failed ({status}): {message}")]
    Write { status: u16, message: String },
    /// Response body did not match the record shape
    #[error("catalog decode: {0}")]
    Decode(String),
}
