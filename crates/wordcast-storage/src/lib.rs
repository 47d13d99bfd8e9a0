//! Persistence for synthesized audio
//!
//! Audio objects live in a storage bucket under a content-addressed name
//! derived from (voice, text). A small catalog table maps the same pair to
//! the public URL of its object so repeated requests can skip synthesis.

#![allow(clippy::missing_errors_doc)]

mod artifact;
mod catalog;
mod error;
mod key;
pub mod supabase;

pub use artifact::{ArtifactStore, AUDIO_CONTENT_TYPE};
pub use catalog::{CatalogIndex, CatalogRecord};
pub use error::{CatalogError, StorageError};
pub use key::CacheKey;
