mod error;

pub use error::{ErrorBody, HttpError};
