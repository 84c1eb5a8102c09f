pub mod error;

pub use error::{auth_response, json_error_handler, status_for, validation_error_response};
