mod validator;

pub use validator::{validate_read_only, ValidationError};
