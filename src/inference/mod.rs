mod client;
mod error;
mod operations;
mod prompt;
mod sanitize;

pub use client::{HostedEndpoint, InferenceClient, InferenceEndpoint};
pub use error::InferenceError;
pub use operations::AsyncOperation;
pub use prompt::build_sql_prompt;
pub use sanitize::extract_sql;
