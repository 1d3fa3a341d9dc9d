use poll_promise::Promise;

use crate::inference::InferenceError;
use crate::schema::Schema;

/// In-flight network work, polled from the UI loop each frame. The schema
/// snapshot travels with the generation promise so the candidate is paired
/// with the exact schema text that produced it.
pub enum AsyncOperation {
    GenerateSql {
        question: String,
        schema_text: String,
        promise: Promise<Result<String, InferenceError>>,
    },
    ExtractSchema {
        promise: Promise<Result<Schema, InferenceError>>,
    },
}
