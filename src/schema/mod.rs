mod examples;
mod model;
mod parse;

pub use examples::{example_questions, example_schemas};
pub use model::{Column, Schema, SchemaOrigin, Table};
pub use parse::{parse_schema_text, ParseError};
