mod demo;
mod models;

pub use demo::DemoDatabase;
pub use models::ColumnInfo;
