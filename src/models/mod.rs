mod history;
mod session;
mod state;
mod table;

pub use history::QueryCandidate;
pub use session::{SchemaMode, Session, HISTORY_CAP};
pub use state::AppState;
pub use table::TableData;
