use serde::{Deserialize, Serialize};

use crate::models::QueryCandidate;
use crate::schema::Schema;

pub const HISTORY_CAP: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaMode {
    Sample,
    Manual,
    Image,
}

/// Per-session context: the schema currently in effect and the query
/// history. Passed explicitly through the call chain instead of living in
/// globals, so nothing is shared between sessions.
#[derive(Default)]
pub struct Session {
    pub schema: Option<Schema>,
    pub history: Vec<QueryCandidate>,
}

impl Session {
    /// Most-recent-first, capped.
    pub fn push_candidate(&mut self, candidate: QueryCandidate) {
        self.history.insert(0, candidate);
        self.history.truncate(HISTORY_CAP);
    }

    /// A prompt may only be built from a non-empty, user-confirmed schema.
    pub fn can_generate(&self) -> bool {
        self.schema
            .as_ref()
            .map(|s| !s.is_empty() && s.is_verified())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{parse_schema_text, SchemaOrigin};

    fn candidate(n: usize) -> QueryCandidate {
        QueryCandidate::new(
            format!("question {}", n),
            format!("SELECT {}", n),
            "Table: t\n  - id: INTEGER\n".to_string(),
        )
    }

    #[test]
    fn test_history_is_most_recent_first() {
        let mut session = Session::default();
        session.push_candidate(candidate(1));
        session.push_candidate(candidate(2));
        assert_eq!(session.history[0].question, "question 2");
        assert_eq!(session.history[1].question, "question 1");
    }

    #[test]
    fn test_history_is_capped() {
        let mut session = Session::default();
        for n in 0..(HISTORY_CAP + 10) {
            session.push_candidate(candidate(n));
        }
        assert_eq!(session.history.len(), HISTORY_CAP);
        assert_eq!(session.history[0].question, format!("question {}", HISTORY_CAP + 9));
    }

    #[test]
    fn test_candidate_snapshot_survives_schema_switch() {
        let mut session = Session::default();
        let first = parse_schema_text("Table: a\n  - x: INTEGER", SchemaOrigin::Manual).unwrap();
        let snapshot = first.to_prompt_text();
        session.schema = Some(first);
        session.push_candidate(QueryCandidate::new(
            "q".to_string(),
            "SELECT x FROM a".to_string(),
            snapshot.clone(),
        ));

        // user switches schema afterwards
        session.schema =
            Some(parse_schema_text("Table: b\n  - y: TEXT", SchemaOrigin::Manual).unwrap());

        assert_eq!(session.history[0].schema_text, snapshot);
    }

    #[test]
    fn test_cannot_generate_without_schema() {
        let session = Session::default();
        assert!(!session.can_generate());
    }

    #[test]
    fn test_cannot_generate_from_unverified_image_schema() {
        let mut session = Session::default();
        let mut schema = parse_schema_text(
            "Table: t\n  - id: INTEGER",
            SchemaOrigin::Image { verified: false },
        )
        .unwrap();
        session.schema = Some(schema.clone());
        assert!(!session.can_generate());

        schema.mark_verified();
        session.schema = Some(schema);
        assert!(session.can_generate());
    }
}
