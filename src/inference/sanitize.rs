use crate::inference::InferenceError;

const SQL_KEYWORDS: &[&str] = &["SELECT", "INSERT", "UPDATE", "DELETE", "WITH", "CREATE"];
const PREFIXES: &[&str] = &["SQL:", "Query:", "Answer:"];

/// Pull a bare SQL statement out of a raw model completion.
///
/// Models wrap their answer in markdown fences, label it ("SQL: ..."), or
/// lead with commentary. This strips all of that, cuts from the first SQL
/// keyword, and collapses whitespace to a single line. If no SQL keyword
/// survives, the response counts as malformed.
pub fn extract_sql(raw: &str) -> Result<String, InferenceError> {
    let mut sql = raw.trim().to_string();

    sql = sql.replace("```sql", "").replace("```", "");
    let mut sql = sql.trim();

    for prefix in PREFIXES {
        if let Some(rest) = sql.strip_prefix(prefix) {
            sql = rest.trim_start();
        }
    }

    // Keywords are tried in priority order and the first one present wins,
    // so incidental English ("along with...") before the statement cannot
    // hijack the cut point away from the SELECT.
    let upper = sql.to_ascii_uppercase();
    let start = SQL_KEYWORDS
        .iter()
        .find_map(|kw| upper.find(kw))
        .ok_or_else(|| {
            InferenceError::MalformedResponse(format!(
                "no SQL statement in completion: {:?}",
                truncate(raw, 120)
            ))
        })?;

    let cleaned = sql[start..].split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return Err(InferenceError::MalformedResponse(
            "empty completion".to_string(),
        ));
    }
    Ok(cleaned)
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
