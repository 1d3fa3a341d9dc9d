use std::time::Duration;

use serde_json::{json, Value};

use crate::inference::{build_sql_prompt, extract_sql, InferenceError};
use crate::schema::{parse_schema_text, Schema, SchemaOrigin};

const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Prompt-in, text-out view of the hosted model. The client's retry and
/// parsing behavior only depends on this trait, so tests can substitute a
/// scripted endpoint instead of the network.
pub trait InferenceEndpoint: Send + Sync {
    /// Send a text prompt, return the raw completion.
    fn complete(&self, prompt: &str) -> Result<String, InferenceError>;

    /// Send raw image bytes with their MIME type, return the model's textual
    /// description of the image.
    fn describe_image(&self, bytes: &[u8], mime: &str) -> Result<String, InferenceError>;
}

/// Hugging-Face-style hosted inference endpoint reached over HTTP. One URL
/// per model; an optional bearer token lifts the anonymous rate limit.
pub struct HostedEndpoint {
    base_url: String,
    text_model: String,
    vision_model: String,
    api_token: Option<String>,
    timeout: Duration,
}

impl HostedEndpoint {
    pub fn new(
        base_url: &str,
        text_model: &str,
        vision_model: &str,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            text_model: text_model.to_string(),
            vision_model: vision_model.to_string(),
            api_token,
            timeout,
        }
    }

    fn request(&self, model: &str) -> ureq::Request {
        let url = format!("{}/{}", self.base_url, model);
        let mut req = ureq::post(&url).timeout(self.timeout);
        if let Some(token) = &self.api_token {
            req = req.set("Authorization", &format!("Bearer {}", token));
        }
        req
    }

    /// Completions come back as `[{"generated_text": "..."}]`.
    fn generated_text(value: Value) -> Result<String, InferenceError> {
        value
            .get(0)
            .and_then(|entry| entry.get("generated_text"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                InferenceError::MalformedResponse(format!("unexpected response shape: {}", value))
            })
    }

    fn classify_error(err: ureq::Error) -> InferenceError {
        match err {
            ureq::Error::Status(429, _) => InferenceError::RateLimited,
            ureq::Error::Status(503, response) => {
                // A 503 with an "estimated_time" body is the host warming the
                // model up; anything else is plain unavailability.
                let loading = response
                    .into_json::<Value>()
                    .map(|body| body.get("estimated_time").is_some())
                    .unwrap_or(false);
                if loading {
                    InferenceError::ModelLoading
                } else {
                    InferenceError::Network("endpoint returned HTTP 503".to_string())
                }
            }
            ureq::Error::Status(code, _) => {
                InferenceError::Network(format!("endpoint returned HTTP {}", code))
            }
            ureq::Error::Transport(transport) => InferenceError::Network(transport.to_string()),
        }
    }
}

impl InferenceEndpoint for HostedEndpoint {
    fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        let payload = json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": 200,
                "temperature": 0.1,
                "do_sample": false,
                "return_full_text": false,
            },
        });

        let response = self
            .request(&self.text_model)
            .send_json(payload)
            .map_err(Self::classify_error)?;
        let body: Value = response
            .into_json()
            .map_err(|e| InferenceError::MalformedResponse(e.to_string()))?;
        Self::generated_text(body)
    }

    fn describe_image(&self, bytes: &[u8], mime: &str) -> Result<String, InferenceError> {
        let response = self
            .request(&self.vision_model)
            .set("Content-Type", mime)
            .send_bytes(bytes)
            .map_err(Self::classify_error)?;
        let body: Value = response
            .into_json()
            .map_err(|e| InferenceError::MalformedResponse(e.to_string()))?;
        Self::generated_text(body)
    }
}

/// Orchestrates prompt building, the endpoint call, retry on cold start, and
/// response cleanup. Stateless between calls; nothing is cached.
pub struct InferenceClient {
    endpoint: Box<dyn InferenceEndpoint>,
    retry_delay: Duration,
}

impl InferenceClient {
    pub fn new(endpoint: Box<dyn InferenceEndpoint>) -> Self {
        Self {
            endpoint,
            retry_delay: RETRY_DELAY,
        }
    }

    #[cfg(test)]
    fn without_delay(endpoint: Box<dyn InferenceEndpoint>) -> Self {
        Self {
            endpoint,
            retry_delay: Duration::ZERO,
        }
    }

    /// Generate a candidate SQL statement for `question` against `schema`.
    /// The caller keeps the schema snapshot; this returns only the SQL text.
    pub fn generate_sql(&self, schema: &Schema, question: &str) -> Result<String, InferenceError> {
        let prompt = build_sql_prompt(schema, question);
        let raw = self.call_with_retry(|| self.endpoint.complete(&prompt))?;
        extract_sql(&raw)
    }

    /// Ask the vision model to read a schema diagram. The result is tagged
    /// unverified; the user edits and confirms it before generation.
    pub fn extract_schema_from_image(
        &self,
        bytes: &[u8],
        mime: &str,
    ) -> Result<Schema, InferenceError> {
        let raw = self.call_with_retry(|| self.endpoint.describe_image(bytes, mime))?;
        let text = preformat_extracted(&raw);
        parse_schema_text(&text, SchemaOrigin::Image { verified: false })
            .map_err(|e| InferenceError::MalformedResponse(e.to_string()))
    }

    /// Retry only on the cold-start signal, a bounded number of times with a
    /// fixed delay. Every other error kind surfaces immediately.
    fn call_with_retry<F>(&self, call: F) -> Result<String, InferenceError>
    where
        F: Fn() -> Result<String, InferenceError>,
    {
        let mut attempt = 1;
        loop {
            match call() {
                Err(InferenceError::ModelLoading) if attempt < MAX_ATTEMPTS => {
                    log::warn!(
                        "model loading, retrying (attempt {}/{})",
                        attempt,
                        MAX_ATTEMPTS
                    );
                    std::thread::sleep(self.retry_delay);
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

/// Normalize free-form vision output toward the outline format the schema
/// parser accepts: lines that mention a table become table headers, lines
/// that look like column definitions get the leading dash.
fn preformat_extracted(raw: &str) -> String {
    let mut out = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let lower = line.to_lowercase();
        if lower.starts_with("table") || lower.contains("create table") || lower.starts_with("entity") {
            let name: String = line
                .split_whitespace()
                .last()
                .unwrap_or("")
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            if !name.is_empty() {
                out.push(format!("Table: {}", name));
            }
        } else if line.contains(':') {
            let body = line.trim_start_matches('-').trim();
            out.push(format!("  - {}", body));
        } else {
            out.push(line.to_string());
        }
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    struct ScriptedEndpoint {
        responses: Mutex<VecDeque<Result<String, InferenceError>>>,
        calls: Arc<AtomicU32>,
    }

    impl ScriptedEndpoint {
        fn new(responses: Vec<Result<String, InferenceError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Arc::new(AtomicU32::new(0)),
            }
        }

        fn call_counter(&self) -> Arc<AtomicU32> {
            Arc::clone(&self.calls)
        }
    }

    impl InferenceEndpoint for ScriptedEndpoint {
        fn complete(&self, _prompt: &str) -> Result<String, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(InferenceError::Network("script exhausted".to_string())))
        }

        fn describe_image(&self, _bytes: &[u8], _mime: &str) -> Result<String, InferenceError> {
            self.complete("")
        }
    }

    fn schema() -> Schema {
        parse_schema_text(
            "Table: employees\n  - id: INTEGER\n  - department: TEXT",
            SchemaOrigin::Manual,
        )
        .unwrap()
    }

    #[test]
    fn test_successful_generation() {
        let client = InferenceClient::without_delay(Box::new(ScriptedEndpoint::new(vec![Ok(
            "SELECT * FROM employees".to_string(),
        )])));
        let sql = client.generate_sql(&schema(), "show everyone").unwrap();
        assert_eq!(sql, "SELECT * FROM employees");
    }

    #[test]
    fn test_retries_through_cold_start_then_succeeds() {
        let endpoint = Box::new(ScriptedEndpoint::new(vec![
            Err(InferenceError::ModelLoading),
            Err(InferenceError::ModelLoading),
            Ok("SELECT 1".to_string()),
        ]));
        let client = InferenceClient::without_delay(endpoint);
        let sql = client.generate_sql(&schema(), "anything").unwrap();
        assert_eq!(sql, "SELECT 1");
    }

    #[test]
    fn test_bounded_retries_surface_model_loading() {
        let endpoint = ScriptedEndpoint::new(vec![
            Err(InferenceError::ModelLoading),
            Err(InferenceError::ModelLoading),
            Err(InferenceError::ModelLoading),
            Ok("SELECT 1".to_string()), // never reached
        ]);
        let calls = endpoint.call_counter();
        let client = InferenceClient::without_delay(Box::new(endpoint));
        let err = client.generate_sql(&schema(), "anything").unwrap_err();
        assert!(matches!(err, InferenceError::ModelLoading));
        // exactly MAX_ATTEMPTS calls, no more
        assert_eq!(calls.load(Ordering::SeqCst), MAX_ATTEMPTS);
    }

    #[test]
    fn test_never_retries_other_errors() {
        let endpoint = ScriptedEndpoint::new(vec![
            Err(InferenceError::Network("down".to_string())),
            Ok("SELECT 1".to_string()), // would succeed if retried
        ]);
        let calls = endpoint.call_counter();
        let client = InferenceClient::without_delay(Box::new(endpoint));
        let err = client.generate_sql(&schema(), "anything").unwrap_err();
        assert!(matches!(err, InferenceError::Network(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rate_limited_not_retried() {
        let endpoint = Box::new(ScriptedEndpoint::new(vec![Err(InferenceError::RateLimited)]));
        let client = InferenceClient::without_delay(endpoint);
        let err = client.generate_sql(&schema(), "anything").unwrap_err();
        assert!(matches!(err, InferenceError::RateLimited));
    }

    #[test]
    fn test_generated_candidate_runs_against_demo_data() {
        use crate::db::DemoDatabase;
        use crate::sql::validate_read_only;

        let completion =
            "```sql\nSELECT name, department FROM employees WHERE department = 'Engineering'\n```";
        let client = InferenceClient::without_delay(Box::new(ScriptedEndpoint::new(vec![Ok(
            completion.to_string(),
        )])));

        let db = DemoDatabase::open().unwrap();
        let schema = db.schema().unwrap();
        let sql = client
            .generate_sql(&schema, "Show all employees in the Engineering department")
            .unwrap();

        validate_read_only(&sql).unwrap();
        let (columns, rows) = db.execute_query(&sql).unwrap();
        assert_eq!(columns[1].name, "department");
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row[1] == "Engineering"));
    }

    #[test]
    fn test_image_extraction_parses_outline() {
        let reply = "The image shows a database diagram.\nTable: customers\nid: INTEGER\nname: VARCHAR";
        let client = InferenceClient::without_delay(Box::new(ScriptedEndpoint::new(vec![Ok(
            reply.to_string(),
        )])));
        let schema = client
            .extract_schema_from_image(b"\x89PNG", "image/png")
            .unwrap();
        assert_eq!(schema.table_names(), vec!["customers"]);
        assert_eq!(schema.tables[0].columns.len(), 2);
        assert!(!schema.is_verified());
    }

    #[test]
    fn test_image_extraction_without_tables_is_malformed() {
        let client = InferenceClient::without_delay(Box::new(ScriptedEndpoint::new(vec![Ok(
            "a photo of a cat".to_string(),
        )])));
        let err = client
            .extract_schema_from_image(b"\xff\xd8", "image/jpeg")
            .unwrap_err();
        assert!(matches!(err, InferenceError::MalformedResponse(_)));
    }
}
