use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{keyword}' statements are blocked from execution; only SELECT and WITH queries run here")]
    NotReadOnly { keyword: String },

    #[error("not a recognizable SQL statement")]
    Unrecognized,
}

/// Check whether a candidate statement is a read-only selection form.
///
/// This is a shallow check on the leading keyword, not a parser, and not a
/// security boundary: it stops the demo from running writes the model emits
/// by accident, nothing more. A hostile SELECT passes it untouched.
pub fn validate_read_only(sql: &str) -> Result<(), ValidationError> {
    let keyword = leading_keyword(sql).ok_or(ValidationError::Unrecognized)?;
    if keyword.eq_ignore_ascii_case("SELECT") || keyword.eq_ignore_ascii_case("WITH") {
        Ok(())
    } else {
        Err(ValidationError::NotReadOnly {
            keyword: keyword.to_ascii_uppercase(),
        })
    }
}

/// First keyword of the statement, skipping whitespace and SQL comments.
fn leading_keyword(sql: &str) -> Option<String> {
    let mut rest = sql.trim_start();
    loop {
        if let Some(after) = rest.strip_prefix("--") {
            rest = after.split_once('\n').map(|(_, tail)| tail).unwrap_or("");
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.split_once("*/").map(|(_, tail)| tail)?;
        } else {
            break;
        }
        rest = rest.trim_start();
    }

    let keyword: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphabetic() || *c == '_')
        .collect();
    if keyword.is_empty() {
        None
    } else {
        Some(keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_select_and_with() {
        assert!(validate_read_only("SELECT * FROM employees").is_ok());
        assert!(validate_read_only("  select 1").is_ok());
        assert!(validate_read_only("WITH t AS (SELECT 1) SELECT * FROM t").is_ok());
        assert!(validate_read_only("with t as (select 1) select * from t").is_ok());
    }

    #[test]
    fn test_rejects_writes() {
        for sql in [
            "INSERT INTO employees VALUES (1)",
            "UPDATE employees SET salary = 0",
            "DELETE FROM employees",
            "DROP TABLE employees;",
            "CREATE TABLE x (id INTEGER)",
        ] {
            let err = validate_read_only(sql).unwrap_err();
            assert!(matches!(err, ValidationError::NotReadOnly { .. }), "{}", sql);
        }
    }

    #[test]
    fn test_reject_reports_offending_keyword() {
        let err = validate_read_only("drop table employees").unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotReadOnly { keyword: "DROP".to_string() }
        );
    }

    #[test]
    fn test_rejects_unrecognizable_input() {
        assert_eq!(validate_read_only(""), Err(ValidationError::Unrecognized));
        assert_eq!(validate_read_only("   "), Err(ValidationError::Unrecognized));
        assert_eq!(validate_read_only("42;"), Err(ValidationError::Unrecognized));
        assert_eq!(validate_read_only("-- only a comment"), Err(ValidationError::Unrecognized));
    }

    #[test]
    fn test_skips_comments_before_keyword() {
        assert!(validate_read_only("-- fetch everyone\nSELECT * FROM employees").is_ok());
        assert!(validate_read_only("/* note */ SELECT 1").is_ok());
        assert!(matches!(
            validate_read_only("-- note\nDROP TABLE employees"),
            Err(ValidationError::NotReadOnly { .. })
        ));
    }
}
