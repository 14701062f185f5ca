//! Task record and its external view.

use serde::{Deserialize, Deserializer, Serialize};

/// Maximum title length, counted in UTF-16 code units.
pub const TITLE_MAX_CHARS: usize = 100;
/// Maximum description length, counted in UTF-16 code units.
pub const DESCRIPTION_MAX_CHARS: usize = 255;

/// Reads an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn text_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Stored representation of a task.
///
/// `id` is `None` until the store assigns one on first insert; a record read
/// back from a store always carries an id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskRecord {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Task as exchanged over the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskView {
    #[serde(default)]
    pub id: Option<i64>,
    /// Missing or null titles deserialize to "" so they surface as a validation failure.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
}

/// A single failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl TaskView {
    /// Check field constraints, reporting every failing field.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        }
        if text_len(&self.title) > TITLE_MAX_CHARS {
            errors.push(FieldError::new(
                "title",
                "Title must be at most 100 characters",
            ));
        }

        if let Some(description) = &self.description {
            if text_len(description) > DESCRIPTION_MAX_CHARS {
                errors.push(FieldError::new(
                    "description",
                    "Description must be at most 255 characters",
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(title: &str, description: Option<&str>) -> TaskView {
        TaskView {
            id: None,
            title: title.to_string(),
            description: description.map(str::to_string),
            completed: false,
        }
    }

    #[test]
    fn test_valid_view_passes() {
        assert!(view("Buy milk", Some("2%")).validate().is_ok());
        assert!(view("Buy milk", None).validate().is_ok());
        assert!(view(&"a".repeat(100), Some("b".repeat(255).as_str()))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        for title in ["", "   ", "\t\n"] {
            let errors = view(title, None).validate().unwrap_err();
            assert_eq!(errors, vec![FieldError::new("title", "Title is required")]);
        }
    }

    #[test]
    fn test_blank_and_overlong_title_reports_both() {
        let errors = view(&" ".repeat(101), None).validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::new("title", "Title is required"),
                FieldError::new("title", "Title must be at most 100 characters"),
            ]
        );
    }

    #[test]
    fn test_length_limits_count_utf16_units() {
        // 'é' is one UTF-16 unit, so 100 of them fit
        assert!(view(&"é".repeat(100), None).validate().is_ok());
        // each emoji is a surrogate pair: 50 fit, 51 do not
        assert!(view(&"😀".repeat(50), None).validate().is_ok());
        let errors = view(&"😀".repeat(51), None).validate().unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new("title", "Title must be at most 100 characters")]
        );

        let errors = view(&"a".repeat(101), Some("b".repeat(256).as_str()))
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "title");
        assert_eq!(errors[1].field, "description");
        assert_eq!(
            errors[1].to_string(),
            "description: Description must be at most 255 characters"
        );
    }

    #[test]
    fn test_view_json_defaults() {
        let parsed: TaskView = serde_json::from_str(r#"{"description":"x"}"#).unwrap();
        assert_eq!(parsed.id, None);
        assert_eq!(parsed.title, "");
        assert!(!parsed.completed);

        let parsed: TaskView =
            serde_json::from_str(r#"{"title":null,"description":null,"completed":null}"#)
                .unwrap();
        assert_eq!(parsed.title, "");
        assert_eq!(parsed.description, None);
        assert!(!parsed.completed);

        let json = serde_json::to_value(view("Buy milk", None)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": null,
                "title": "Buy milk",
                "description": null,
                "completed": false
            })
        );
    }
}
