// FAQ Domain Model (belongs to a Page)

use super::error::{Result, ValidationErrors};
use super::page::PageId;
use super::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// FAQ ID (SQLite rowid)
pub type FaqId = i64;

/// Highest explicit `order` a client may set
pub const MAX_FAQ_ORDER: i64 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub id: FaqId,
    pub page_id: PageId,
    pub question: String,
    pub answer: String,
    #[serde(rename = "order")]
    pub sort_order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

/// Create / update payload. A missing `order` appends on create and keeps the
/// current position on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqInput {
    pub question: String,
    pub answer: String,
    #[serde(default, rename = "order")]
    pub sort_order: Option<i64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl FaqInput {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            sort_order: None,
            is_active: true,
        }
    }

    pub fn normalize(&mut self) {
        validate::trim(&mut self.question);
        validate::trim(&mut self.answer);
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        validate::required(&mut errors, "question", &self.question, 500);
        validate::required(&mut errors, "answer", &self.answer, 10_000);
        match self.sort_order {
            Some(order) if order < 0 => errors.add("order", "must not be negative"),
            Some(order) if order > MAX_FAQ_ORDER => {
                errors.add("order", format!("must be at most {}", MAX_FAQ_ORDER))
            }
            _ => {}
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_defaults() {
        let input: FaqInput =
            serde_json::from_value(json!({"question": "Why?", "answer": "Because."})).unwrap();
        assert!(input.is_active);
        assert_eq!(input.sort_order, None);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_order_field_name_on_the_wire() {
        let input: FaqInput = serde_json::from_value(
            json!({"question": "Q", "answer": "A", "order": 3, "is_active": false}),
        )
        .unwrap();
        assert_eq!(input.sort_order, Some(3));
        assert!(!input.is_active);
    }

    #[test]
    fn test_rejects_blank_and_negative() {
        let mut input = FaqInput::new("  ", "answer");
        input.sort_order = Some(-1);
        input.normalize();
        let err = input.validate().unwrap_err().to_string();
        assert!(err.contains("question"));
        assert!(err.contains("order"));
    }

    #[test]
    fn test_order_upper_bound() {
        let mut input = FaqInput::new("Q", "A");
        input.sort_order = Some(MAX_FAQ_ORDER);
        assert!(input.validate().is_ok());

        input.sort_order = Some(i64::MAX);
        let err = input.validate().unwrap_err().to_string();
        assert!(err.contains("order"));
    }
}
