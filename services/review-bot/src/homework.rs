//! Homework API response validation and status formatting

use serde_json::Value;

use crate::error::ValidationError;
use crate::status::ReviewStatus;

const HOMEWORKS_KEY: &str = "homeworks";

/// A single homework submission extracted from an API record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Homework {
    pub name: String,
    pub status: ReviewStatus,
}

impl Homework {
    /// Extract name and status from a raw homework record
    pub fn from_record(record: &Value) -> Result<Self, ValidationError> {
        let record = record
            .as_object()
            .ok_or_else(|| ValidationError::WrongType(describe("homework record", record)))?;

        let name = record
            .get("homework_name")
            .and_then(Value::as_str)
            .ok_or(ValidationError::MissingField("homework_name"))?;
        let status = record
            .get("status")
            .and_then(Value::as_str)
            .ok_or(ValidationError::MissingField("status"))?;

        Ok(Self {
            name: name.to_string(),
            status: status.parse()?,
        })
    }

    /// Human-readable notification text for this submission
    pub fn message(&self) -> String {
        format!(
            "Changed review status of \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

/// Check the shape of a decoded API response and return its homework records.
///
/// The checks run in a fixed order: the body must be an object, `homeworks`
/// must be present and a list, and the list must not be empty. An empty list
/// is an error, not "no news".
pub fn check_response(response: &Value) -> Result<&[Value], ValidationError> {
    let body = response
        .as_object()
        .ok_or_else(|| ValidationError::WrongType(describe("API response", response)))?;

    let homeworks = body
        .get(HOMEWORKS_KEY)
        .ok_or(ValidationError::MissingKey(HOMEWORKS_KEY))?;

    let homeworks = homeworks
        .as_array()
        .ok_or_else(|| ValidationError::WrongType(describe(HOMEWORKS_KEY, homeworks)))?;

    if homeworks.is_empty() {
        return Err(ValidationError::EmptyHomeworks);
    }

    Ok(homeworks.as_slice())
}

/// Render the notification text for a single homework record
pub fn parse_status(record: &Value) -> Result<String, ValidationError> {
    Homework::from_record(record).map(|homework| homework.message())
}

fn describe(what: &str, value: &Value) -> String {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    };
    format!("{} is {}", what, kind)
}
