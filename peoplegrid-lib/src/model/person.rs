//! Person entity and relationship status

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use super::Value;
use super::fields;
use crate::error::FieldError;

/// Relationship status of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Relationship,
    Complicated,
    Single,
}

impl Status {
    /// All statuses, in the order the generator's thresholds produce them.
    pub const ALL: [Status; 3] = [Status::Relationship, Status::Complicated, Status::Single];

    /// Maps one uniform sample in `[0, 1)` to a status.
    ///
    /// `(0.66, 1]` is a relationship, `(0.33, 0.66]` is complicated and the
    /// rest is single. The same sample decides both thresholds.
    pub fn from_chance(chance: f64) -> Self {
        if chance > 0.66 {
            Status::Relationship
        } else if chance > 0.33 {
            Status::Complicated
        } else {
            Status::Single
        }
    }

    /// Returns the lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Relationship => "relationship",
            Status::Complicated => "complicated",
            Status::Single => "single",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relationship" => Ok(Status::Relationship),
            "complicated" => Ok(Status::Complicated),
            "single" => Ok(Status::Single),
            _ => Err(FieldError::parse(
                fields::STATUS,
                s,
                "relationship, complicated or single",
            )),
        }
    }
}

/// A synthetic person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub visits: u32,
    /// Profile completion, 0 to 100.
    pub progress: u32,
    pub status: Status,
}

impl Person {
    /// Reads a field by its column id.
    pub fn get(&self, field: &str) -> Result<Value, FieldError> {
        match field {
            fields::FIRST_NAME => Ok(Value::from(self.first_name.as_str())),
            fields::LAST_NAME => Ok(Value::from(self.last_name.as_str())),
            fields::AGE => Ok(Value::from(self.age)),
            fields::VISITS => Ok(Value::from(self.visits)),
            fields::PROGRESS => Ok(Value::from(self.progress)),
            fields::STATUS => Ok(Value::from(self.status.as_str())),
            _ => Err(FieldError::missing(field)),
        }
    }

    /// Writes a field by its column id.
    ///
    /// String values are coerced into the field's type, so the raw text of an
    /// edited cell can be passed straight through. The person is left
    /// untouched when the coercion fails.
    pub fn set(&mut self, field: &str, value: Value) -> Result<(), FieldError> {
        match field {
            fields::FIRST_NAME => self.first_name = text(field, value)?,
            fields::LAST_NAME => self.last_name = text(field, value)?,
            fields::AGE => self.age = count(field, value, u32::MAX)?,
            fields::VISITS => self.visits = count(field, value, u32::MAX)?,
            fields::PROGRESS => self.progress = count(field, value, 100)?,
            fields::STATUS => {
                self.status = match value {
                    Value::String(s) => s.parse()?,
                    other => {
                        return Err(FieldError::type_mismatch(field, "string", other.type_name()));
                    }
                }
            }
            _ => return Err(FieldError::missing(field)),
        }
        Ok(())
    }
}

fn text(field: &str, value: Value) -> Result<String, FieldError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Null => Err(FieldError::type_mismatch(field, "string", "null")),
        other => Ok(other.to_string()),
    }
}

fn count(field: &str, value: Value, max: u32) -> Result<u32, FieldError> {
    let expected = if max == 100 {
        "integer between 0 and 100"
    } else {
        "non-negative integer"
    };
    let n = match &value {
        Value::Int(n) => *n,
        Value::Float(n) if n.fract() == 0.0 => *n as i64,
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| FieldError::parse(field, s.as_str(), expected))?,
        other => return Err(FieldError::parse(field, other.to_string(), expected)),
    };
    if !(0..=max as i64).contains(&n) {
        return Err(FieldError::parse(field, n.to_string(), expected));
    }
    Ok(n as u32)
}
