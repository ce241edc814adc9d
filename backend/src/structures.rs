//! Consistency checks for the `gst::Structure` accessors.
//!
//! Each check builds a small structure and reads it back through a different
//! accessor. The `structure-accessors` binary runs them all.

use gstreamer as gst;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum StructureError {
    #[error("Failed to parse structure {0:?}")]
    Parse(String),

    #[error("Failed to read field {field}: {reason}")]
    Field { field: String, reason: String },

    #[error("Expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },
}

/// A named check and its outcome.
pub type Check = (&'static str, fn() -> Result<(), StructureError>);

pub const CHECKS: &[Check] = &[
    ("typed getter", typed_getter),
    ("empty structure name", empty_structure_name),
    ("raw value", raw_value),
    ("string getter", string_getter),
    ("built fields", built_fields),
];

fn parse(description: &str) -> Result<gst::Structure, StructureError> {
    description
        .parse::<gst::Structure>()
        .map_err(|_| StructureError::Parse(description.to_string()))
}

fn field_error(field: &str, err: impl std::fmt::Display) -> StructureError {
    StructureError::Field {
        field: field.to_string(),
        reason: err.to_string(),
    }
}

fn expect_eq<T: PartialEq + std::fmt::Display>(expected: T, actual: T) -> Result<(), StructureError> {
    if expected == actual {
        Ok(())
    } else {
        Err(StructureError::Mismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

/// `it,what=wow` read with the generic getter into an owned string.
pub fn typed_getter() -> Result<(), StructureError> {
    let it = parse("it,what=wow")?;
    let what = it.get::<String>("what").map_err(|e| field_error("what", e))?;
    expect_eq("wow", what.as_str())
}

pub fn empty_structure_name() -> Result<(), StructureError> {
    let it = gst::Structure::new_empty("it");
    expect_eq("it", it.name().as_str())?;
    expect_eq(0, it.fields().count())
}

/// Same field, through the untyped `glib::Value`.
pub fn raw_value() -> Result<(), StructureError> {
    let it = parse("it,what=wow")?;
    let value = it.value("what").map_err(|e| field_error("what", e))?;
    let what = value.get::<&str>().map_err(|e| field_error("what", e))?;
    expect_eq("wow", what)
}

/// Same field, borrowed straight out of the structure.
pub fn string_getter() -> Result<(), StructureError> {
    let it = parse("it,what=wow")?;
    let what = it.get::<&str>("what").map_err(|e| field_error("what", e))?;
    expect_eq("wow", what)
}

/// Structure built field by field, read back with the typed getters.
pub fn built_fields() -> Result<(), StructureError> {
    let i = 1i32;
    let it = gst::Structure::builder("it")
        .field("what", "wow")
        .field("int", i)
        .build();

    let what = it.get::<&str>("what").map_err(|e| field_error("what", e))?;
    let i2 = it.get::<i32>("int").map_err(|e| field_error("int", e))?;
    expect_eq("wow", what)?;
    expect_eq(i, i2)?;
    // A wrong type is an error, not a silent default
    if it.get::<String>("int").is_ok() {
        return Err(field_error("int", "read an integer as a string"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_checks_pass() {
        gst::init().unwrap();
        for (name, check) in CHECKS {
            assert_eq!(check(), Ok(()), "check '{}' failed", name);
        }
    }

    #[test]
    fn test_parse_failure() {
        gst::init().unwrap();
        assert_eq!(
            parse(",,,").unwrap_err(),
            StructureError::Parse(",,,".to_string())
        );
    }

    #[test]
    fn test_mismatch_message() {
        let err = expect_eq("wow", "meh").unwrap_err();
        assert_eq!(err.to_string(), "Expected wow, got meh");
    }
}
