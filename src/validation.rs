//! Presence checks for incoming payloads.
//!
//! Payload structs keep their required fields as `Option`s so that a missing
//! field surfaces as a 422 listing every absent field, instead of a serde
//! rejection that stops at the first one.
//!
//! ```rust,ignore
//! let mut required = Required::new();
//! let name = required.text("name", input.name);
//! let date = required.value("date", input.date);
//! required.finish()?;
//! ```

use crate::calc;
use crate::errors::ApiError;
use chrono::NaiveTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use serde_with::{DeserializeAs, Same, SerializeAs};
use std::marker::PhantomData;

#[derive(Debug, Default)]
pub struct Required {
    missing: Vec<String>,
}

impl Required {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the trimmed-non-empty text, recording the field as missing
    /// otherwise. The returned placeholder is only meaningful if
    /// [`Required::finish`] succeeds.
    pub fn text(&mut self, field: &str, value: Option<String>) -> String {
        match value {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                self.missing.push(format!("{field} is required"));
                String::new()
            }
        }
    }

    pub fn value<T: Default>(&mut self, field: &str, value: Option<T>) -> T {
        value.unwrap_or_else(|| {
            self.missing.push(format!("{field} is required"));
            T::default()
        })
    }

    /// # Errors
    ///
    /// Returns `ApiError::ValidationFailed` naming every missing field.
    pub fn finish(self) -> Result<(), ApiError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_failed(self.missing))
        }
    }
}

/// `serde_with` adapter for form fields: `null` and blank strings become
/// `None`, anything else goes through `U`.
///
/// HTML forms submit `""` for an untouched date, number or select, so
/// without this a blank optional field would be rejected as malformed and a
/// blank required field would never reach [`Required`].
///
/// ```rust,ignore
/// #[serde_as(as = "BlankAsNone<PickFirst<(_, DisplayFromStr)>>")]
/// pub employee_id: Option<i32>,
/// ```
pub struct BlankAsNone<U = Same>(PhantomData<U>);

impl<'de, T, U> DeserializeAs<'de, Option<T>> for BlankAsNone<U>
where
    U: DeserializeAs<'de, T>,
{
    fn deserialize_as<D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match &value {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::String(text) if text.trim().is_empty() => Ok(None),
            _ => U::deserialize_as(value).map(Some).map_err(D::Error::custom),
        }
    }
}

impl<T, U> SerializeAs<Option<T>> for BlankAsNone<U>
where
    U: SerializeAs<T>,
{
    fn serialize_as<S>(source: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match source {
            Some(value) => U::serialize_as(value, serializer),
            None => serializer.serialize_none(),
        }
    }
}

/// Rejects NaN and infinities, which parse as numbers but cannot be stored.
///
/// # Errors
///
/// Returns `ApiError::BadRequest` naming the field.
pub fn finite(field: &str, value: f64) -> Result<f64, ApiError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ApiError::bad_request(format!(
            "{field} must be a finite number, got '{value}'"
        )))
    }
}

/// Parses an optional `HH:MM` field; blank strings count as absent.
///
/// # Errors
///
/// Returns `ApiError::BadRequest` when the value is not a time of day.
pub fn time_of_day(field: &str, value: Option<&str>) -> Result<Option<NaiveTime>, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => calc::parse_time_of_day(value).map(Some).map_err(|_| {
            ApiError::bad_request(format!("{field} must be a time of day (HH:MM), got '{value}'"))
        }),
    }
}
