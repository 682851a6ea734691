//! Typed entity models and request DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` create/update DTOs with per-field rules
//!
//! Body DTOs reject unknown fields and declare every field as `Option` so
//! that a missing required field is reported per field instead of failing
//! deserialization wholesale.

pub mod admin;
pub mod profile;
pub mod project;
pub mod prompt;
pub mod segment;
pub mod validator;

/// Field names of a DTO in declaration order.
///
/// Validation failures are reported as an ordered list of per-field entries;
/// this constant fixes the order, since the validator's error map is not.
pub trait DeclaredFields {
    const FIELDS: &'static [&'static str];
}

/// Deserializer for optional DTO fields that rejects an explicit `null`.
///
/// Absence means "use the default" on create and "leave unchanged" on
/// update; `null` is a type error, the same as any other wrong type. Pair
/// with `#[serde(default)]` so absent fields still read as `None`.
pub(crate) fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
