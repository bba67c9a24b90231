//! Custom serde helpers for API wire formats.

/// Deserializes `null` as `T::default()`.
///
/// The API sends `null` rather than `[]`/`{}` for empty collections on some
/// older endpoints. Use together with `#[serde(default)]` so a missing key
/// works too.
pub mod null_as_default {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
