//! JSON decoding for building documents.
//!
//! Area trees nest to any depth, and every level costs the parser two
//! nesting steps (the area object and its `areas` array). `serde_json`'s
//! default recursion limit of 128 would reject trees past ~64 levels, so
//! documents are decoded with the limit disabled and the stack grown on
//! demand instead.

use serde::de::DeserializeOwned;

/// Decode `json` into `T` without a nesting limit.
///
/// # Errors
///
/// Returns the `serde_json` error when `json` is malformed, does not match
/// `T`, or has trailing characters.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}
