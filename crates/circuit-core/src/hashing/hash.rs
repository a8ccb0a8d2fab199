//! Hash helpers sobre blake3.

use blake3::Hasher;
use serde::Serialize;
use serde_json::Value;

use super::to_canonical_json;
use crate::errors::SimulationError;

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    let mut h = Hasher::new();
    h.update(input.as_bytes());
    h.finalize().to_hex().to_string()
}

/// Hash del JSON canónico de `value`.
pub fn hash_value(value: &Value) -> String {
    hash_str(&to_canonical_json(value))
}

/// Serializa y hashea cualquier valor serializable.
pub fn fingerprint_of<T: Serialize + ?Sized>(value: &T) -> Result<String, SimulationError> {
    let v = serde_json::to_value(value)
        .map_err(|e| SimulationError::ComputationFailure(format!("fingerprint: {e}")))?;
    Ok(hash_value(&v))
}
