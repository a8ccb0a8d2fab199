//! Hashing y canonicalización JSON para fingerprints de diseño y resultados.

pub mod canonical_json;
pub mod hash;

pub use canonical_json::to_canonical_json;
pub use hash::{fingerprint_of, hash_str, hash_value};
