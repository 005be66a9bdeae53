//! Wire fields that tell an explicit `null` apart from a missing key
//!
//! Optional wire fields are declared as `Option<Option<T>>`:
//!
//! - `None`: the key was absent, and is left out again on the way back
//! - `Some(None)`: the server sent `null`
//! - `Some(Some(v))`: the server sent a value
//!
//! Domain types keep plain `Option<T>` fields and record the keys that
//! arrived as `null` in a [`Nulls`] set, so an unchanged entity serializes
//! back to the JSON it came from.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;

/// Wire keys the server sent as `null`
pub type Nulls = BTreeSet<&'static str>;

/// Deserialize a present key as `Some(..)`, so `null` becomes `Some(None)`
///
/// Used with `#[serde(default)]`, which leaves a missing key as `None`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Domain value of an inbound field, recording `key` when it was `null`
pub(crate) fn inbound<T>(field: Option<Option<T>>, key: &'static str, nulls: &mut Nulls) -> Option<T> {
    match field {
        Some(Some(value)) => Some(value),
        Some(None) => {
            nulls.insert(key);
            None
        }
        None => None,
    }
}

/// Wire form of a domain value: set, `null` when it arrived as `null`, or absent
pub(crate) fn outbound<T>(value: Option<T>, key: &'static str, nulls: &Nulls) -> Option<Option<T>> {
    match value {
        Some(value) => Some(Some(value)),
        None if nulls.contains(key) => Some(None),
        None => None,
    }
}
