//! Serde glue for `[T; N]` fields of arbitrary length
//!
//! Serde only implements its traits for arrays up to length 32 and not for a
//! generic `N`, so the const-generic value types route their storage through
//! these functions with `#[serde(with = "crate::serde_array")]`. Arrays are
//! written as plain sequences.

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub(crate) fn serialize<S, T, const N: usize>(array: &[T; N], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    serializer.collect_seq(array.iter())
}

pub(crate) fn deserialize<'de, D, T, const N: usize>(deserializer: D) -> Result<[T; N], D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let elems = Vec::<T>::deserialize(deserializer)?;
    let len = elems.len();
    elems
        .try_into()
        .map_err(|_| D::Error::invalid_length(len, &format!("a sequence of length {}", N).as_str()))
}
