//! The chain container.
//!
//! A [`Chain`] is a hash map of string-like keys to JSON-serializable values
//! with a fluent mutation API. Merges are shallow and key-by-key:
//!
//! - [`Chain::copy`] overwrites colliding keys (last writer wins).
//! - [`Chain::append`] keeps existing keys (first writer wins).
//! - [`Chain::append_from_bytes`] decodes JSON and overwrites colliding keys.

use crate::encode;
use crate::error::{ChainError, Result};
use crate::output::Output;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::hash_map;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use tracing::{debug, trace};

/// Bound for chain keys.
///
/// Keys must have a canonical string form. `AsRef<str>` supplies it, and it
/// becomes the JSON object field name. Implemented for every type that
/// satisfies the bounds.
pub trait ChainKey: Eq + Hash + Clone + AsRef<str> + Serialize + DeserializeOwned {}

impl<T> ChainKey for T where T: Eq + Hash + Clone + AsRef<str> + Serialize + DeserializeOwned {}

/// A key-value container that serializes as a JSON object.
///
/// Serialized keys are sorted by their string form, so equal chains encode
/// to identical bytes.
#[derive(Clone, Debug, Deserialize)]
#[serde(transparent)]
#[serde(bound(deserialize = "K: Deserialize<'de> + Eq + Hash, V: Deserialize<'de>"))]
pub struct Chain<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Chain<K, V> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the chain holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry, returning the now-empty chain.
    pub fn clear(&mut self) -> &mut Self {
        self.entries.clear();
        self
    }

    /// Replace the whole content with `other`'s entries.
    pub fn load(&mut self, other: Chain<K, V>) {
        debug!(entries = other.len(), "loading chain");
        self.entries = other.entries;
    }

    /// Call `f` once per entry, in unspecified order.
    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in &self.entries {
            f(key, value);
        }
    }

    /// Iterate over entries in unspecified order.
    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.entries.iter()
    }

    /// Iterate over entries with mutable values.
    pub fn iter_mut(&mut self) -> hash_map::IterMut<'_, K, V> {
        self.entries.iter_mut()
    }

    /// Iterate over keys in unspecified order.
    pub fn keys(&self) -> hash_map::Keys<'_, K, V> {
        self.entries.keys()
    }

    /// Iterate over values in unspecified order.
    pub fn values(&self) -> hash_map::Values<'_, K, V> {
        self.entries.values()
    }

    /// Consume the chain and return the underlying map.
    pub fn into_inner(self) -> HashMap<K, V> {
        self.entries
    }
}

impl<K: ChainKey, V> Chain<K, V> {
    /// Insert or overwrite the value at `key`.
    pub fn set(&mut self, key: impl Into<K>, value: impl Into<V>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Insert the value at `key`, failing if the key is already present.
    ///
    /// The chain is left unmodified on failure.
    pub fn set_with_error(&mut self, key: impl Into<K>, value: impl Into<V>) -> Result<&mut Self> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(ChainError::KeyAlreadyExist(key.as_ref().to_string()));
        }
        Ok(self.set(key, value))
    }

    /// Get a copy of the value at `key`, or `V::default()` if absent.
    ///
    /// An absent key and a key holding the default value look the same here.
    /// Use [`Chain::get_with_error`] or [`Chain::contains_key`] to tell them apart.
    pub fn get<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone + Default,
    {
        self.entries.get(key).cloned().unwrap_or_default()
    }

    /// Get the value at `key`, failing if the key is absent.
    pub fn get_with_error<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + AsRef<str> + ?Sized,
    {
        self.entries
            .get(key)
            .ok_or_else(|| ChainError::KeyNotExist(key.as_ref().to_string()))
    }

    /// True if `key` is present, whatever its value.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key)
    }

    /// Set every entry of `other` into this chain, overwriting colliding keys.
    pub fn copy(&mut self, other: &Chain<K, V>)
    where
        V: Clone,
    {
        other.each(|key, value| {
            self.set(key.clone(), value.clone());
        });
    }

    /// Set every entry of `other` into this chain, keeping existing values on
    /// colliding keys.
    pub fn append(&mut self, other: &Chain<K, V>)
    where
        V: Clone,
    {
        other.each(|key, value| {
            if let Err(e) = self.set_with_error(key.clone(), value.clone()) {
                trace!(error = %e, "append skipped colliding key");
            }
        });
    }

    /// True if both chains hold the same keys with equal values.
    pub fn equal(&self, other: &Chain<K, V>) -> bool
    where
        V: PartialEq,
    {
        self.entries == other.entries
    }
}

impl<K: ChainKey, V: DeserializeOwned> Chain<K, V> {
    /// Replace the whole content with the entries of a JSON object.
    ///
    /// A JSON `null` document yields an empty chain. On failure the chain is
    /// left as it was.
    pub fn load_from_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.entries = Self::decode(data)?;
        Ok(())
    }

    /// Merge the entries of a JSON object into this chain, overwriting
    /// colliding keys.
    ///
    /// A JSON `null` document is a no-op. On failure the chain is left as it was.
    pub fn append_from_bytes(&mut self, data: &[u8]) -> Result<()> {
        let decoded = Self::decode(data)?;
        self.entries.extend(decoded);
        Ok(())
    }

    fn decode(data: &[u8]) -> Result<HashMap<K, V>> {
        let decoded: Option<HashMap<K, V>> = serde_json::from_slice(data).map_err(|e| {
            debug!(error = %e, bytes = data.len(), "failed to decode chain");
            ChainError::decode(e)
        })?;
        Ok(decoded.unwrap_or_default())
    }
}

impl<K: ChainKey, V: Serialize> Chain<K, V> {
    /// Serialize the chain as a compact JSON object with sorted keys.
    ///
    /// Fails if a value cannot be encoded, including NaN and infinite floats.
    pub fn to_json(&self) -> Result<Output> {
        encode::check(self)
            .map_err(|e| ChainError::Encode(e.to_string()))
            .and_then(|()| serde_json::to_vec(self).map_err(ChainError::encode))
            .map(Output::from)
            .map_err(|e| {
                debug!(error = %e, entries = self.len(), "failed to encode chain");
                e
            })
    }
}

impl<K: AsRef<str>, V: Serialize> Serialize for Chain<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&str, &V> = self
            .entries
            .iter()
            .map(|(key, value)| (key.as_ref(), value))
            .collect();
        serializer.collect_map(sorted)
    }
}

impl<K, V> Default for Chain<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for Chain<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq + Hash, V: Eq> Eq for Chain<K, V> {}

impl<K, V> From<HashMap<K, V>> for Chain<K, V> {
    fn from(entries: HashMap<K, V>) -> Self {
        Self { entries }
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for Chain<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K: Eq + Hash, V> Extend<(K, V)> for Chain<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<K, V> IntoIterator for Chain<K, V> {
    type Item = (K, V);
    type IntoIter = hash_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Chain<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
