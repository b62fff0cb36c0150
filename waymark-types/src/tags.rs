//! Key/value tags attached to map objects.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Single key/value pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tag {
    /// Tag key.
    pub key: String,
    /// Tag value.
    pub value: String,
}

/// Ordered list of tags. Keys are expected to be unique, but this is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TagList {
    tags: Vec<Tag>,
}

impl TagList {
    /// Value of the first tag with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.value.as_str())
    }

    /// Whether a tag with the given key is present.
    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Appends a tag.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.push(Tag {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Iterates over the tags in order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the list has no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagList {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            tags: iter
                .into_iter()
                .map(|(key, value)| Tag {
                    key: key.into(),
                    value: value.into(),
                })
                .collect(),
        }
    }
}
