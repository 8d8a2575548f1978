//! Resource tags and their reconciliation against the service
//!
//! Tags reach a handler from three places: the `Tags` property of the model,
//! the stack-level tags CloudFormation propagates to every resource, and the
//! `aws:`-prefixed system tags. Only the first two are ever changed by an
//! update; keys with the reserved `aws:` prefix are left alone.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::form_urlencoded;

use crate::{api::IotApi, Error};

mod error;
mod helpers;
mod svc;

pub use error::{ParseTagError, ParseTagsError};

pub(crate) const RESERVED_PREFIX: &str = "aws:";
pub(crate) const MAX_KEY_LENGTH: usize = 128;
pub(crate) const MAX_VALUE_LENGTH: usize = 256;

helpers::tag_string!(
    #[derive(PartialOrd, Ord, Hash)]
    TagKey
);

impl TagKey {
    pub fn is_reserved(&self) -> bool {
        self.0.starts_with(RESERVED_PREFIX)
    }
}

helpers::tag_string!(TagValue);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    key: TagKey,
    value: TagValue,
}

impl Tag {
    pub fn new(key: impl Into<TagKey>, value: impl Into<TagValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub const fn key(&self) -> &TagKey {
        &self.key
    }

    pub const fn value(&self) -> &TagValue {
        &self.value
    }

    /// Checks a user-supplied tag against the IoT tag restrictions.
    pub fn validate(&self) -> Result<(), ParseTagError> {
        if self.key.is_empty() {
            return Err(ParseTagError::EmptyKey);
        }
        if self.key.char_len() > MAX_KEY_LENGTH {
            return Err(ParseTagError::KeyTooLong {
                key: self.key.clone(),
            });
        }
        if self.value.char_len() > MAX_VALUE_LENGTH {
            return Err(ParseTagError::ValueTooLong {
                key: self.key.clone(),
            });
        }
        if self.key.is_reserved() {
            return Err(ParseTagError::ReservedKey {
                key: self.key.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TagList(Vec<Tag>);

impl TagList {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn join(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    pub const fn from_vec(value: Vec<Tag>) -> Self {
        Self(value)
    }

    pub fn from_map(map: BTreeMap<String, String>) -> Self {
        Self(
            map.into_iter()
                .map(|(key, value)| Tag::new(key, value))
                .collect(),
        )
    }

    pub fn get(&self, key: impl Into<TagKey>) -> Option<&Tag> {
        let key: TagKey = key.into();
        self.0.iter().find(|tag| tag.key == key)
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Key to value, where a later tag with the same key wins.
    pub fn to_map(&self) -> BTreeMap<TagKey, TagValue> {
        self.0
            .iter()
            .map(|tag| (tag.key.clone(), tag.value.clone()))
            .collect()
    }

    /// Combines two tag sets. On a key collision the tag of `other` is kept.
    /// The result is ordered by key.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        let mut map = self.to_map();
        map.extend(other.to_map());
        Self(
            map.into_iter()
                .map(|(key, value)| Tag { key, value })
                .collect(),
        )
    }

    /// Drops all tags with the reserved `aws:` prefix.
    #[must_use]
    pub fn without_reserved(self) -> Self {
        Self(
            self.0
                .into_iter()
                .filter(|tag| !tag.key.is_reserved())
                .collect(),
        )
    }

    pub fn validate(&self) -> Result<(), ParseTagsError> {
        let mut seen = BTreeMap::new();
        for tag in &self.0 {
            tag.validate()?;
            if seen.insert(tag.key.clone(), ()).is_some() {
                return Err(ParseTagsError::DuplicateKey {
                    key: tag.key.clone(),
                });
            }
        }
        Ok(())
    }

    /// Computes the calls needed to turn `current` into `self`.
    ///
    /// Reserved keys are ignored on both sides. A tag whose key and value are
    /// unchanged appears in neither set.
    pub fn diff(&self, current: &Self) -> TagDiff {
        let desired = self.clone().without_reserved().to_map();
        let current = current.clone().without_reserved().to_map();

        let to_remove = current
            .keys()
            .filter(|key| !desired.contains_key(*key))
            .cloned()
            .collect();

        let to_add = desired
            .into_iter()
            .filter(|&(ref key, ref value)| current.get(key) != Some(value))
            .map(|(key, value)| Tag { key, value })
            .collect();

        TagDiff {
            to_add: Self(to_add),
            to_remove,
        }
    }

    /// Renders the tags as `key=value&...`, the form `CreateTopicRule` takes
    /// its tags in.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for tag in &self.0 {
            let _serializer = serializer.append_pair(tag.key.as_str(), tag.value.as_str());
        }
        serializer.finish()
    }
}

impl fmt::Display for TagList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|tag| format!("{}={}", tag.key, tag.value))
            .collect();
        write!(f, "[{}]", rendered.join(", "))
    }
}

/// The tag changes required to reach a desired tag set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDiff {
    to_add: TagList,
    to_remove: Vec<TagKey>,
}

impl TagDiff {
    pub const fn to_add(&self) -> &TagList {
        &self.to_add
    }

    pub fn to_remove(&self) -> &[TagKey] {
        &self.to_remove
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Brings the tags of `resource_arn` in line with `desired`.
///
/// The current tags are always fetched from the service, so tags changed
/// outside of CloudFormation are reverted as well.
pub(crate) async fn reconcile<C: IotApi + ?Sized>(
    client: &C,
    resource_arn: &str,
    desired: &TagList,
) -> Result<(), Error> {
    let current = client.list_tags_for_resource(resource_arn).await?;
    let TagDiff { to_add, to_remove } = desired.diff(&current);

    if !to_remove.is_empty() {
        debug!(resource_arn, count = to_remove.len(), "removing tags");
        client.untag_resource(resource_arn, to_remove).await?;
    }

    if !to_add.is_empty() {
        debug!(resource_arn, tags = %to_add, "adding tags");
        client.tag_resource(resource_arn, to_add).await?;
    }

    Ok(())
}
