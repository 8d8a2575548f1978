use super::{Tag, TagKey, TagList, TagValue};
use crate::sdk::Lenient as _;

impl TryFrom<Tag> for aws_sdk_iot::types::Tag {
    type Error = aws_sdk_iot::error::BuildError;

    fn try_from(tag: Tag) -> Result<Self, Self::Error> {
        Self::builder().key(tag.key).value(tag.value).build()
    }
}

impl TryFrom<TagList> for Vec<aws_sdk_iot::types::Tag> {
    type Error = aws_sdk_iot::error::BuildError;

    fn try_from(tags: TagList) -> Result<Self, Self::Error> {
        tags.0.into_iter().map(TryInto::try_into).collect()
    }
}

impl From<aws_sdk_iot::types::Tag> for Tag {
    fn from(tag: aws_sdk_iot::types::Tag) -> Self {
        Self {
            key: TagKey(tag.key.lenient().unwrap_or_default()),
            // IoT allows tags without a value
            value: TagValue(tag.value.lenient().unwrap_or_default()),
        }
    }
}

impl From<Vec<aws_sdk_iot::types::Tag>> for TagList {
    fn from(list: Vec<aws_sdk_iot::types::Tag>) -> Self {
        Self(list.into_iter().map(Into::into).collect())
    }
}
