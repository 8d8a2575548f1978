//! Resource models and their property metadata

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};

use crate::Error;

/// Derives [`ResourceModel`] for a model struct.
///
/// The struct needs `#[resource(type_name = "...")]`. Fields are flagged with
/// `#[resource(primary_identifier)]`, `#[resource(read_only)]` and
/// `#[resource(create_only)]`. Property names follow `#[serde(rename)]` or
/// the PascalCase form of the field name.
pub use iot_macros::ResourceModel;

/// A CloudFormation resource model.
pub trait ResourceModel:
    Clone + fmt::Debug + PartialEq + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The CloudFormation type name, e.g. `AWS::IoT::Policy`
    const TYPE_NAME: &'static str;
    /// Property name of the primary identifier
    const PRIMARY_IDENTIFIER: &'static str;

    fn primary_identifier(&self) -> Option<&str>;
    fn set_primary_identifier(&mut self, value: String);

    /// Read-only properties that carry a value.
    fn supplied_read_only_properties(&self) -> Vec<&'static str>;
    /// Read-only properties set in `self` with a value different from
    /// `previous`.
    fn changed_read_only_properties(&self, previous: &Self) -> Vec<&'static str>;
    /// Create-only properties that differ between `self` and `previous`.
    fn changed_create_only_properties(&self, previous: &Self) -> Vec<&'static str>;
}

/// Rejects read-only properties in a model to be created.
pub fn validate_create<M: ResourceModel>(desired: &M) -> Result<(), Error> {
    let properties = desired.supplied_read_only_properties();
    if properties.is_empty() {
        Ok(())
    } else {
        Err(Error::ReadOnlyProperties {
            type_name: M::TYPE_NAME,
            properties,
        })
    }
}

/// Checks an update against the previous state. Changed create-only
/// properties win over changed read-only ones.
pub fn validate_update<M: ResourceModel>(desired: &M, previous: &M) -> Result<(), Error> {
    let properties = desired.changed_create_only_properties(previous);
    if !properties.is_empty() {
        return Err(Error::NotUpdatable {
            type_name: M::TYPE_NAME,
            properties,
        });
    }

    let properties = desired.changed_read_only_properties(previous);
    if !properties.is_empty() {
        return Err(Error::ReadOnlyProperties {
            type_name: M::TYPE_NAME,
            properties,
        });
    }

    Ok(())
}
