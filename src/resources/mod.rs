//! The resource providers, one module per CloudFormation resource type

use tracing::{info, warn};

use crate::{model::ResourceModel, tags::TagList, Error};

pub mod authorizer;
pub mod billing_group;
pub mod ca_certificate;
pub mod certificate;
pub mod domain_configuration;
pub mod logging;
pub mod policy;
pub mod provisioning_template;
pub mod role_alias;
pub mod thing;
pub mod thing_group;
pub mod thing_type;
pub mod topic_rule;
pub mod topic_rule_destination;

/// Seconds until a long-running handler is invoked again
pub(crate) const CALLBACK_DELAY_SECONDS: u32 = 5;
/// Invocations a long-running handler waits before giving up
pub(crate) const STABILIZATION_ATTEMPTS: u32 = 60;

pub(crate) fn require_identifier<M: ResourceModel>(model: &M) -> Result<String, Error> {
    model
        .primary_identifier()
        .map(ToOwned::to_owned)
        .ok_or(Error::MissingProperty {
            type_name: M::TYPE_NAME,
            property: M::PRIMARY_IDENTIFIER,
        })
}

/// `Ok(None)` if a lookup failed because there is no such resource.
pub(crate) fn found<T>(result: Result<T, Error>) -> Result<Option<T>, Error> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Looks up a resource that is about to be deleted.
///
/// `Ok(None)` means it is gone already. An identifier the service cannot
/// parse is reported as [`Error::NotFound`].
pub(crate) fn existing<T>(
    result: Result<T, Error>,
    type_name: &'static str,
    identifier: &str,
) -> Result<Option<T>, Error> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => {
            info!(type_name, identifier, "resource is already deleted");
            Ok(None)
        }
        Err(err) => Err(err.into_not_found(type_name, identifier)),
    }
}

/// Treats a delete call on a vanished resource as success.
pub(crate) fn ignore_not_found(
    result: Result<(), Error>,
    type_name: &'static str,
    identifier: &str,
) -> Result<(), Error> {
    match result {
        Err(err) if err.is_not_found() => {
            warn!(type_name, identifier, "resource disappeared during deletion");
            Ok(())
        }
        result => result,
    }
}

/// Tags as shown in a model: without reserved keys, `None` if empty.
pub(crate) fn model_tags(tags: TagList) -> Option<TagList> {
    let tags = tags.without_reserved();
    (!tags.is_empty()).then_some(tags)
}
