//! Running a handler by resource type name
//!
//! Hosts that receive untyped requests use [`dispatch`] instead of picking a
//! provider themselves.

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    api::IotApi,
    handler::{self, Action, ProgressEvent, ResourceHandlerRequest, ResourceProvider},
    model::ResourceModel,
    resources, Error,
};

async fn run<P: ResourceProvider>(
    provider: &P,
    client: &dyn IotApi,
    action: Action,
    request: Value,
) -> Result<Value, Error> {
    let event = match serde_json::from_value::<ResourceHandlerRequest<P::Model>>(request) {
        Ok(request) => handler::invoke(provider, client, action, request).await,
        Err(e) => {
            let err = Error::from(e);
            warn!(error = %err, "malformed request");
            ProgressEvent::from(&err)
        }
    };
    Ok(serde_json::to_value(event)?)
}

macro_rules! providers {
    ($($module:ident),+ $(,)?) => {
        /// The type names of all supported resource types.
        pub fn supported_types() -> Vec<&'static str> {
            vec![$(<resources::$module::Model as ResourceModel>::TYPE_NAME),+]
        }

        /// Runs `action` for a resource of type `type_name` and returns the
        /// progress event as JSON.
        ///
        /// Failures of the handler, including a request that does not match
        /// the model, are reported in the returned event. Only an unknown
        /// type name fails the call itself.
        pub async fn dispatch(
            client: &dyn IotApi,
            type_name: &str,
            action: Action,
            request: Value,
        ) -> Result<Value, Error> {
            debug!(type_name, %action, "dispatching request");
            $(
                if type_name == <resources::$module::Model as ResourceModel>::TYPE_NAME {
                    return run(&resources::$module::Provider, client, action, request).await;
                }
            )+
            Err(Error::UnknownResourceType {
                type_name: type_name.to_owned(),
            })
        }
    };
}

providers!(
    authorizer,
    billing_group,
    ca_certificate,
    certificate,
    domain_configuration,
    logging,
    policy,
    provisioning_template,
    role_alias,
    thing,
    thing_group,
    thing_type,
    topic_rule,
    topic_rule_destination,
);
