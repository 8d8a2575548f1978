//! The CloudFormation handler contract
//!
//! A host deserializes a [`ResourceHandlerRequest`] for a resource type, calls
//! [`invoke`] with the requested [`Action`] and hands the resulting
//! [`ProgressEvent`] back to CloudFormation. Handlers that need to wait return
//! [`OperationStatus::InProgress`] together with a [`CallbackContext`] and
//! expect to be invoked again with that context after the callback delay.

use std::{collections::BTreeMap, fmt};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{
    api::IotApi,
    identifier,
    model::{self, ResourceModel},
    tags::TagList,
    Error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Success,
    Failed,
    InProgress,
}

/// The error codes CloudFormation understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlerErrorCode {
    NotUpdatable,
    InvalidRequest,
    AccessDenied,
    NotFound,
    AlreadyExists,
    ResourceConflict,
    Throttling,
    ServiceLimitExceeded,
    NotStabilized,
    GeneralServiceException,
    InternalFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                Self::Create => "CREATE",
                Self::Read => "READ",
                Self::Update => "UPDATE",
                Self::Delete => "DELETE",
                Self::List => "LIST",
            }
        )
    }
}

/// What a long-running handler is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    /// The resource exists, its status is not yet the requested one
    AwaitingStatus,
    /// The resource is being disabled ahead of its deletion
    AwaitingDisable,
    /// The delete call went through, the resource is still visible
    AwaitingDeletion,
    /// The resource was deprecated and cannot be deleted yet
    AwaitingDeprecation,
}

/// State carried across invocations of a long-running handler.
///
/// The value is never mutated. Every invocation that needs to continue
/// returns a new context in its progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackContext {
    pub stage: Stage,
    pub remaining_attempts: u32,
}

impl CallbackContext {
    pub const fn new(stage: Stage, remaining_attempts: u32) -> Self {
        Self {
            stage,
            remaining_attempts,
        }
    }

    /// The context for the next invocation in the same stage, or `None`
    /// once all attempts are used up.
    pub fn next_attempt(self) -> Option<Self> {
        self.remaining_attempts
            .checked_sub(1)
            .map(|remaining_attempts| Self {
                stage: self.stage,
                remaining_attempts,
            })
    }

    /// Moves on to another stage, keeping the attempt budget.
    #[must_use]
    pub const fn advance(self, stage: Stage) -> Self {
        Self {
            stage,
            remaining_attempts: self.remaining_attempts,
        }
    }
}

/// A single handler invocation as sent by CloudFormation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceHandlerRequest<M> {
    pub aws_account_id: Option<String>,
    pub aws_partition: Option<String>,
    pub region: Option<String>,
    pub stack_id: Option<String>,
    pub logical_resource_identifier: Option<String>,
    pub client_request_token: Option<String>,
    pub desired_resource_state: Option<M>,
    pub previous_resource_state: Option<M>,
    /// Stack-level tags, propagated to every taggable resource
    #[serde(default)]
    pub desired_resource_tags: BTreeMap<String, String>,
    #[serde(default)]
    pub previous_resource_tags: BTreeMap<String, String>,
    /// `aws:`-prefixed tags set by CloudFormation itself
    #[serde(default)]
    pub system_tags: BTreeMap<String, String>,
    pub next_token: Option<String>,
    pub callback_context: Option<CallbackContext>,
}

impl<M: ResourceModel> ResourceHandlerRequest<M> {
    /// The desired model, or an empty one if the request carries none.
    pub fn desired(&self) -> M {
        self.desired_resource_state.clone().unwrap_or_default()
    }

    /// Desired and previous model of an update, validated against each
    /// other.
    ///
    /// A desired model without primary identifier inherits the one of the
    /// previous model.
    pub fn update_models(&self) -> Result<(M, M), Error> {
        let previous = self.previous_resource_state.clone().unwrap_or_default();
        let mut desired = self.desired();

        if desired.primary_identifier().is_none() {
            if let Some(identifier) = previous.primary_identifier() {
                desired.set_primary_identifier(identifier.to_owned());
            }
        }

        model::validate_update(&desired, &previous)?;
        Ok((desired, previous))
    }

    /// The tags to put on a resource: system tags, stack-level tags and the
    /// tags of the model, later ones overriding earlier ones.
    pub fn desired_tags(&self, model_tags: Option<&TagList>) -> Result<TagList, Error> {
        let model_tags = model_tags.cloned().unwrap_or_default();
        model_tags.validate()?;

        Ok(TagList::from_map(self.system_tags.clone())
            .merge(TagList::from_map(self.desired_resource_tags.clone()))
            .merge(model_tags))
    }

    /// A name for a resource the template did not name explicitly.
    ///
    /// The name is stable across retries of the same request.
    pub fn generate_identifier(&self, max_length: usize) -> String {
        identifier::generate_resource_identifier(
            self.stack_id.as_deref(),
            self.logical_resource_identifier.as_deref(),
            self.client_request_token.as_deref().unwrap_or_default(),
            max_length,
        )
    }
}

/// The result of a handler invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent<M> {
    pub status: OperationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_model: Option<M>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_models: Option<Vec<M>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<HandlerErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_context: Option<CallbackContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_delay_seconds: Option<u32>,
}

impl<M> ProgressEvent<M> {
    const fn empty(status: OperationStatus) -> Self {
        Self {
            status,
            resource_model: None,
            resource_models: None,
            next_token: None,
            error_code: None,
            message: None,
            callback_context: None,
            callback_delay_seconds: None,
        }
    }

    pub fn success(model: M) -> Self {
        Self {
            resource_model: Some(model),
            ..Self::empty(OperationStatus::Success)
        }
    }

    pub fn success_list(models: Vec<M>, next_token: Option<String>) -> Self {
        Self {
            resource_models: Some(models),
            next_token,
            ..Self::empty(OperationStatus::Success)
        }
    }

    /// Success without a model, as returned by delete.
    pub const fn done() -> Self {
        Self::empty(OperationStatus::Success)
    }

    pub fn in_progress(model: Option<M>, context: CallbackContext, delay_seconds: u32) -> Self {
        Self {
            resource_model: model,
            callback_context: Some(context),
            callback_delay_seconds: Some(delay_seconds),
            ..Self::empty(OperationStatus::InProgress)
        }
    }

    pub fn failed(error_code: HandlerErrorCode, message: impl Into<String>) -> Self {
        Self {
            error_code: Some(error_code),
            message: Some(message.into()),
            ..Self::empty(OperationStatus::Failed)
        }
    }
}

impl<M> From<&Error> for ProgressEvent<M> {
    fn from(value: &Error) -> Self {
        Self::failed(value.error_code(), value.to_string())
    }
}

/// The lifecycle handlers of one resource type.
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    type Model: ResourceModel;

    async fn create(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Self::Model>,
    ) -> Result<ProgressEvent<Self::Model>, Error>;

    async fn read(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Self::Model>,
    ) -> Result<ProgressEvent<Self::Model>, Error>;

    async fn update(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Self::Model>,
    ) -> Result<ProgressEvent<Self::Model>, Error>;

    async fn delete(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Self::Model>,
    ) -> Result<ProgressEvent<Self::Model>, Error>;

    async fn list(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Self::Model>,
    ) -> Result<ProgressEvent<Self::Model>, Error>;
}

/// Runs one action of a provider. Errors never escape, they are reported as
/// a failed progress event.
#[tracing::instrument(
    skip_all,
    fields(
        type_name = <P::Model as ResourceModel>::TYPE_NAME,
        action = %action,
    )
)]
pub async fn invoke<P: ResourceProvider>(
    provider: &P,
    client: &dyn IotApi,
    action: Action,
    request: ResourceHandlerRequest<P::Model>,
) -> ProgressEvent<P::Model> {
    let result = match action {
        Action::Create => provider.create(client, &request).await,
        Action::Read => provider.read(client, &request).await,
        Action::Update => provider.update(client, &request).await,
        Action::Delete => provider.delete(client, &request).await,
        Action::List => provider.list(client, &request).await,
    };

    match result {
        Ok(event) => {
            info!(status = ?event.status, "handler finished");
            event
        }
        Err(err) => {
            let code = err.error_code();
            if code == HandlerErrorCode::InternalFailure {
                error!(error = %err, ?code, "handler failed");
            } else {
                warn!(error = %err, ?code, "handler failed");
            }
            (&err).into()
        }
    }
}
