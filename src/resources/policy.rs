//! `AWS::IoT::Policy`
//!
//! Changing the document creates a new default policy version. Deletion
//! removes all other versions first, the service refuses to delete a policy
//! that still has any.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::{existing, ignore_not_found, model_tags, require_identifier};
use crate::{
    api::{CreatePolicyRequest, IotApi, PolicyDescription, ResourceSummary},
    handler::{ProgressEvent, ResourceHandlerRequest, ResourceProvider},
    model::{self, ResourceModel},
    tags::{self, TagList},
    versions::{self, PolicyVersions},
    Error,
};

const MAX_NAME_LENGTH: usize = 128;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
#[resource(type_name = "AWS::IoT::Policy")]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(primary_identifier, read_only)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub policy_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub arn: Option<String>,
    /// A JSON object, or a string holding one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_document: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagList>,
}

/// The document as sent to the service.
fn document_text(document: &Value) -> String {
    match *document {
        Value::String(ref text) => text.clone(),
        ref object => object.to_string(),
    }
}

/// The document as a JSON value, for comparison and for reporting.
fn parse_document(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

fn normalized(document: Option<&Value>) -> Option<Value> {
    document.map(|document| parse_document(&document_text(document)))
}

fn to_create_request(model: &Model, name: String, tags: TagList) -> Result<CreatePolicyRequest, Error> {
    let document = model
        .policy_document
        .as_ref()
        .ok_or(Error::MissingProperty {
            type_name: Model::TYPE_NAME,
            property: "PolicyDocument",
        })?;

    Ok(CreatePolicyRequest {
        policy_name: name,
        policy_document: document_text(document),
        tags,
    })
}

fn from_description(description: PolicyDescription, tags: TagList) -> Model {
    Model {
        id: Some(description.policy_name.clone()),
        policy_name: Some(description.policy_name),
        arn: Some(description.policy_arn),
        policy_document: description
            .policy_document
            .as_deref()
            .map(parse_document),
        tags: model_tags(tags),
    }
}

fn from_summary(summary: ResourceSummary) -> Model {
    Model {
        id: Some(summary.identifier.clone()),
        policy_name: Some(summary.identifier),
        arn: summary.arn,
        ..Default::default()
    }
}

async fn describe(client: &dyn IotApi, name: &str) -> Result<Model, Error> {
    let description = client
        .get_policy(name)
        .await
        .map_err(|e| e.into_not_found(Model::TYPE_NAME, name))?;
    let tags = client
        .list_tags_for_resource(&description.policy_arn)
        .await?;
    Ok(from_description(description, tags))
}

pub struct Provider;

#[async_trait]
impl ResourceProvider for Provider {
    type Model = Model;

    async fn create(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let model = request.desired();
        model::validate_create(&model)?;

        let name = model
            .policy_name
            .clone()
            .unwrap_or_else(|| request.generate_identifier(MAX_NAME_LENGTH));
        let tags = request.desired_tags(model.tags.as_ref())?;

        debug!(%name, "creating policy");
        let _summary = client
            .create_policy(to_create_request(&model, name.clone(), tags)?)
            .await?;
        info!(%name, "policy created");

        Ok(ProgressEvent::success(describe(client, &name).await?))
    }

    async fn read(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let name = require_identifier(&request.desired())?;
        Ok(ProgressEvent::success(describe(client, &name).await?))
    }

    async fn update(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let (desired, previous) = request.update_models()?;
        let name = require_identifier(&desired)?;
        let tags = request.desired_tags(desired.tags.as_ref())?;

        let current = client
            .get_policy(&name)
            .await
            .map_err(|e| e.into_not_found(Model::TYPE_NAME, &name))?;

        if let Some(ref document) = desired.policy_document {
            if normalized(Some(document)) != normalized(previous.policy_document.as_ref()) {
                debug!(%name, "creating new default policy version");
                versions::create_default_version(
                    &PolicyVersions {
                        client,
                        policy_name: &name,
                    },
                    &document_text(document),
                )
                .await?;
            }
        }
        tags::reconcile(client, &current.policy_arn, &tags).await?;

        Ok(ProgressEvent::success(describe(client, &name).await?))
    }

    async fn delete(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let name = require_identifier(&request.desired())?;

        if existing(client.get_policy(&name).await, Model::TYPE_NAME, &name)?.is_none() {
            return Ok(ProgressEvent::done());
        }

        for version in client.list_policy_versions(&name).await? {
            if !version.is_default {
                debug!(%name, version = %version.version_id, "deleting policy version");
                ignore_not_found(
                    client
                        .delete_policy_version(&name, &version.version_id)
                        .await,
                    Model::TYPE_NAME,
                    &name,
                )?;
            }
        }

        ignore_not_found(client.delete_policy(&name).await, Model::TYPE_NAME, &name)?;
        info!(%name, "policy deleted");

        Ok(ProgressEvent::done())
    }

    async fn list(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let page = client.list_policies(request.next_token.clone()).await?;
        Ok(ProgressEvent::success_list(
            page.items.into_iter().map(from_summary).collect(),
            page.next_token,
        ))
    }
}
