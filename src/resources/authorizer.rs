//! `AWS::IoT::Authorizer`: custom authorizers backed by a Lambda function

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{existing, ignore_not_found, model_tags, require_identifier};
use crate::{
    api::{
        AuthorizerDescription, AuthorizerStatus, CreateAuthorizerRequest, IotApi, ResourceSummary,
        UpdateAuthorizerRequest,
    },
    handler::{ProgressEvent, ResourceHandlerRequest, ResourceProvider},
    model::{self, ResourceModel},
    tags::{self, TagList},
    Error,
};

const MAX_NAME_LENGTH: usize = 128;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
#[resource(type_name = "AWS::IoT::Authorizer")]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(primary_identifier, create_only)]
    pub authorizer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorizer_function_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_key_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_signing_public_keys: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AuthorizerStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub signing_disabled: Option<bool>,
    #[serde(
        rename = "EnableCachingForHTTP",
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_caching_for_http: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagList>,
}

fn to_create_request(model: &Model, name: String, tags: TagList) -> CreateAuthorizerRequest {
    CreateAuthorizerRequest {
        authorizer_name: name,
        authorizer_function_arn: model.authorizer_function_arn.clone(),
        token_key_name: model.token_key_name.clone(),
        token_signing_public_keys: model.token_signing_public_keys.clone(),
        status: model.status,
        signing_disabled: model.signing_disabled,
        enable_caching_for_http: model.enable_caching_for_http,
        tags,
    }
}

fn to_update_request(model: &Model, name: String) -> UpdateAuthorizerRequest {
    UpdateAuthorizerRequest {
        authorizer_name: name,
        authorizer_function_arn: model.authorizer_function_arn.clone(),
        token_key_name: model.token_key_name.clone(),
        token_signing_public_keys: model.token_signing_public_keys.clone(),
        status: model.status,
        enable_caching_for_http: model.enable_caching_for_http,
    }
}

fn from_description(description: AuthorizerDescription, tags: TagList) -> Model {
    Model {
        authorizer_name: Some(description.authorizer_name),
        arn: Some(description.authorizer_arn),
        authorizer_function_arn: description.authorizer_function_arn,
        token_key_name: description.token_key_name,
        token_signing_public_keys: (!description.token_signing_public_keys.is_empty())
            .then_some(description.token_signing_public_keys),
        status: description.status,
        signing_disabled: description.signing_disabled,
        enable_caching_for_http: description.enable_caching_for_http,
        tags: model_tags(tags),
    }
}

fn from_summary(summary: ResourceSummary) -> Model {
    Model {
        authorizer_name: Some(summary.identifier),
        arn: summary.arn,
        ..Default::default()
    }
}

async fn describe(client: &dyn IotApi, name: &str) -> Result<Model, Error> {
    let description = client
        .describe_authorizer(name)
        .await
        .map_err(|e| e.into_not_found(Model::TYPE_NAME, name))?;
    let tags = client
        .list_tags_for_resource(&description.authorizer_arn)
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
            .authorizer_name
            .clone()
            .unwrap_or_else(|| request.generate_identifier(MAX_NAME_LENGTH));
        let tags = request.desired_tags(model.tags.as_ref())?;

        debug!(%name, "creating authorizer");
        let _summary = client
            .create_authorizer(to_create_request(&model, name.clone(), tags))
            .await?;
        info!(%name, "authorizer created");

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
        let (desired, _previous) = request.update_models()?;
        let name = require_identifier(&desired)?;
        let tags = request.desired_tags(desired.tags.as_ref())?;

        let current = client
            .describe_authorizer(&name)
            .await
            .map_err(|e| e.into_not_found(Model::TYPE_NAME, &name))?;

        debug!(%name, "updating authorizer");
        client
            .update_authorizer(to_update_request(&desired, name.clone()))
            .await?;
        tags::reconcile(client, &current.authorizer_arn, &tags).await?;

        Ok(ProgressEvent::success(describe(client, &name).await?))
    }

    async fn delete(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let name = require_identifier(&request.desired())?;

        let Some(current) = existing(
            client.describe_authorizer(&name).await,
            Model::TYPE_NAME,
            &name,
        )?
        else {
            return Ok(ProgressEvent::done());
        };

        // active authorizers cannot be deleted
        if current.status == Some(AuthorizerStatus::Active) {
            debug!(%name, "deactivating authorizer");
            client
                .update_authorizer(UpdateAuthorizerRequest {
                    authorizer_name: name.clone(),
                    status: Some(AuthorizerStatus::Inactive),
                    ..Default::default()
                })
                .await?;
        }

        ignore_not_found(
            client.delete_authorizer(&name).await,
            Model::TYPE_NAME,
            &name,
        )?;
        info!(%name, "authorizer deleted");

        Ok(ProgressEvent::done())
    }

    async fn list(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let page = client.list_authorizers(request.next_token.clone()).await?;
        Ok(ProgressEvent::success_list(
            page.items.into_iter().map(from_summary).collect(),
            page.next_token,
        ))
    }
}
