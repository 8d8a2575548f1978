//! `AWS::IoT::RoleAlias`: IAM roles for the credentials provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{existing, ignore_not_found, model_tags, require_identifier};
use crate::{
    api::{
        CreateRoleAliasRequest, IotApi, ResourceSummary, RoleAliasDescription,
        UpdateRoleAliasRequest,
    },
    handler::{ProgressEvent, ResourceHandlerRequest, ResourceProvider},
    model::{self, ResourceModel},
    tags::{self, TagList},
    Error,
};

const MAX_NAME_LENGTH: usize = 128;
const DEFAULT_CREDENTIAL_DURATION_SECONDS: i32 = 3600;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
#[resource(type_name = "AWS::IoT::RoleAlias")]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(primary_identifier, create_only)]
    pub role_alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub role_alias_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_duration_seconds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagList>,
}

fn to_create_request(model: &Model, role_alias: String, tags: TagList) -> CreateRoleAliasRequest {
    CreateRoleAliasRequest {
        role_alias,
        role_arn: model.role_arn.clone(),
        credential_duration_seconds: Some(
            model
                .credential_duration_seconds
                .unwrap_or(DEFAULT_CREDENTIAL_DURATION_SECONDS),
        ),
        tags,
    }
}

fn to_update_request(model: &Model, role_alias: String) -> UpdateRoleAliasRequest {
    UpdateRoleAliasRequest {
        role_alias,
        role_arn: model.role_arn.clone(),
        credential_duration_seconds: model.credential_duration_seconds,
    }
}

fn from_description(description: RoleAliasDescription, tags: TagList) -> Model {
    Model {
        role_alias: Some(description.role_alias),
        role_alias_arn: Some(description.role_alias_arn),
        role_arn: description.role_arn,
        credential_duration_seconds: description.credential_duration_seconds,
        tags: model_tags(tags),
    }
}

fn from_summary(summary: ResourceSummary) -> Model {
    Model {
        role_alias: Some(summary.identifier),
        role_alias_arn: summary.arn,
        ..Default::default()
    }
}

async fn describe(client: &dyn IotApi, role_alias: &str) -> Result<Model, Error> {
    let description = client
        .describe_role_alias(role_alias)
        .await
        .map_err(|e| e.into_not_found(Model::TYPE_NAME, role_alias))?;
    let tags = client
        .list_tags_for_resource(&description.role_alias_arn)
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

        let role_alias = model
            .role_alias
            .clone()
            .unwrap_or_else(|| request.generate_identifier(MAX_NAME_LENGTH));
        let tags = request.desired_tags(model.tags.as_ref())?;

        debug!(%role_alias, "creating role alias");
        let _summary = client
            .create_role_alias(to_create_request(&model, role_alias.clone(), tags))
            .await?;
        info!(%role_alias, "role alias created");

        Ok(ProgressEvent::success(describe(client, &role_alias).await?))
    }

    async fn read(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let role_alias = require_identifier(&request.desired())?;
        Ok(ProgressEvent::success(describe(client, &role_alias).await?))
    }

    async fn update(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let (desired, _previous) = request.update_models()?;
        let role_alias = require_identifier(&desired)?;
        let tags = request.desired_tags(desired.tags.as_ref())?;

        let current = client
            .describe_role_alias(&role_alias)
            .await
            .map_err(|e| e.into_not_found(Model::TYPE_NAME, &role_alias))?;

        debug!(%role_alias, "updating role alias");
        client
            .update_role_alias(to_update_request(&desired, role_alias.clone()))
            .await?;
        tags::reconcile(client, &current.role_alias_arn, &tags).await?;

        Ok(ProgressEvent::success(describe(client, &role_alias).await?))
    }

    async fn delete(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let role_alias = require_identifier(&request.desired())?;

        if existing(
            client.describe_role_alias(&role_alias).await,
            Model::TYPE_NAME,
            &role_alias,
        )?
        .is_none()
        {
            return Ok(ProgressEvent::done());
        }

        ignore_not_found(
            client.delete_role_alias(&role_alias).await,
            Model::TYPE_NAME,
            &role_alias,
        )?;
        info!(%role_alias, "role alias deleted");

        Ok(ProgressEvent::done())
    }

    async fn list(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let page = client
            .list_role_aliases(request.next_token.clone())
            .await?;
        Ok(ProgressEvent::success_list(
            page.items.into_iter().map(from_summary).collect(),
            page.next_token,
        ))
    }
}
