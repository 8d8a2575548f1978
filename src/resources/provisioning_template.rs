//! `AWS::IoT::ProvisioningTemplate`: fleet provisioning templates

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{existing, ignore_not_found, model_tags, require_identifier};
use crate::{
    api::{
        CreateProvisioningTemplateRequest, IotApi, ProvisioningHook,
        ProvisioningTemplateDescription, ResourceSummary, TemplateType,
        UpdateProvisioningTemplateRequest,
    },
    handler::{ProgressEvent, ResourceHandlerRequest, ResourceProvider},
    model::{self, ResourceModel},
    tags::{self, TagList},
    versions::{self, TemplateVersions},
    Error,
};

const MAX_NAME_LENGTH: usize = 36;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
#[resource(type_name = "AWS::IoT::ProvisioningTemplate")]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(primary_identifier, create_only)]
    pub template_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub template_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub template_type: Option<TemplateType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_provisioning_hook: Option<ProvisioningHook>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagList>,
}

fn to_create_request(
    model: &Model,
    name: String,
    tags: TagList,
) -> CreateProvisioningTemplateRequest {
    CreateProvisioningTemplateRequest {
        template_name: name,
        description: model.description.clone(),
        template_body: model.template_body.clone(),
        enabled: model.enabled,
        provisioning_role_arn: model.provisioning_role_arn.clone(),
        pre_provisioning_hook: model.pre_provisioning_hook.clone(),
        template_type: model.template_type,
        tags,
    }
}

fn to_update_request(
    desired: &Model,
    previous: &Model,
    name: String,
) -> UpdateProvisioningTemplateRequest {
    let remove_hook =
        previous.pre_provisioning_hook.is_some() && desired.pre_provisioning_hook.is_none();

    UpdateProvisioningTemplateRequest {
        template_name: name,
        description: desired.description.clone(),
        enabled: desired.enabled,
        default_version_id: None,
        provisioning_role_arn: desired.provisioning_role_arn.clone(),
        pre_provisioning_hook: desired.pre_provisioning_hook.clone(),
        remove_pre_provisioning_hook: remove_hook.then_some(true),
    }
}

fn from_description(description: ProvisioningTemplateDescription, tags: TagList) -> Model {
    Model {
        template_name: Some(description.template_name),
        template_arn: Some(description.template_arn),
        description: description.description,
        enabled: description.enabled,
        provisioning_role_arn: description.provisioning_role_arn,
        template_body: description.template_body,
        template_type: description.template_type,
        pre_provisioning_hook: description.pre_provisioning_hook,
        tags: model_tags(tags),
    }
}

fn from_summary(summary: ResourceSummary) -> Model {
    Model {
        template_name: Some(summary.identifier),
        template_arn: summary.arn,
        ..Default::default()
    }
}

async fn describe(client: &dyn IotApi, name: &str) -> Result<Model, Error> {
    let description = client
        .describe_provisioning_template(name)
        .await
        .map_err(|e| e.into_not_found(Model::TYPE_NAME, name))?;
    let tags = client
        .list_tags_for_resource(&description.template_arn)
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
            .template_name
            .clone()
            .unwrap_or_else(|| request.generate_identifier(MAX_NAME_LENGTH));
        let tags = request.desired_tags(model.tags.as_ref())?;

        debug!(%name, "creating provisioning template");
        let _summary = client
            .create_provisioning_template(to_create_request(&model, name.clone(), tags))
            .await?;
        info!(%name, "provisioning template created");

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
            .describe_provisioning_template(&name)
            .await
            .map_err(|e| e.into_not_found(Model::TYPE_NAME, &name))?;

        debug!(%name, "updating provisioning template");
        client
            .update_provisioning_template(to_update_request(&desired, &previous, name.clone()))
            .await?;

        if let Some(ref body) = desired.template_body {
            if previous.template_body.as_ref() != Some(body) {
                debug!(%name, "creating new default template version");
                versions::create_default_version(
                    &TemplateVersions {
                        client,
                        template_name: &name,
                    },
                    body,
                )
                .await?;
            }
        }
        tags::reconcile(client, &current.template_arn, &tags).await?;

        Ok(ProgressEvent::success(describe(client, &name).await?))
    }

    async fn delete(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let name = require_identifier(&request.desired())?;

        if existing(
            client.describe_provisioning_template(&name).await,
            Model::TYPE_NAME,
            &name,
        )?
        .is_none()
        {
            return Ok(ProgressEvent::done());
        }

        ignore_not_found(
            client.delete_provisioning_template(&name).await,
            Model::TYPE_NAME,
            &name,
        )?;
        info!(%name, "provisioning template deleted");

        Ok(ProgressEvent::done())
    }

    async fn list(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let page = client
            .list_provisioning_templates(request.next_token.clone())
            .await?;
        Ok(ProgressEvent::success_list(
            page.items.into_iter().map(from_summary).collect(),
            page.next_token,
        ))
    }
}
