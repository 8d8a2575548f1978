//! `AWS::IoT::ThingGroup`: static thing groups

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{existing, ignore_not_found, model_tags, require_identifier};
use crate::{
    api::{
        CreateThingGroupRequest, IotApi, ResourceSummary, ThingGroupDescription,
        ThingGroupProperties,
    },
    handler::{ProgressEvent, ResourceHandlerRequest, ResourceProvider},
    model::{self, ResourceModel},
    tags::{self, TagList},
    Error,
};

const MAX_NAME_LENGTH: usize = 128;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
#[resource(type_name = "AWS::IoT::ThingGroup")]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(primary_identifier, create_only)]
    pub thing_group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub parent_group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thing_group_properties: Option<ThingGroupProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagList>,
}

fn to_create_request(model: &Model, name: String, tags: TagList) -> CreateThingGroupRequest {
    CreateThingGroupRequest {
        thing_group_name: name,
        parent_group_name: model.parent_group_name.clone(),
        properties: model.thing_group_properties.clone().unwrap_or_default(),
        tags,
    }
}

fn from_description(description: ThingGroupDescription, tags: TagList) -> Model {
    Model {
        thing_group_name: Some(description.thing_group_name),
        id: Some(description.thing_group_id),
        arn: Some(description.thing_group_arn),
        parent_group_name: description.parent_group_name,
        thing_group_properties: Some(description.properties),
        tags: model_tags(tags),
    }
}

fn from_summary(summary: ResourceSummary) -> Model {
    Model {
        thing_group_name: Some(summary.identifier),
        arn: summary.arn,
        ..Default::default()
    }
}

async fn describe(client: &dyn IotApi, name: &str) -> Result<Model, Error> {
    let description = client
        .describe_thing_group(name)
        .await
        .map_err(|e| e.into_not_found(Model::TYPE_NAME, name))?;
    let tags = client
        .list_tags_for_resource(&description.thing_group_arn)
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
            .thing_group_name
            .clone()
            .unwrap_or_else(|| request.generate_identifier(MAX_NAME_LENGTH));
        let tags = request.desired_tags(model.tags.as_ref())?;

        debug!(%name, parent = ?model.parent_group_name, "creating thing group");
        let _summary = client
            .create_thing_group(to_create_request(&model, name.clone(), tags))
            .await?;
        info!(%name, "thing group created");

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
            .describe_thing_group(&name)
            .await
            .map_err(|e| e.into_not_found(Model::TYPE_NAME, &name))?;

        debug!(%name, "updating thing group");
        client
            .update_thing_group(
                &name,
                desired.thing_group_properties.clone().unwrap_or_default(),
            )
            .await?;
        tags::reconcile(client, &current.thing_group_arn, &tags).await?;

        Ok(ProgressEvent::success(describe(client, &name).await?))
    }

    async fn delete(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let name = require_identifier(&request.desired())?;

        if existing(
            client.describe_thing_group(&name).await,
            Model::TYPE_NAME,
            &name,
        )?
        .is_none()
        {
            return Ok(ProgressEvent::done());
        }

        ignore_not_found(
            client.delete_thing_group(&name).await,
            Model::TYPE_NAME,
            &name,
        )?;
        info!(%name, "thing group deleted");

        Ok(ProgressEvent::done())
    }

    async fn list(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let page = client
            .list_thing_groups(request.next_token.clone())
            .await?;
        Ok(ProgressEvent::success_list(
            page.items.into_iter().map(from_summary).collect(),
            page.next_token,
        ))
    }
}
