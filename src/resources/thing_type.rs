//! `AWS::IoT::ThingType`: templates for things of the same kind
//!
//! A thing type can only be deleted some minutes after it was deprecated.
//! Delete deprecates the type first and retries the deletion on later
//! invocations until the service accepts it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    existing, ignore_not_found, model_tags, require_identifier, CALLBACK_DELAY_SECONDS,
    STABILIZATION_ATTEMPTS,
};
use crate::{
    api::{
        CreateThingTypeRequest, IotApi, ResourceSummary, ServiceErrorCode, ThingTypeDescription,
        ThingTypeProperties,
    },
    handler::{CallbackContext, ProgressEvent, ResourceHandlerRequest, ResourceProvider, Stage},
    model::{self, ResourceModel},
    tags::{self, TagList},
    Error,
};

const MAX_NAME_LENGTH: usize = 128;

/// The service refuses to delete a thing type within five minutes of its
/// deprecation.
const DEPRECATION_DELAY_SECONDS: u32 = 300;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
#[resource(type_name = "AWS::IoT::ThingType")]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(primary_identifier, create_only)]
    pub thing_type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecate_thing_type: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub thing_type_properties: Option<ThingTypeProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagList>,
}

impl Model {
    fn deprecated(&self) -> bool {
        self.deprecate_thing_type.unwrap_or(false)
    }
}

fn to_create_request(model: &Model, name: String, tags: TagList) -> CreateThingTypeRequest {
    CreateThingTypeRequest {
        thing_type_name: name,
        properties: model.thing_type_properties.clone().unwrap_or_default(),
        tags,
    }
}

fn from_description(description: ThingTypeDescription, tags: TagList) -> Model {
    Model {
        thing_type_name: Some(description.thing_type_name),
        id: Some(description.thing_type_id),
        arn: Some(description.thing_type_arn),
        deprecate_thing_type: Some(description.deprecated),
        thing_type_properties: Some(description.properties),
        tags: model_tags(tags),
    }
}

fn from_summary(summary: ResourceSummary) -> Model {
    Model {
        thing_type_name: Some(summary.identifier),
        arn: summary.arn,
        ..Default::default()
    }
}

async fn describe(client: &dyn IotApi, name: &str) -> Result<Model, Error> {
    let description = client
        .describe_thing_type(name)
        .await
        .map_err(|e| e.into_not_found(Model::TYPE_NAME, name))?;
    let tags = client
        .list_tags_for_resource(&description.thing_type_arn)
        .await?;
    Ok(from_description(description, tags))
}

/// Deletes a deprecated thing type, or waits another round while the
/// service still rejects the deletion.
async fn remove(
    client: &dyn IotApi,
    name: &str,
    context: CallbackContext,
) -> Result<ProgressEvent<Model>, Error> {
    match client.delete_thing_type(name).await {
        Err(err) if err.service_code() == Some(&ServiceErrorCode::InvalidRequest) => {
            debug!(
                %name,
                remaining_attempts = context.remaining_attempts,
                "thing type not deletable yet"
            );
            Ok(ProgressEvent::in_progress(
                None,
                context,
                CALLBACK_DELAY_SECONDS,
            ))
        }
        result => {
            ignore_not_found(result, Model::TYPE_NAME, name)?;
            info!(%name, "thing type deleted");
            Ok(ProgressEvent::done())
        }
    }
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
            .thing_type_name
            .clone()
            .unwrap_or_else(|| request.generate_identifier(MAX_NAME_LENGTH));
        let tags = request.desired_tags(model.tags.as_ref())?;

        debug!(%name, "creating thing type");
        let _summary = client
            .create_thing_type(to_create_request(&model, name.clone(), tags))
            .await?;
        if model.deprecated() {
            client.deprecate_thing_type(&name, false).await?;
        }
        info!(%name, deprecated = model.deprecated(), "thing type created");

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
            .describe_thing_type(&name)
            .await
            .map_err(|e| e.into_not_found(Model::TYPE_NAME, &name))?;

        if current.deprecated != desired.deprecated() {
            debug!(%name, deprecate = desired.deprecated(), "changing thing type deprecation");
            client
                .deprecate_thing_type(&name, !desired.deprecated())
                .await?;
        }
        tags::reconcile(client, &current.thing_type_arn, &tags).await?;

        Ok(ProgressEvent::success(describe(client, &name).await?))
    }

    async fn delete(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let name = require_identifier(&request.desired())?;

        if let Some(received) = request.callback_context {
            if received.stage != Stage::AwaitingDeprecation {
                return Err(Error::InvalidRequest {
                    message: "callback context of another operation passed to delete".to_owned(),
                });
            }
            let context = received.next_attempt().ok_or_else(|| Error::NotStabilized {
                type_name: Model::TYPE_NAME,
                identifier: name.clone(),
            })?;
            return remove(client, &name, context).await;
        }

        let Some(current) = existing(
            client.describe_thing_type(&name).await,
            Model::TYPE_NAME,
            &name,
        )?
        else {
            return Ok(ProgressEvent::done());
        };

        let context = CallbackContext::new(Stage::AwaitingDeprecation, STABILIZATION_ATTEMPTS);
        if current.deprecated {
            return remove(client, &name, context).await;
        }

        debug!(%name, "deprecating thing type ahead of its deletion");
        client.deprecate_thing_type(&name, false).await?;
        Ok(ProgressEvent::in_progress(
            None,
            context,
            DEPRECATION_DELAY_SECONDS,
        ))
    }

    async fn list(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let page = client.list_thing_types(request.next_token.clone()).await?;
        Ok(ProgressEvent::success_list(
            page.items.into_iter().map(from_summary).collect(),
            page.next_token,
        ))
    }
}
