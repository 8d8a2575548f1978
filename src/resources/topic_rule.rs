//! `AWS::IoT::TopicRule`: message routing rules

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{existing, ignore_not_found, model_tags, require_identifier};
use crate::{
    api::{IotApi, ResourceSummary, ServiceErrorCode, TopicRuleDescription, TopicRulePayload},
    handler::{ProgressEvent, ResourceHandlerRequest, ResourceProvider},
    identifier,
    model::{self, ResourceModel},
    tags::{self, TagList},
    Error,
};

const MAX_NAME_LENGTH: usize = 128;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
#[resource(type_name = "AWS::IoT::TopicRule")]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(primary_identifier, create_only)]
    pub rule_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_rule_payload: Option<TopicRulePayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagList>,
}

fn payload(model: &Model) -> Result<TopicRulePayload, Error> {
    model
        .topic_rule_payload
        .clone()
        .ok_or(Error::MissingProperty {
            type_name: Model::TYPE_NAME,
            property: "TopicRulePayload",
        })
}

fn from_description(description: TopicRuleDescription, tags: TagList) -> Model {
    Model {
        rule_name: Some(description.rule_name),
        arn: Some(description.rule_arn),
        topic_rule_payload: Some(description.payload),
        tags: model_tags(tags),
    }
}

fn from_summary(summary: ResourceSummary) -> Model {
    Model {
        rule_name: Some(summary.identifier),
        arn: summary.arn,
        ..Default::default()
    }
}

/// GetTopicRule answers `Unauthorized` for rules that do not exist.
async fn get_rule(client: &dyn IotApi, rule_name: &str) -> Result<TopicRuleDescription, Error> {
    client.get_topic_rule(rule_name).await.map_err(|e| {
        if e.service_code() == Some(&ServiceErrorCode::Unauthorized) {
            Error::NotFound {
                type_name: Model::TYPE_NAME,
                identifier: rule_name.to_owned(),
            }
        } else {
            e.into_not_found(Model::TYPE_NAME, rule_name)
        }
    })
}

async fn describe(client: &dyn IotApi, rule_name: &str) -> Result<Model, Error> {
    let description = get_rule(client, rule_name).await?;
    let tags = client.list_tags_for_resource(&description.rule_arn).await?;
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

        let rule_name = model.rule_name.clone().unwrap_or_else(|| {
            identifier::sanitize_rule_name(&request.generate_identifier(MAX_NAME_LENGTH))
        });
        let payload = payload(&model)?;
        let tags = request.desired_tags(model.tags.as_ref())?;

        debug!(%rule_name, "creating topic rule");
        client.create_topic_rule(&rule_name, payload, tags).await?;
        info!(%rule_name, "topic rule created");

        Ok(ProgressEvent::success(describe(client, &rule_name).await?))
    }

    async fn read(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let rule_name = require_identifier(&request.desired())?;
        Ok(ProgressEvent::success(describe(client, &rule_name).await?))
    }

    async fn update(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let (desired, _previous) = request.update_models()?;
        let rule_name = require_identifier(&desired)?;
        let payload = payload(&desired)?;
        let tags = request.desired_tags(desired.tags.as_ref())?;

        let current = get_rule(client, &rule_name).await?;

        debug!(%rule_name, "replacing topic rule");
        client.replace_topic_rule(&rule_name, payload).await?;
        tags::reconcile(client, &current.rule_arn, &tags).await?;

        Ok(ProgressEvent::success(describe(client, &rule_name).await?))
    }

    async fn delete(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let rule_name = require_identifier(&request.desired())?;

        if existing(get_rule(client, &rule_name).await, Model::TYPE_NAME, &rule_name)?.is_none() {
            return Ok(ProgressEvent::done());
        }

        ignore_not_found(
            client.delete_topic_rule(&rule_name).await,
            Model::TYPE_NAME,
            &rule_name,
        )?;
        info!(%rule_name, "topic rule deleted");

        Ok(ProgressEvent::done())
    }

    async fn list(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let page = client
            .list_topic_rules(request.next_token.clone())
            .await?;
        Ok(ProgressEvent::success_list(
            page.items.into_iter().map(from_summary).collect(),
            page.next_token,
        ))
    }
}
