//! `AWS::IoT::Thing`: registry entries of devices
//!
//! Things carry no tags. An update replaces the whole attribute set, so
//! attributes dropped from the model are removed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{existing, ignore_not_found, require_identifier};
use crate::{
    api::{AttributePayload, IotApi, ResourceSummary, ThingDescription},
    handler::{ProgressEvent, ResourceHandlerRequest, ResourceProvider},
    model::{self, ResourceModel},
    Error,
};

const MAX_NAME_LENGTH: usize = 128;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
#[resource(type_name = "AWS::IoT::Thing")]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(primary_identifier, create_only)]
    pub thing_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_payload: Option<AttributePayload>,
}

fn to_attribute_payload(model: &Model) -> AttributePayload {
    AttributePayload {
        attributes: Some(
            model
                .attribute_payload
                .as_ref()
                .and_then(|payload| payload.attributes.clone())
                .unwrap_or_default(),
        ),
    }
}

fn from_description(description: ThingDescription) -> Model {
    Model {
        thing_name: Some(description.thing_name),
        id: Some(description.thing_id),
        arn: Some(description.thing_arn),
        attribute_payload: Some(AttributePayload {
            attributes: Some(description.attributes),
        }),
    }
}

fn from_summary(summary: ResourceSummary) -> Model {
    Model {
        thing_name: Some(summary.identifier),
        arn: summary.arn,
        ..Default::default()
    }
}

async fn describe(client: &dyn IotApi, name: &str) -> Result<Model, Error> {
    let description = client
        .describe_thing(name)
        .await
        .map_err(|e| e.into_not_found(Model::TYPE_NAME, name))?;
    Ok(from_description(description))
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
            .thing_name
            .clone()
            .unwrap_or_else(|| request.generate_identifier(MAX_NAME_LENGTH));

        debug!(%name, "creating thing");
        let _summary = client
            .create_thing(&name, to_attribute_payload(&model))
            .await?;
        info!(%name, "thing created");

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

        debug!(%name, "updating thing");
        client
            .update_thing(&name, to_attribute_payload(&desired))
            .await
            .map_err(|e| e.into_not_found(Model::TYPE_NAME, &name))?;

        Ok(ProgressEvent::success(describe(client, &name).await?))
    }

    async fn delete(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let name = require_identifier(&request.desired())?;

        if existing(client.describe_thing(&name).await, Model::TYPE_NAME, &name)?.is_none() {
            return Ok(ProgressEvent::done());
        }

        ignore_not_found(client.delete_thing(&name).await, Model::TYPE_NAME, &name)?;
        info!(%name, "thing deleted");

        Ok(ProgressEvent::done())
    }

    async fn list(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let page = client.list_things(request.next_token.clone()).await?;
        Ok(ProgressEvent::success_list(
            page.items.into_iter().map(from_summary).collect(),
            page.next_token,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::{
        handler::{self, Action, HandlerErrorCode, OperationStatus},
        testing::{self, FakeIot},
    };

    fn desired(name: Option<&str>, attributes: &[(&str, &str)]) -> Model {
        Model {
            thing_name: name.map(ToOwned::to_owned),
            attribute_payload: Some(AttributePayload {
                attributes: Some(
                    attributes
                        .iter()
                        .map(|&(key, value)| (key.to_owned(), value.to_owned()))
                        .collect(),
                ),
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_with_generated_name() {
        let client = FakeIot::new();

        let model = Provider
            .create(
                &client,
                &testing::request("Sensor", desired(None, &[("room", "kitchen")])),
            )
            .await
            .unwrap()
            .resource_model
            .unwrap();

        let name = model.thing_name.clone().unwrap();
        assert!(name.starts_with("my-stack-Sensor-"), "{name}");
        assert_eq!(model.arn, Some(testing::arn(&format!("thing/{name}"))));
        assert!(model.id.is_some());
        assert_eq!(
            model.attribute_payload.and_then(|payload| payload.attributes),
            Some(BTreeMap::from([("room".to_owned(), "kitchen".to_owned())]))
        );
    }

    #[tokio::test]
    async fn update_replaces_all_attributes() {
        let client = FakeIot::new();
        let created = Provider
            .create(
                &client,
                &testing::request(
                    "Sensor",
                    desired(Some("sensor"), &[("room", "kitchen"), ("floor", "1")]),
                ),
            )
            .await
            .unwrap()
            .resource_model
            .unwrap();

        let updated = Model {
            attribute_payload: desired(None, &[("room", "hall")]).attribute_payload,
            ..created.clone()
        };
        let model = Provider
            .update(&client, &testing::update_request("Sensor", created, updated))
            .await
            .unwrap()
            .resource_model
            .unwrap();

        assert_eq!(
            client.state().things["sensor"].attributes,
            BTreeMap::from([("room".to_owned(), "hall".to_owned())])
        );
        assert_eq!(
            model.attribute_payload.and_then(|payload| payload.attributes),
            Some(BTreeMap::from([("room".to_owned(), "hall".to_owned())]))
        );
    }

    #[tokio::test]
    async fn renaming_is_not_updatable() {
        let client = FakeIot::new();

        let event = handler::invoke(
            &Provider,
            &client,
            Action::Update,
            testing::update_request(
                "Sensor",
                desired(Some("sensor"), &[]),
                desired(Some("other"), &[]),
            ),
        )
        .await;

        assert_eq!(event.error_code, Some(HandlerErrorCode::NotUpdatable));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_twice_succeeds() {
        let client = FakeIot::new();
        let created = Provider
            .create(&client, &testing::request("Sensor", desired(Some("sensor"), &[])))
            .await
            .unwrap()
            .resource_model
            .unwrap();

        let first = handler::invoke(
            &Provider,
            &client,
            Action::Delete,
            testing::request("Sensor", created.clone()),
        )
        .await;
        let second = handler::invoke(
            &Provider,
            &client,
            Action::Delete,
            testing::request("Sensor", created),
        )
        .await;

        assert_eq!(first.status, OperationStatus::Success);
        assert_eq!(second.status, OperationStatus::Success);
        assert!(client.state().things.is_empty());
        assert_eq!(
            client
                .calls()
                .into_iter()
                .filter(|call| *call == "delete_thing")
                .count(),
            1
        );
    }
}
