//! `AWS::IoT::TopicRuleDestination`: HTTP and VPC targets of topic rules
//!
//! A VPC destination is provisioned asynchronously, so create waits until
//! it leaves `IN_PROGRESS`. An HTTP destination stays `IN_PROGRESS` until
//! its endpoint confirms it, which can take arbitrarily long. Its create
//! returns right away.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    existing, ignore_not_found, require_identifier, CALLBACK_DELAY_SECONDS, STABILIZATION_ATTEMPTS,
};
use crate::{
    api::{
        CreateTopicRuleDestinationRequest, HttpUrlDestinationProperties, IotApi, ResourceSummary,
        TopicRuleDestinationDescription, TopicRuleDestinationStatus, VpcDestinationProperties,
    },
    handler::{CallbackContext, ProgressEvent, ResourceHandlerRequest, ResourceProvider, Stage},
    model::{self, ResourceModel},
    Error,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
#[resource(type_name = "AWS::IoT::TopicRuleDestination")]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(primary_identifier, read_only)]
    pub arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TopicRuleDestinationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub status_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub http_url_properties: Option<HttpUrlDestinationProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub vpc_properties: Option<VpcDestinationProperties>,
}

fn to_create_request(model: &Model) -> Result<CreateTopicRuleDestinationRequest, Error> {
    if model.http_url_properties.is_some() == model.vpc_properties.is_some() {
        return Err(Error::InvalidRequest {
            message: "exactly one of HttpUrlProperties and VpcProperties must be set".to_owned(),
        });
    }
    Ok(CreateTopicRuleDestinationRequest {
        http_url_properties: model.http_url_properties.clone(),
        vpc_properties: model.vpc_properties.clone(),
    })
}

fn from_description(description: TopicRuleDestinationDescription) -> Model {
    Model {
        arn: Some(description.arn),
        status: description.status,
        status_reason: description.status_reason,
        http_url_properties: description.http_url_properties,
        vpc_properties: description.vpc_properties,
    }
}

fn from_summary(summary: ResourceSummary) -> Model {
    Model {
        arn: Some(summary.identifier),
        ..Default::default()
    }
}

async fn get(client: &dyn IotApi, arn: &str) -> Result<TopicRuleDestinationDescription, Error> {
    client
        .get_topic_rule_destination(arn)
        .await
        .map_err(|e| e.into_not_found(Model::TYPE_NAME, arn))
}

fn next_context(received: Option<CallbackContext>, arn: &str) -> Result<CallbackContext, Error> {
    match received {
        Some(context) => context.next_attempt().ok_or_else(|| Error::NotStabilized {
            type_name: Model::TYPE_NAME,
            identifier: arn.to_owned(),
        }),
        None => Ok(CallbackContext::new(
            Stage::AwaitingStatus,
            STABILIZATION_ATTEMPTS,
        )),
    }
}

/// Waits for a provisioning VPC destination, then applies the status of
/// `desired` if the service allows the change.
///
/// `Enabled` cannot be set while the destination is `IN_PROGRESS`, so an
/// unconfirmed HTTP destination keeps its status.
async fn settle(
    client: &dyn IotApi,
    desired: Model,
    context: Option<CallbackContext>,
) -> Result<ProgressEvent<Model>, Error> {
    let arn = require_identifier(&desired)?;
    let current = get(client, &arn).await?;
    let in_progress = current.status == Some(TopicRuleDestinationStatus::InProgress);

    if in_progress && current.vpc_properties.is_some() {
        let context = next_context(context, &arn)?;
        debug!(
            %arn,
            remaining_attempts = context.remaining_attempts,
            "waiting for vpc destination"
        );
        return Ok(ProgressEvent::in_progress(
            Some(desired),
            context,
            CALLBACK_DELAY_SECONDS,
        ));
    }

    let change = desired.status.filter(|&status| {
        current.status != Some(status)
            && match status {
                TopicRuleDestinationStatus::Enabled => !in_progress,
                TopicRuleDestinationStatus::Disabled => true,
                TopicRuleDestinationStatus::InProgress
                | TopicRuleDestinationStatus::Error
                | TopicRuleDestinationStatus::Deleting => false,
            }
    });

    let Some(status) = change else {
        return Ok(ProgressEvent::success(from_description(current)));
    };

    debug!(%arn, status = status.as_str(), "changing topic rule destination status");
    client.update_topic_rule_destination(&arn, status).await?;
    Ok(ProgressEvent::success(from_description(
        get(client, &arn).await?,
    )))
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
        let mut model = request.desired();
        if request.callback_context.is_some() {
            return settle(client, model, request.callback_context).await;
        }

        model::validate_create(&model)?;
        let create_request = to_create_request(&model)?;

        let description = client.create_topic_rule_destination(create_request).await?;
        info!(arn = %description.arn, "topic rule destination created");

        model.arn = Some(description.arn);
        settle(client, model, None).await
    }

    async fn read(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let arn = require_identifier(&request.desired())?;
        Ok(ProgressEvent::success(from_description(
            get(client, &arn).await?,
        )))
    }

    async fn update(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let (desired, _previous) = request.update_models()?;
        settle(client, desired, request.callback_context).await
    }

    async fn delete(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let arn = require_identifier(&request.desired())?;

        if existing(
            client.get_topic_rule_destination(&arn).await,
            Model::TYPE_NAME,
            &arn,
        )?
        .is_none()
        {
            return Ok(ProgressEvent::done());
        }

        ignore_not_found(
            client.delete_topic_rule_destination(&arn).await,
            Model::TYPE_NAME,
            &arn,
        )?;
        info!(%arn, "topic rule destination deleted");

        Ok(ProgressEvent::done())
    }

    async fn list(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let page = client
            .list_topic_rule_destinations(request.next_token.clone())
            .await?;
        Ok(ProgressEvent::success_list(
            page.items.into_iter().map(from_summary).collect(),
            page.next_token,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        handler::{self, Action, HandlerErrorCode, OperationStatus},
        testing::{self, FakeIot},
    };

    fn http() -> Model {
        Model {
            http_url_properties: Some(HttpUrlDestinationProperties {
                confirmation_url: Some("https://example.com/confirm".to_owned()),
            }),
            ..Default::default()
        }
    }

    fn vpc(status: Option<TopicRuleDestinationStatus>) -> Model {
        Model {
            status,
            vpc_properties: Some(VpcDestinationProperties {
                subnet_ids: Some(vec!["subnet-1".to_owned()]),
                security_groups: Some(vec!["sg-1".to_owned()]),
                vpc_id: Some("vpc-1".to_owned()),
                role_arn: Some("arn:aws:iam::123456789012:role/destination".to_owned()),
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn http_destination_is_created_unconfirmed() {
        let client = FakeIot::new();
        let desired = Model {
            status: Some(TopicRuleDestinationStatus::Enabled),
            ..http()
        };

        let event = Provider
            .create(&client, &testing::request("Destination", desired))
            .await
            .unwrap();

        assert_eq!(event.status, OperationStatus::Success);
        let model = event.resource_model.unwrap();
        assert_eq!(model.status, Some(TopicRuleDestinationStatus::InProgress));
        assert!(model
            .arn
            .is_some_and(|arn| arn.starts_with(&testing::arn("ruledestination/http/"))));
        assert!(!client.calls().contains(&"update_topic_rule_destination"));
    }

    #[tokio::test]
    async fn vpc_destination_waits_for_provisioning() {
        let client = FakeIot::new();
        client.state().pending_describes = 1;

        let first = Provider
            .create(&client, &testing::request("Destination", vpc(None)))
            .await
            .unwrap();
        assert_eq!(first.status, OperationStatus::InProgress);
        assert_eq!(
            first.callback_context,
            Some(CallbackContext::new(
                Stage::AwaitingStatus,
                STABILIZATION_ATTEMPTS
            ))
        );

        let model = first.resource_model.unwrap();
        assert!(model.arn.is_some());
        let second = Provider
            .create(
                &client,
                &ResourceHandlerRequest {
                    callback_context: first.callback_context,
                    ..testing::request("Destination", model)
                },
            )
            .await
            .unwrap();

        assert_eq!(second.status, OperationStatus::Success);
        assert_eq!(
            second.resource_model.unwrap().status,
            Some(TopicRuleDestinationStatus::Enabled)
        );
        assert_eq!(
            client
                .calls()
                .into_iter()
                .filter(|call| *call == "create_topic_rule_destination")
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn vpc_destination_gives_up_when_out_of_attempts() {
        let client = FakeIot::new();
        client.state().pending_describes = 2;
        let first = Provider
            .create(&client, &testing::request("Destination", vpc(None)))
            .await
            .unwrap();

        let err = Provider
            .create(
                &client,
                &ResourceHandlerRequest {
                    callback_context: Some(CallbackContext::new(Stage::AwaitingStatus, 0)),
                    ..testing::request("Destination", first.resource_model.unwrap())
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotStabilized { .. }));
    }

    #[tokio::test]
    async fn create_disabled_vpc_destination() {
        let client = FakeIot::new();

        let model = Provider
            .create(
                &client,
                &testing::request(
                    "Destination",
                    vpc(Some(TopicRuleDestinationStatus::Disabled)),
                ),
            )
            .await
            .unwrap()
            .resource_model
            .unwrap();

        assert_eq!(model.status, Some(TopicRuleDestinationStatus::Disabled));
    }

    #[tokio::test]
    async fn update_disables_destination() {
        let client = FakeIot::new();
        let created = Provider
            .create(&client, &testing::request("Destination", vpc(None)))
            .await
            .unwrap()
            .resource_model
            .unwrap();
        assert_eq!(created.status, Some(TopicRuleDestinationStatus::Enabled));

        let desired = Model {
            status: Some(TopicRuleDestinationStatus::Disabled),
            ..created.clone()
        };
        let model = Provider
            .update(
                &client,
                &testing::update_request("Destination", created, desired),
            )
            .await
            .unwrap()
            .resource_model
            .unwrap();

        assert_eq!(model.status, Some(TopicRuleDestinationStatus::Disabled));
    }

    #[tokio::test]
    async fn create_needs_exactly_one_destination_kind() {
        let client = FakeIot::new();
        let both = Model {
            http_url_properties: http().http_url_properties,
            ..vpc(None)
        };

        for desired in [both, Model::default()] {
            let event = handler::invoke(
                &Provider,
                &client,
                Action::Create,
                testing::request("Destination", desired),
            )
            .await;
            assert_eq!(event.error_code, Some(HandlerErrorCode::InvalidRequest));
        }
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_twice_succeeds() {
        let client = FakeIot::new();
        let created = Provider
            .create(&client, &testing::request("Destination", http()))
            .await
            .unwrap()
            .resource_model
            .unwrap();

        let first = handler::invoke(
            &Provider,
            &client,
            Action::Delete,
            testing::request("Destination", created.clone()),
        )
        .await;
        let second = handler::invoke(
            &Provider,
            &client,
            Action::Delete,
            testing::request("Destination", created),
        )
        .await;

        assert_eq!(first.status, OperationStatus::Success);
        assert_eq!(second.status, OperationStatus::Success);
        assert!(client.state().topic_rule_destinations.is_empty());
    }
}
