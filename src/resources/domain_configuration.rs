//! `AWS::IoT::DomainConfiguration`: custom endpoints
//!
//! Create and update wait until the requested status is visible. Delete disables the
//! configuration, deletes it on a later invocation and waits until it is gone.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    existing, found, ignore_not_found, model_tags, require_identifier, CALLBACK_DELAY_SECONDS,
    STABILIZATION_ATTEMPTS,
};
use crate::{
    api::{
        AuthorizerConfig, CreateDomainConfigurationRequest, DomainConfigurationDescription,
        DomainConfigurationStatus, DomainType, IotApi, ResourceSummary, ServerCertificateSummary,
        ServiceType, TlsConfig, UpdateDomainConfigurationRequest,
    },
    handler::{CallbackContext, ProgressEvent, ResourceHandlerRequest, ResourceProvider, Stage},
    model::{self, ResourceModel},
    tags::{self, TagList},
    Error,
};

const MAX_NAME_LENGTH: usize = 128;

/// Domain configurations managed by IoT itself carry this prefix.
const RESERVED_NAME_PREFIX: &str = "iot:";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
#[resource(type_name = "AWS::IoT::DomainConfiguration")]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(primary_identifier, create_only)]
    pub domain_configuration_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub domain_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub server_certificate_arns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub validation_certificate_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub service_type: Option<ServiceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorizer_config: Option<AuthorizerConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_configuration_status: Option<DomainConfigurationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_config: Option<TlsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub domain_type: Option<DomainType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub server_certificates: Option<Vec<ServerCertificateSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagList>,
}

fn to_create_request(model: &Model, name: String, tags: TagList) -> CreateDomainConfigurationRequest {
    CreateDomainConfigurationRequest {
        domain_configuration_name: name,
        domain_name: model.domain_name.clone(),
        server_certificate_arns: model.server_certificate_arns.clone(),
        validation_certificate_arn: model.validation_certificate_arn.clone(),
        authorizer_config: model.authorizer_config.clone(),
        service_type: model.service_type,
        tls_config: model.tls_config.clone(),
        tags,
    }
}

fn to_update_request(
    desired: &Model,
    previous: &Model,
    name: String,
) -> UpdateDomainConfigurationRequest {
    let remove_authorizer_config =
        previous.authorizer_config.is_some() && desired.authorizer_config.is_none();

    UpdateDomainConfigurationRequest {
        domain_configuration_name: name,
        authorizer_config: desired.authorizer_config.clone(),
        status: desired.domain_configuration_status,
        remove_authorizer_config: remove_authorizer_config.then_some(true),
        tls_config: desired.tls_config.clone(),
    }
}

fn from_description(description: DomainConfigurationDescription, tags: TagList) -> Model {
    let server_certificate_arns: Vec<String> = description
        .server_certificates
        .iter()
        .filter_map(|certificate| certificate.server_certificate_arn.clone())
        .collect();

    Model {
        domain_configuration_name: Some(description.domain_configuration_name),
        arn: Some(description.domain_configuration_arn),
        domain_name: description.domain_name,
        server_certificate_arns: (!server_certificate_arns.is_empty())
            .then_some(server_certificate_arns),
        validation_certificate_arn: None,
        service_type: description.service_type,
        authorizer_config: description.authorizer_config,
        domain_configuration_status: description.status,
        tls_config: description.tls_config,
        domain_type: description.domain_type,
        server_certificates: (!description.server_certificates.is_empty())
            .then_some(description.server_certificates),
        tags: model_tags(tags),
    }
}

fn from_summary(summary: ResourceSummary) -> Model {
    Model {
        domain_configuration_name: Some(summary.identifier),
        arn: summary.arn,
        ..Default::default()
    }
}

async fn describe(client: &dyn IotApi, name: &str) -> Result<Model, Error> {
    let description = client
        .describe_domain_configuration(name)
        .await
        .map_err(|e| e.into_not_found(Model::TYPE_NAME, name))?;
    let tags = client
        .list_tags_for_resource(&description.domain_configuration_arn)
        .await?;
    Ok(from_description(description, tags))
}

fn not_stabilized(name: &str) -> Error {
    Error::NotStabilized {
        type_name: Model::TYPE_NAME,
        identifier: name.to_owned(),
    }
}

/// The context of the next invocation: a fresh one for `stage`, or the
/// received one with one attempt less.
fn next_context(
    received: Option<CallbackContext>,
    stage: Stage,
    name: &str,
) -> Result<CallbackContext, Error> {
    match received {
        Some(context) => context.next_attempt().ok_or_else(|| not_stabilized(name)),
        None => Ok(CallbackContext::new(stage, STABILIZATION_ATTEMPTS)),
    }
}

/// Succeeds once the status of `desired` is visible, keeps waiting otherwise.
///
/// `desired` must carry the name. It is handed back to the next invocation.
async fn settle(
    client: &dyn IotApi,
    desired: Model,
    context: Option<CallbackContext>,
) -> Result<ProgressEvent<Model>, Error> {
    let name = require_identifier(&desired)?;
    let current = describe(client, &name).await?;

    if desired
        .domain_configuration_status
        .map_or(true, |status| current.domain_configuration_status == Some(status))
    {
        return Ok(ProgressEvent::success(current));
    }

    let context = next_context(context, Stage::AwaitingStatus, &name)?;
    debug!(
        %name,
        remaining_attempts = context.remaining_attempts,
        "waiting for domain configuration status"
    );
    Ok(ProgressEvent::in_progress(
        Some(desired),
        context,
        CALLBACK_DELAY_SECONDS,
    ))
}

/// Deletes a disabled domain configuration and waits until it is gone.
async fn remove(
    client: &dyn IotApi,
    name: &str,
    context: CallbackContext,
) -> Result<ProgressEvent<Model>, Error> {
    ignore_not_found(
        client.delete_domain_configuration(name).await,
        Model::TYPE_NAME,
        name,
    )?;
    info!(%name, "domain configuration deleted");
    await_deletion(client, name, context).await
}

async fn await_deletion(
    client: &dyn IotApi,
    name: &str,
    context: CallbackContext,
) -> Result<ProgressEvent<Model>, Error> {
    if found(client.describe_domain_configuration(name).await)?.is_none() {
        return Ok(ProgressEvent::done());
    }
    Ok(ProgressEvent::in_progress(
        None,
        context.advance(Stage::AwaitingDeletion),
        CALLBACK_DELAY_SECONDS,
    ))
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

        let name = model
            .domain_configuration_name
            .clone()
            .unwrap_or_else(|| request.generate_identifier(MAX_NAME_LENGTH));
        let tags = request.desired_tags(model.tags.as_ref())?;

        debug!(%name, "creating domain configuration");
        let _summary = client
            .create_domain_configuration(to_create_request(&model, name.clone(), tags))
            .await?;
        info!(%name, "domain configuration created");

        // new configurations start out enabled
        if model.domain_configuration_status == Some(DomainConfigurationStatus::Disabled) {
            client
                .update_domain_configuration(UpdateDomainConfigurationRequest {
                    domain_configuration_name: name.clone(),
                    status: Some(DomainConfigurationStatus::Disabled),
                    ..Default::default()
                })
                .await?;
        }

        model.domain_configuration_name = Some(name);
        settle(client, model, None).await
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
        if request.callback_context.is_some() {
            return settle(client, request.desired(), request.callback_context).await;
        }

        let (desired, previous) = request.update_models()?;
        let name = require_identifier(&desired)?;
        let tags = request.desired_tags(desired.tags.as_ref())?;

        let current = client
            .describe_domain_configuration(&name)
            .await
            .map_err(|e| e.into_not_found(Model::TYPE_NAME, &name))?;

        debug!(%name, "updating domain configuration");
        client
            .update_domain_configuration(to_update_request(&desired, &previous, name.clone()))
            .await?;
        tags::reconcile(client, &current.domain_configuration_arn, &tags).await?;

        settle(client, desired, None).await
    }

    async fn delete(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let name = require_identifier(&request.desired())?;

        let Some(received) = request.callback_context else {
            let Some(current) = existing(
                client.describe_domain_configuration(&name).await,
                Model::TYPE_NAME,
                &name,
            )?
            else {
                return Ok(ProgressEvent::done());
            };

            let context = CallbackContext::new(Stage::AwaitingDisable, STABILIZATION_ATTEMPTS);
            if current.status == Some(DomainConfigurationStatus::Enabled) {
                debug!(%name, "disabling domain configuration");
                client
                    .update_domain_configuration(UpdateDomainConfigurationRequest {
                        domain_configuration_name: name.clone(),
                        status: Some(DomainConfigurationStatus::Disabled),
                        ..Default::default()
                    })
                    .await?;
                return Ok(ProgressEvent::in_progress(
                    None,
                    context,
                    CALLBACK_DELAY_SECONDS,
                ));
            }
            return remove(client, &name, context).await;
        };

        let context = next_context(Some(received), received.stage, &name)?;
        debug!(
            %name,
            stage = ?context.stage,
            remaining_attempts = context.remaining_attempts,
            "continuing domain configuration deletion"
        );

        match context.stage {
            Stage::AwaitingDisable => {
                let Some(current) = found(client.describe_domain_configuration(&name).await)?
                else {
                    return Ok(ProgressEvent::done());
                };
                if current.status == Some(DomainConfigurationStatus::Disabled) {
                    remove(client, &name, context).await
                } else {
                    Ok(ProgressEvent::in_progress(
                        None,
                        context,
                        CALLBACK_DELAY_SECONDS,
                    ))
                }
            }
            Stage::AwaitingDeletion => await_deletion(client, &name, context).await,
            Stage::AwaitingStatus | Stage::AwaitingDeprecation => Err(Error::InvalidRequest {
                message: "callback context of another operation passed to delete".to_owned(),
            }),
        }
    }

    async fn list(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let page = client
            .list_domain_configurations(request.next_token.clone())
            .await?;
        Ok(ProgressEvent::success_list(
            page.items
                .into_iter()
                .filter(|summary| !summary.identifier.starts_with(RESERVED_NAME_PREFIX))
                .map(from_summary)
                .collect(),
            page.next_token,
        ))
    }
}
