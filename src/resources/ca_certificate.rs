//! `AWS::IoT::CACertificate`: CA certificates registered with IoT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    existing, found, ignore_not_found, model_tags, require_identifier, CALLBACK_DELAY_SECONDS,
    STABILIZATION_ATTEMPTS,
};
use crate::{
    api::{
        AutoRegistrationStatus, CaCertificateDescription, CaCertificateStatus, CertificateMode,
        IotApi, RegisterCaCertificateRequest, RegistrationConfig, ResourceSummary,
        UpdateCaCertificateRequest,
    },
    handler::{CallbackContext, ProgressEvent, ResourceHandlerRequest, ResourceProvider, Stage},
    model::{self, ResourceModel},
    tags::{self, TagList},
    Error,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
#[resource(type_name = "AWS::IoT::CACertificate")]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(primary_identifier, read_only)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub arn: Option<String>,
    #[serde(rename = "CACertificatePem", skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub ca_certificate_pem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub verification_certificate_pem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub certificate_mode: Option<CertificateMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CaCertificateStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_registration_status: Option<AutoRegistrationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_config: Option<RegistrationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_auto_registration: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagList>,
}

fn to_create_request(model: &Model, tags: TagList) -> Result<RegisterCaCertificateRequest, Error> {
    let ca_certificate = model
        .ca_certificate_pem
        .clone()
        .ok_or(Error::MissingProperty {
            type_name: Model::TYPE_NAME,
            property: "CACertificatePem",
        })?;

    Ok(RegisterCaCertificateRequest {
        ca_certificate,
        verification_certificate: model.verification_certificate_pem.clone(),
        set_as_active: model.status == Some(CaCertificateStatus::Active),
        allow_auto_registration: model.auto_registration_status
            == Some(AutoRegistrationStatus::Enable),
        registration_config: model.registration_config.clone(),
        certificate_mode: model.certificate_mode,
        tags,
    })
}

fn to_update_request(model: &Model, certificate_id: String) -> UpdateCaCertificateRequest {
    UpdateCaCertificateRequest {
        certificate_id,
        new_status: model.status,
        new_auto_registration_status: model.auto_registration_status,
        registration_config: model.registration_config.clone(),
        remove_auto_registration: model.remove_auto_registration,
    }
}

fn from_description(description: CaCertificateDescription, tags: TagList) -> Model {
    Model {
        id: Some(description.certificate_id),
        arn: Some(description.certificate_arn),
        ca_certificate_pem: description.certificate_pem,
        verification_certificate_pem: None,
        certificate_mode: description.certificate_mode,
        status: description.status,
        auto_registration_status: description.auto_registration_status,
        registration_config: description.registration_config,
        remove_auto_registration: None,
        tags: model_tags(tags),
    }
}

fn from_summary(summary: ResourceSummary) -> Model {
    Model {
        id: Some(summary.identifier),
        arn: summary.arn,
        ..Default::default()
    }
}

async fn describe(client: &dyn IotApi, certificate_id: &str) -> Result<Model, Error> {
    let description = client
        .describe_ca_certificate(certificate_id)
        .await
        .map_err(|e| e.into_not_found(Model::TYPE_NAME, certificate_id))?;
    let tags = client
        .list_tags_for_resource(&description.certificate_arn)
        .await?;
    Ok(from_description(description, tags))
}

/// Done once the certificate no longer shows up, another round otherwise.
async fn await_deletion(
    client: &dyn IotApi,
    id: &str,
    context: CallbackContext,
) -> Result<ProgressEvent<Model>, Error> {
    if found(client.describe_ca_certificate(id).await)?.is_none() {
        return Ok(ProgressEvent::done());
    }
    Ok(ProgressEvent::in_progress(
        None,
        context,
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
        let model = request.desired();
        model::validate_create(&model)?;

        let tags = request.desired_tags(model.tags.as_ref())?;
        let registration = to_create_request(&model, tags)?;

        debug!("registering ca certificate");
        let summary = client.register_ca_certificate(registration).await?;
        info!(id = %summary.identifier, "ca certificate registered");

        Ok(ProgressEvent::success(
            describe(client, &summary.identifier).await?,
        ))
    }

    async fn read(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let id = require_identifier(&request.desired())?;
        Ok(ProgressEvent::success(describe(client, &id).await?))
    }

    async fn update(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let (desired, _previous) = request.update_models()?;
        let id = require_identifier(&desired)?;
        let tags = request.desired_tags(desired.tags.as_ref())?;

        let current = client
            .describe_ca_certificate(&id)
            .await
            .map_err(|e| e.into_not_found(Model::TYPE_NAME, &id))?;

        debug!(%id, "updating ca certificate");
        client
            .update_ca_certificate(to_update_request(&desired, id.clone()))
            .await?;
        tags::reconcile(client, &current.certificate_arn, &tags).await?;

        Ok(ProgressEvent::success(describe(client, &id).await?))
    }

    async fn delete(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let id = require_identifier(&request.desired())?;

        if let Some(received) = request.callback_context {
            if received.stage != Stage::AwaitingDeletion {
                return Err(Error::InvalidRequest {
                    message: "callback context of another operation passed to delete".to_owned(),
                });
            }
            let context = received.next_attempt().ok_or_else(|| Error::NotStabilized {
                type_name: Model::TYPE_NAME,
                identifier: id.clone(),
            })?;
            debug!(
                %id,
                remaining_attempts = context.remaining_attempts,
                "waiting for ca certificate deletion"
            );
            return await_deletion(client, &id, context).await;
        }

        let Some(current) = existing(
            client.describe_ca_certificate(&id).await,
            Model::TYPE_NAME,
            &id,
        )?
        else {
            return Ok(ProgressEvent::done());
        };

        if current.status == Some(CaCertificateStatus::Active) {
            debug!(%id, "deactivating ca certificate");
            client
                .update_ca_certificate(UpdateCaCertificateRequest {
                    certificate_id: id.clone(),
                    new_status: Some(CaCertificateStatus::Inactive),
                    ..Default::default()
                })
                .await?;
        }

        ignore_not_found(
            client.delete_ca_certificate(&id).await,
            Model::TYPE_NAME,
            &id,
        )?;
        info!(%id, "ca certificate deleted");

        await_deletion(
            client,
            &id,
            CallbackContext::new(Stage::AwaitingDeletion, STABILIZATION_ATTEMPTS),
        )
        .await
    }

    async fn list(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let page = client
            .list_ca_certificates(request.next_token.clone())
            .await?;
        Ok(ProgressEvent::success_list(
            page.items.into_iter().map(from_summary).collect(),
            page.next_token,
        ))
    }
}
