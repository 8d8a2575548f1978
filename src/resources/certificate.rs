//! `AWS::IoT::Certificate`: device certificates
//!
//! A certificate is either issued by IoT for a certificate signing request, or
//! an existing certificate is registered, with or without its CA.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{existing, ignore_not_found, require_identifier};
use crate::{
    api::{
        CertificateDescription, CertificateMode, CertificateStatus, IotApi,
        RegisterCertificateRequest, ResourceSummary,
    },
    handler::{ProgressEvent, ResourceHandlerRequest, ResourceProvider},
    model::{self, ResourceModel},
    Error,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
#[resource(type_name = "AWS::IoT::Certificate")]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(primary_identifier, read_only)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(read_only)]
    pub arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub certificate_signing_request: Option<String>,
    #[serde(rename = "CACertificatePem", skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub ca_certificate_pem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub certificate_pem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(create_only)]
    pub certificate_mode: Option<CertificateMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CertificateStatus>,
}

fn from_description(description: CertificateDescription) -> Model {
    Model {
        id: Some(description.certificate_id),
        arn: Some(description.certificate_arn),
        certificate_signing_request: None,
        ca_certificate_pem: None,
        certificate_pem: description.certificate_pem,
        certificate_mode: description.certificate_mode,
        status: description.status,
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
    client
        .describe_certificate(certificate_id)
        .await
        .map(from_description)
        .map_err(|e| e.into_not_found(Model::TYPE_NAME, certificate_id))
}

async fn issue(client: &dyn IotApi, model: &Model) -> Result<ResourceSummary, Error> {
    match (
        model.certificate_signing_request.as_deref(),
        model.certificate_pem.as_deref(),
    ) {
        (Some(csr), _) => {
            debug!("creating certificate from csr");
            client
                .create_certificate_from_csr(csr, model.status == Some(CertificateStatus::Active))
                .await
        }
        (None, Some(pem)) if model.certificate_mode == Some(CertificateMode::SniOnly) => {
            debug!("registering certificate without ca");
            client
                .register_certificate_without_ca(pem, model.status)
                .await
        }
        (None, Some(pem)) => {
            debug!("registering certificate");
            client
                .register_certificate(RegisterCertificateRequest {
                    certificate_pem: pem.to_owned(),
                    ca_certificate_pem: model.ca_certificate_pem.clone(),
                    status: model.status,
                })
                .await
        }
        (None, None) => Err(Error::InvalidRequest {
            message: "either CertificateSigningRequest or CertificatePem is required".to_owned(),
        }),
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

        let summary = issue(client, &model).await?;
        info!(id = %summary.identifier, "certificate created");

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

        if let Some(status) = desired.status {
            debug!(%id, %status, "updating certificate status");
            client
                .update_certificate(&id, status)
                .await
                .map_err(|e| e.into_not_found(Model::TYPE_NAME, &id))?;
        }

        Ok(ProgressEvent::success(describe(client, &id).await?))
    }

    async fn delete(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let id = require_identifier(&request.desired())?;

        let Some(current) = existing(
            client.describe_certificate(&id).await,
            Model::TYPE_NAME,
            &id,
        )?
        else {
            return Ok(ProgressEvent::done());
        };

        if current.status == Some(CertificateStatus::Active) {
            debug!(%id, "deactivating certificate");
            client
                .update_certificate(&id, CertificateStatus::Inactive)
                .await?;
        }

        ignore_not_found(
            client.delete_certificate(&id).await,
            Model::TYPE_NAME,
            &id,
        )?;
        info!(%id, "certificate deleted");

        Ok(ProgressEvent::done())
    }

    async fn list(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let page = client
            .list_certificates(request.next_token.clone())
            .await?;
        Ok(ProgressEvent::success_list(
            page.items.into_iter().map(from_summary).collect(),
            page.next_token,
        ))
    }
}
