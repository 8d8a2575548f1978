//! `AWS::IoT::Logging`: the account-wide v2 logging options
//!
//! There is at most one such resource per account and region. Its identifier
//! is the account ID, which must match the account the handler runs for.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{existing, found, require_identifier};
use crate::{
    api::{IotApi, LogLevel, LoggingOptions},
    handler::{ProgressEvent, ResourceHandlerRequest, ResourceProvider},
    model::{self, ResourceModel},
    Error,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
#[resource(type_name = "AWS::IoT::Logging")]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[resource(primary_identifier, create_only)]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_log_level: Option<LogLevel>,
}

fn to_options(model: &Model) -> LoggingOptions {
    LoggingOptions {
        role_arn: model.role_arn.clone(),
        default_log_level: model.default_log_level,
        disable_all_logs: false,
    }
}

fn from_options(account_id: String, options: LoggingOptions) -> Model {
    Model {
        account_id: Some(account_id),
        role_arn: options.role_arn,
        default_log_level: options.default_log_level,
    }
}

/// The account ID of the model, checked against the invoking account.
fn account_id(request: &ResourceHandlerRequest<Model>, model: &Model) -> Result<String, Error> {
    let account_id = require_identifier(model)?;
    match request.aws_account_id {
        Some(ref invoking) if *invoking != account_id => Err(Error::InvalidRequest {
            message: format!(
                "account id {account_id} does not match the account {invoking} of the request"
            ),
        }),
        _ => Ok(account_id),
    }
}

async fn describe(client: &dyn IotApi, account_id: String) -> Result<Model, Error> {
    let options = client
        .get_v2_logging_options()
        .await
        .map_err(|e| e.into_not_found(Model::TYPE_NAME, &account_id))?;
    if !options.is_configured() {
        return Err(Error::NotFound {
            type_name: Model::TYPE_NAME,
            identifier: account_id,
        });
    }
    Ok(from_options(account_id, options))
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
        let account_id = account_id(request, &model)?;

        // SetV2LoggingOptions would silently overwrite the current options
        if found(client.get_v2_logging_options().await)?
            .is_some_and(|options| options.is_configured())
        {
            return Err(Error::AlreadyExists {
                type_name: Model::TYPE_NAME,
                identifier: account_id,
            });
        }

        debug!(%account_id, "setting logging options");
        client.set_v2_logging_options(to_options(&model)).await?;
        info!(%account_id, "logging configured");

        Ok(ProgressEvent::success(describe(client, account_id).await?))
    }

    async fn read(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let account_id = account_id(request, &request.desired())?;
        Ok(ProgressEvent::success(describe(client, account_id).await?))
    }

    async fn update(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let (desired, _previous) = request.update_models()?;
        let account_id = account_id(request, &desired)?;

        let _current = describe(client, account_id.clone()).await?;

        debug!(%account_id, "updating logging options");
        client.set_v2_logging_options(to_options(&desired)).await?;

        Ok(ProgressEvent::success(describe(client, account_id).await?))
    }

    async fn delete(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let account_id = account_id(request, &request.desired())?;

        let Some(current) = existing(
            client.get_v2_logging_options().await,
            Model::TYPE_NAME,
            &account_id,
        )?
        .filter(LoggingOptions::is_configured) else {
            return Ok(ProgressEvent::done());
        };

        debug!(%account_id, "disabling all logs");
        client
            .set_v2_logging_options(LoggingOptions {
                disable_all_logs: true,
                ..current
            })
            .await?;
        info!(%account_id, "logging disabled");

        Ok(ProgressEvent::done())
    }

    async fn list(
        &self,
        client: &dyn IotApi,
        request: &ResourceHandlerRequest<Model>,
    ) -> Result<ProgressEvent<Model>, Error> {
        let Some(account_id) = request.aws_account_id.clone() else {
            return Err(Error::MissingProperty {
                type_name: Model::TYPE_NAME,
                property: "AwsAccountId",
            });
        };

        let models = found(client.get_v2_logging_options().await)?
            .filter(LoggingOptions::is_configured)
            .map(|options| from_options(account_id, options))
            .into_iter()
            .collect();
        Ok(ProgressEvent::success_list(models, None))
    }
}
