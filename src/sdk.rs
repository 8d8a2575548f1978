//! [`IotApi`] on top of the AWS SDK client

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

use async_trait::async_trait;
use aws_sdk_iot::{
    error::{BuildError, DisplayErrorContext, ProvideErrorMetadata, SdkError},
    types,
};
use chrono::{DateTime, Utc};

use crate::{
    api::{
        AttributePayload, AuthorizerConfig, AuthorizerDescription, AuthorizerStatus,
        AutoRegistrationStatus, BillingGroupDescription, BillingGroupProperties,
        CaCertificateDescription, CaCertificateStatus, CertificateDescription, CertificateMode,
        CertificateStatus, CreateAuthorizerRequest, CreateBillingGroupRequest,
        CreateDomainConfigurationRequest, CreatePolicyRequest, CreateProvisioningTemplateRequest,
        CreateRoleAliasRequest, CreateThingGroupRequest, CreateThingTypeRequest,
        CreateTopicRuleDestinationRequest, DomainConfigurationDescription,
        DomainConfigurationStatus, DomainType, FirehoseAction, HttpUrlDestinationProperties,
        IotApi, LambdaAction, LogLevel, LoggingOptions, Page, PolicyDescription, ProvisioningHook,
        ProvisioningTemplateDescription, RegisterCaCertificateRequest, RegisterCertificateRequest,
        RegistrationConfig, RepublishAction, ResourceSummary, RoleAliasDescription, RuleAction,
        S3Action, ServerCertificateStatus, ServerCertificateSummary, ServiceError,
        ServiceErrorCode, ServiceType, SnsAction, SqsAction, TemplateType, ThingDescription,
        ThingGroupDescription, ThingGroupProperties, ThingTypeDescription, ThingTypeProperties,
        TlsConfig, TopicRuleDescription, TopicRuleDestinationDescription,
        TopicRuleDestinationStatus, TopicRulePayload, UpdateAuthorizerRequest,
        UpdateCaCertificateRequest, UpdateDomainConfigurationRequest,
        UpdateProvisioningTemplateRequest, UpdateRoleAliasRequest, VersionSummary,
        VpcDestinationProperties,
    },
    tags::{TagKey, TagList},
    Error,
};

/// Reads SDK members whether they are generated as optional or not.
pub(crate) trait Lenient<T> {
    fn lenient(self) -> Option<T>;
}

impl<T> Lenient<T> for Option<T> {
    fn lenient(self) -> Self {
        self
    }
}

macro_rules! lenient_plain {
    ($($ty:ty),+) => {
        $(
            impl Lenient<$ty> for $ty {
                fn lenient(self) -> Option<Self> {
                    Some(self)
                }
            }
        )+
    };
}

lenient_plain!(String, bool, i32, i64);

macro_rules! extract {
    ($value:expr, $field:ident) => {
        $value
            .$field
            .lenient()
            .ok_or_else(|| Error::UnexpectedNoneValue {
                entity: stringify!($field).to_owned(),
            })
    };
}

impl<E, R> From<SdkError<E, R>> for Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: fmt::Debug,
{
    fn from(value: SdkError<E, R>) -> Self {
        let code = match value.code() {
            Some(code) => ServiceErrorCode::from_code(code),
            None => match value {
                SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
                    ServiceErrorCode::ServiceUnavailable
                }
                SdkError::ConstructionFailure(_) => ServiceErrorCode::InvalidRequest,
                _ => ServiceErrorCode::InternalFailure,
            },
        };
        let message = value.message().map_or_else(
            || DisplayErrorContext(&value).to_string(),
            ToOwned::to_owned,
        );
        Self::Service(ServiceError::new(code, message))
    }
}

impl From<BuildError> for Error {
    fn from(value: BuildError) -> Self {
        Self::InvalidRequest {
            message: value.to_string(),
        }
    }
}

fn parse_enum<S: AsRef<str>, T>(value: Option<S>, parse: fn(&str) -> Option<T>) -> Option<T> {
    value.and_then(|value| parse(value.as_ref()))
}

fn timestamp(value: Option<aws_sdk_iot::primitives::DateTime>) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|value| {
            DateTime::from_timestamp(value.secs(), value.subsec_nanos()).ok_or_else(|| {
                Error::InvalidTimestampError {
                    value: value.secs().to_string(),
                    message: "timestamp out of range".to_owned(),
                }
            })
        })
        .transpose()
}

fn sdk_tags(tags: TagList) -> Result<Option<Vec<types::Tag>>, Error> {
    if tags.is_empty() {
        return Ok(None);
    }
    Ok(Some(tags.try_into()?))
}

fn summary(identifier: Option<String>, arn: Option<String>) -> Result<ResourceSummary, Error> {
    Ok(ResourceSummary {
        identifier: identifier.ok_or_else(|| Error::UnexpectedNoneValue {
            entity: "identifier".to_owned(),
        })?,
        arn,
    })
}

fn page<T>(
    items: Option<Vec<T>>,
    next_token: Option<String>,
    to_summary: impl Fn(T) -> Result<ResourceSummary, Error>,
) -> Result<Page<ResourceSummary>, Error> {
    Ok(Page {
        items: items
            .unwrap_or_default()
            .into_iter()
            .map(to_summary)
            .collect::<Result<_, _>>()?,
        next_token,
    })
}

impl From<BillingGroupProperties> for types::BillingGroupProperties {
    fn from(value: BillingGroupProperties) -> Self {
        Self::builder()
            .set_billing_group_description(value.billing_group_description)
            .build()
    }
}

impl From<types::BillingGroupProperties> for BillingGroupProperties {
    fn from(value: types::BillingGroupProperties) -> Self {
        Self {
            billing_group_description: value.billing_group_description,
        }
    }
}

impl From<RegistrationConfig> for types::RegistrationConfig {
    fn from(value: RegistrationConfig) -> Self {
        Self::builder()
            .set_template_body(value.template_body)
            .set_role_arn(value.role_arn)
            .set_template_name(value.template_name)
            .build()
    }
}

impl From<types::RegistrationConfig> for RegistrationConfig {
    fn from(value: types::RegistrationConfig) -> Self {
        Self {
            template_body: value.template_body,
            role_arn: value.role_arn,
            template_name: value.template_name,
        }
    }
}

impl From<AuthorizerConfig> for types::AuthorizerConfig {
    fn from(value: AuthorizerConfig) -> Self {
        Self::builder()
            .set_default_authorizer_name(value.default_authorizer_name)
            .set_allow_authorizer_override(value.allow_authorizer_override)
            .build()
    }
}

impl From<types::AuthorizerConfig> for AuthorizerConfig {
    fn from(value: types::AuthorizerConfig) -> Self {
        Self {
            allow_authorizer_override: value.allow_authorizer_override,
            default_authorizer_name: value.default_authorizer_name,
        }
    }
}

impl From<TlsConfig> for types::TlsConfig {
    fn from(value: TlsConfig) -> Self {
        Self::builder()
            .set_security_policy(value.security_policy)
            .build()
    }
}

impl From<types::TlsConfig> for TlsConfig {
    fn from(value: types::TlsConfig) -> Self {
        Self {
            security_policy: value.security_policy,
        }
    }
}

impl From<types::ServerCertificateSummary> for ServerCertificateSummary {
    fn from(value: types::ServerCertificateSummary) -> Self {
        Self {
            server_certificate_arn: value.server_certificate_arn,
            server_certificate_status: parse_enum(
                value.server_certificate_status,
                ServerCertificateStatus::parse,
            ),
            server_certificate_status_detail: value.server_certificate_status_detail,
        }
    }
}

impl TryFrom<ProvisioningHook> for types::ProvisioningHook {
    type Error = BuildError;

    fn try_from(value: ProvisioningHook) -> Result<Self, Self::Error> {
        Self::builder()
            .target_arn(value.target_arn)
            .set_payload_version(value.payload_version)
            .build()
    }
}

impl From<types::ProvisioningHook> for ProvisioningHook {
    fn from(value: types::ProvisioningHook) -> Self {
        Self {
            target_arn: value.target_arn.lenient().unwrap_or_default(),
            payload_version: value.payload_version,
        }
    }
}

impl TryFrom<RuleAction> for types::Action {
    type Error = BuildError;

    fn try_from(value: RuleAction) -> Result<Self, Self::Error> {
        let lambda = value
            .lambda
            .map(|action| {
                types::LambdaAction::builder()
                    .function_arn(action.function_arn)
                    .build()
            })
            .transpose()?;
        let republish = value
            .republish
            .map(|action| {
                types::RepublishAction::builder()
                    .topic(action.topic)
                    .role_arn(action.role_arn)
                    .set_qos(action.qos)
                    .build()
            })
            .transpose()?;
        let s3 = value
            .s3
            .map(|action| {
                types::S3Action::builder()
                    .bucket_name(action.bucket_name)
                    .key(action.key)
                    .role_arn(action.role_arn)
                    .set_canned_acl(
                        action
                            .canned_acl
                            .map(|acl| types::CannedAccessControlList::from(acl.as_str())),
                    )
                    .build()
            })
            .transpose()?;
        let sns = value
            .sns
            .map(|action| {
                types::SnsAction::builder()
                    .target_arn(action.target_arn)
                    .role_arn(action.role_arn)
                    .set_message_format(
                        action
                            .message_format
                            .map(|format| types::MessageFormat::from(format.as_str())),
                    )
                    .build()
            })
            .transpose()?;
        let sqs = value
            .sqs
            .map(|action| {
                types::SqsAction::builder()
                    .queue_url(action.queue_url)
                    .role_arn(action.role_arn)
                    .set_use_base64(action.use_base64)
                    .build()
            })
            .transpose()?;
        let firehose = value
            .firehose
            .map(|action| {
                types::FirehoseAction::builder()
                    .delivery_stream_name(action.delivery_stream_name)
                    .role_arn(action.role_arn)
                    .set_separator(action.separator)
                    .set_batch_mode(action.batch_mode)
                    .build()
            })
            .transpose()?;

        Ok(Self::builder()
            .set_lambda(lambda)
            .set_republish(republish)
            .set_s3(s3)
            .set_sns(sns)
            .set_sqs(sqs)
            .set_firehose(firehose)
            .build())
    }
}

impl From<types::Action> for RuleAction {
    fn from(value: types::Action) -> Self {
        Self {
            lambda: value.lambda.map(|action| LambdaAction {
                function_arn: action.function_arn.lenient().unwrap_or_default(),
            }),
            republish: value.republish.map(|action| RepublishAction {
                topic: action.topic.lenient().unwrap_or_default(),
                role_arn: action.role_arn.lenient().unwrap_or_default(),
                qos: action.qos.lenient(),
            }),
            s3: value.s3.map(|action| S3Action {
                bucket_name: action.bucket_name.lenient().unwrap_or_default(),
                key: action.key.lenient().unwrap_or_default(),
                role_arn: action.role_arn.lenient().unwrap_or_default(),
                canned_acl: action.canned_acl.map(|acl| acl.as_str().to_owned()),
            }),
            sns: value.sns.map(|action| SnsAction {
                target_arn: action.target_arn.lenient().unwrap_or_default(),
                role_arn: action.role_arn.lenient().unwrap_or_default(),
                message_format: action.message_format.map(|format| format.as_str().to_owned()),
            }),
            sqs: value.sqs.map(|action| SqsAction {
                queue_url: action.queue_url.lenient().unwrap_or_default(),
                role_arn: action.role_arn.lenient().unwrap_or_default(),
                use_base64: action.use_base64.lenient(),
            }),
            firehose: value.firehose.map(|action| FirehoseAction {
                delivery_stream_name: action.delivery_stream_name.lenient().unwrap_or_default(),
                role_arn: action.role_arn.lenient().unwrap_or_default(),
                separator: action.separator,
                batch_mode: action.batch_mode.lenient(),
            }),
        }
    }
}

impl TryFrom<TopicRulePayload> for types::TopicRulePayload {
    type Error = BuildError;

    fn try_from(value: TopicRulePayload) -> Result<Self, Self::Error> {
        let actions = value
            .actions
            .into_iter()
            .map(types::Action::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Self::builder()
            .sql(value.sql)
            .set_description(value.description)
            .set_rule_disabled(value.rule_disabled)
            .set_aws_iot_sql_version(value.aws_iot_sql_version)
            .set_actions(Some(actions))
            .set_error_action(value.error_action.map(types::Action::try_from).transpose()?)
            .build()
    }
}

impl From<types::TopicRule> for TopicRulePayload {
    fn from(value: types::TopicRule) -> Self {
        Self {
            sql: value.sql.lenient().unwrap_or_default(),
            description: value.description,
            rule_disabled: value.rule_disabled.lenient(),
            aws_iot_sql_version: value.aws_iot_sql_version,
            actions: value
                .actions
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            error_action: value.error_action.map(Into::into),
        }
    }
}

impl From<AttributePayload> for types::AttributePayload {
    fn from(value: AttributePayload) -> Self {
        Self::builder()
            .set_attributes(
                value
                    .attributes
                    .map(|attributes| attributes.into_iter().collect::<HashMap<_, _>>()),
            )
            .merge(false)
            .build()
    }
}

fn attributes(value: HashMap<String, String>) -> BTreeMap<String, String> {
    value.into_iter().collect()
}

impl From<ThingTypeProperties> for types::ThingTypeProperties {
    fn from(value: ThingTypeProperties) -> Self {
        Self::builder()
            .set_thing_type_description(value.thing_type_description)
            .set_searchable_attributes(value.searchable_attributes)
            .build()
    }
}

impl From<types::ThingTypeProperties> for ThingTypeProperties {
    fn from(value: types::ThingTypeProperties) -> Self {
        Self {
            thing_type_description: value.thing_type_description,
            searchable_attributes: value.searchable_attributes,
        }
    }
}

impl From<ThingGroupProperties> for types::ThingGroupProperties {
    fn from(value: ThingGroupProperties) -> Self {
        Self::builder()
            .set_thing_group_description(value.thing_group_description)
            .set_attribute_payload(value.attribute_payload.map(Into::into))
            .build()
    }
}

impl From<types::ThingGroupProperties> for ThingGroupProperties {
    fn from(value: types::ThingGroupProperties) -> Self {
        Self {
            thing_group_description: value.thing_group_description,
            attribute_payload: value.attribute_payload.map(|payload| AttributePayload {
                attributes: payload.attributes.map(attributes),
            }),
        }
    }
}

impl TryFrom<CreateTopicRuleDestinationRequest> for types::TopicRuleDestinationConfiguration {
    type Error = BuildError;

    fn try_from(value: CreateTopicRuleDestinationRequest) -> Result<Self, Self::Error> {
        let http_url_configuration = value
            .http_url_properties
            .map(|properties| {
                types::HttpUrlDestinationConfiguration::builder()
                    .set_confirmation_url(properties.confirmation_url)
                    .build()
            })
            .transpose()?;
        let vpc_configuration = value
            .vpc_properties
            .map(|properties| {
                types::VpcDestinationConfiguration::builder()
                    .set_subnet_ids(properties.subnet_ids)
                    .set_security_groups(properties.security_groups)
                    .set_vpc_id(properties.vpc_id)
                    .set_role_arn(properties.role_arn)
                    .build()
            })
            .transpose()?;
        Ok(Self::builder()
            .set_http_url_configuration(http_url_configuration)
            .set_vpc_configuration(vpc_configuration)
            .build())
    }
}

impl TryFrom<types::TopicRuleDestination> for TopicRuleDestinationDescription {
    type Error = Error;

    fn try_from(value: types::TopicRuleDestination) -> Result<Self, Self::Error> {
        Ok(Self {
            arn: extract!(value, arn)?,
            status: parse_enum(value.status, TopicRuleDestinationStatus::parse),
            status_reason: value.status_reason,
            http_url_properties: value.http_url_properties.map(|properties| {
                HttpUrlDestinationProperties {
                    confirmation_url: properties.confirmation_url,
                }
            }),
            vpc_properties: value
                .vpc_properties
                .map(|properties| VpcDestinationProperties {
                    subnet_ids: properties.subnet_ids,
                    security_groups: properties.security_groups,
                    vpc_id: properties.vpc_id,
                    role_arn: properties.role_arn,
                }),
        })
    }
}

#[expect(
    clippy::same_name_method,
    reason = "the trait mirrors the operation names of the client"
)]
#[async_trait]
impl IotApi for aws_sdk_iot::Client {
    async fn tag_resource(&self, resource_arn: &str, tags: TagList) -> Result<(), Error> {
        let _output = self
            .tag_resource()
            .resource_arn(resource_arn)
            .set_tags(sdk_tags(tags)?)
            .send()
            .await?;
        Ok(())
    }

    async fn untag_resource(&self, resource_arn: &str, tag_keys: Vec<TagKey>) -> Result<(), Error> {
        let _output = self
            .untag_resource()
            .resource_arn(resource_arn)
            .set_tag_keys(Some(tag_keys.into_iter().map(Into::into).collect()))
            .send()
            .await?;
        Ok(())
    }

    async fn list_tags_for_resource(&self, resource_arn: &str) -> Result<TagList, Error> {
        let mut tags = TagList::new();
        let mut next_token = None;
        loop {
            let output = self
                .list_tags_for_resource()
                .resource_arn(resource_arn)
                .set_next_token(next_token)
                .send()
                .await?;
            tags.join(output.tags.unwrap_or_default().into());
            next_token = output.next_token;
            if next_token.is_none() {
                break;
            }
        }
        Ok(tags)
    }

    async fn create_authorizer(
        &self,
        request: CreateAuthorizerRequest,
    ) -> Result<ResourceSummary, Error> {
        let output = self
            .create_authorizer()
            .authorizer_name(request.authorizer_name)
            .set_authorizer_function_arn(request.authorizer_function_arn)
            .set_token_key_name(request.token_key_name)
            .set_token_signing_public_keys(
                request
                    .token_signing_public_keys
                    .map(|keys| keys.into_iter().collect::<HashMap<_, _>>()),
            )
            .set_status(
                request
                    .status
                    .map(|status| types::AuthorizerStatus::from(status.as_str())),
            )
            .set_signing_disabled(request.signing_disabled)
            .set_enable_caching_for_http(request.enable_caching_for_http)
            .set_tags(sdk_tags(request.tags)?)
            .send()
            .await?;
        summary(output.authorizer_name, output.authorizer_arn)
    }

    async fn describe_authorizer(
        &self,
        authorizer_name: &str,
    ) -> Result<AuthorizerDescription, Error> {
        let output = self
            .describe_authorizer()
            .authorizer_name(authorizer_name)
            .send()
            .await?;
        let description = extract!(output, authorizer_description)?;
        Ok(AuthorizerDescription {
            authorizer_name: extract!(description, authorizer_name)?,
            authorizer_arn: extract!(description, authorizer_arn)?,
            authorizer_function_arn: description.authorizer_function_arn,
            token_key_name: description.token_key_name,
            token_signing_public_keys: description
                .token_signing_public_keys
                .unwrap_or_default()
                .into_iter()
                .collect::<BTreeMap<_, _>>(),
            status: parse_enum(description.status, AuthorizerStatus::parse),
            signing_disabled: description.signing_disabled.lenient(),
            enable_caching_for_http: description.enable_caching_for_http.lenient(),
        })
    }

    async fn update_authorizer(&self, request: UpdateAuthorizerRequest) -> Result<(), Error> {
        let _output = self
            .update_authorizer()
            .authorizer_name(request.authorizer_name)
            .set_authorizer_function_arn(request.authorizer_function_arn)
            .set_token_key_name(request.token_key_name)
            .set_token_signing_public_keys(
                request
                    .token_signing_public_keys
                    .map(|keys| keys.into_iter().collect::<HashMap<_, _>>()),
            )
            .set_status(
                request
                    .status
                    .map(|status| types::AuthorizerStatus::from(status.as_str())),
            )
            .set_enable_caching_for_http(request.enable_caching_for_http)
            .send()
            .await?;
        Ok(())
    }

    async fn delete_authorizer(&self, authorizer_name: &str) -> Result<(), Error> {
        let _output = self
            .delete_authorizer()
            .authorizer_name(authorizer_name)
            .send()
            .await?;
        Ok(())
    }

    async fn list_authorizers(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let output = self.list_authorizers().set_marker(next_token).send().await?;
        page(output.authorizers, output.next_marker, |authorizer| {
            summary(authorizer.authorizer_name, authorizer.authorizer_arn)
        })
    }

    async fn create_billing_group(
        &self,
        request: CreateBillingGroupRequest,
    ) -> Result<ResourceSummary, Error> {
        let output = self
            .create_billing_group()
            .billing_group_name(request.billing_group_name)
            .billing_group_properties(request.properties.into())
            .set_tags(sdk_tags(request.tags)?)
            .send()
            .await?;
        summary(output.billing_group_name, output.billing_group_arn)
    }

    async fn describe_billing_group(
        &self,
        billing_group_name: &str,
    ) -> Result<BillingGroupDescription, Error> {
        let output = self
            .describe_billing_group()
            .billing_group_name(billing_group_name)
            .send()
            .await?;
        Ok(BillingGroupDescription {
            billing_group_name: extract!(output, billing_group_name)?,
            billing_group_arn: extract!(output, billing_group_arn)?,
            billing_group_id: extract!(output, billing_group_id)?,
            properties: output
                .billing_group_properties
                .map(Into::into)
                .unwrap_or_default(),
        })
    }

    async fn update_billing_group(
        &self,
        billing_group_name: &str,
        properties: BillingGroupProperties,
    ) -> Result<(), Error> {
        let _output = self
            .update_billing_group()
            .billing_group_name(billing_group_name)
            .billing_group_properties(properties.into())
            .send()
            .await?;
        Ok(())
    }

    async fn delete_billing_group(&self, billing_group_name: &str) -> Result<(), Error> {
        let _output = self
            .delete_billing_group()
            .billing_group_name(billing_group_name)
            .send()
            .await?;
        Ok(())
    }

    async fn list_billing_groups(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let output = self
            .list_billing_groups()
            .set_next_token(next_token)
            .send()
            .await?;
        page(output.billing_groups, output.next_token, |group| {
            summary(group.group_name, group.group_arn)
        })
    }

    async fn register_ca_certificate(
        &self,
        request: RegisterCaCertificateRequest,
    ) -> Result<ResourceSummary, Error> {
        let output = self
            .register_ca_certificate()
            .ca_certificate(request.ca_certificate)
            .set_verification_certificate(request.verification_certificate)
            .set_as_active(request.set_as_active)
            .allow_auto_registration(request.allow_auto_registration)
            .set_registration_config(request.registration_config.map(Into::into))
            .set_certificate_mode(
                request
                    .certificate_mode
                    .map(|mode| types::CertificateMode::from(mode.as_str())),
            )
            .set_tags(sdk_tags(request.tags)?)
            .send()
            .await?;
        summary(output.certificate_id, output.certificate_arn)
    }

    async fn describe_ca_certificate(
        &self,
        certificate_id: &str,
    ) -> Result<CaCertificateDescription, Error> {
        let output = self
            .describe_ca_certificate()
            .certificate_id(certificate_id)
            .send()
            .await?;
        let description = extract!(output, certificate_description)?;
        Ok(CaCertificateDescription {
            certificate_id: extract!(description, certificate_id)?,
            certificate_arn: extract!(description, certificate_arn)?,
            certificate_pem: description.certificate_pem,
            status: parse_enum(description.status, CaCertificateStatus::parse),
            auto_registration_status: parse_enum(
                description.auto_registration_status,
                AutoRegistrationStatus::parse,
            ),
            certificate_mode: parse_enum(description.certificate_mode, CertificateMode::parse),
            registration_config: output.registration_config.map(Into::into),
        })
    }

    async fn update_ca_certificate(&self, request: UpdateCaCertificateRequest) -> Result<(), Error> {
        let _output = self
            .update_ca_certificate()
            .certificate_id(request.certificate_id)
            .set_new_status(
                request
                    .new_status
                    .map(|status| types::CaCertificateStatus::from(status.as_str())),
            )
            .set_new_auto_registration_status(
                request
                    .new_auto_registration_status
                    .map(|status| types::AutoRegistrationStatus::from(status.as_str())),
            )
            .set_registration_config(request.registration_config.map(Into::into))
            .set_remove_auto_registration(request.remove_auto_registration)
            .send()
            .await?;
        Ok(())
    }

    async fn delete_ca_certificate(&self, certificate_id: &str) -> Result<(), Error> {
        let _output = self
            .delete_ca_certificate()
            .certificate_id(certificate_id)
            .send()
            .await?;
        Ok(())
    }

    async fn list_ca_certificates(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let output = self
            .list_ca_certificates()
            .set_marker(next_token)
            .send()
            .await?;
        page(output.certificates, output.next_marker, |certificate| {
            summary(certificate.certificate_id, certificate.certificate_arn)
        })
    }

    async fn create_certificate_from_csr(
        &self,
        certificate_signing_request: &str,
        set_as_active: bool,
    ) -> Result<ResourceSummary, Error> {
        let output = self
            .create_certificate_from_csr()
            .certificate_signing_request(certificate_signing_request)
            .set_as_active(set_as_active)
            .send()
            .await?;
        summary(output.certificate_id, output.certificate_arn)
    }

    async fn register_certificate(
        &self,
        request: RegisterCertificateRequest,
    ) -> Result<ResourceSummary, Error> {
        let output = self
            .register_certificate()
            .certificate_pem(request.certificate_pem)
            .set_ca_certificate_pem(request.ca_certificate_pem)
            .set_status(
                request
                    .status
                    .map(|status| types::CertificateStatus::from(status.as_str())),
            )
            .send()
            .await?;
        summary(output.certificate_id, output.certificate_arn)
    }

    async fn register_certificate_without_ca(
        &self,
        certificate_pem: &str,
        status: Option<CertificateStatus>,
    ) -> Result<ResourceSummary, Error> {
        let output = self
            .register_certificate_without_ca()
            .certificate_pem(certificate_pem)
            .set_status(status.map(|status| types::CertificateStatus::from(status.as_str())))
            .send()
            .await?;
        summary(output.certificate_id, output.certificate_arn)
    }

    async fn describe_certificate(&self, certificate_id: &str) -> Result<CertificateDescription, Error> {
        let output = self
            .describe_certificate()
            .certificate_id(certificate_id)
            .send()
            .await?;
        let description = extract!(output, certificate_description)?;
        Ok(CertificateDescription {
            certificate_id: extract!(description, certificate_id)?,
            certificate_arn: extract!(description, certificate_arn)?,
            certificate_pem: description.certificate_pem,
            ca_certificate_id: description.ca_certificate_id,
            status: parse_enum(description.status, CertificateStatus::parse),
            certificate_mode: parse_enum(description.certificate_mode, CertificateMode::parse),
        })
    }

    async fn update_certificate(
        &self,
        certificate_id: &str,
        new_status: CertificateStatus,
    ) -> Result<(), Error> {
        let _output = self
            .update_certificate()
            .certificate_id(certificate_id)
            .new_status(types::CertificateStatus::from(new_status.as_str()))
            .send()
            .await?;
        Ok(())
    }

    async fn delete_certificate(&self, certificate_id: &str) -> Result<(), Error> {
        let _output = self
            .delete_certificate()
            .certificate_id(certificate_id)
            .send()
            .await?;
        Ok(())
    }

    async fn list_certificates(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let output = self.list_certificates().set_marker(next_token).send().await?;
        page(output.certificates, output.next_marker, |certificate| {
            summary(certificate.certificate_id, certificate.certificate_arn)
        })
    }

    async fn create_domain_configuration(
        &self,
        request: CreateDomainConfigurationRequest,
    ) -> Result<ResourceSummary, Error> {
        let output = self
            .create_domain_configuration()
            .domain_configuration_name(request.domain_configuration_name)
            .set_domain_name(request.domain_name)
            .set_server_certificate_arns(request.server_certificate_arns)
            .set_validation_certificate_arn(request.validation_certificate_arn)
            .set_authorizer_config(request.authorizer_config.map(Into::into))
            .set_service_type(
                request
                    .service_type
                    .map(|service_type| types::ServiceType::from(service_type.as_str())),
            )
            .set_tls_config(request.tls_config.map(Into::into))
            .set_tags(sdk_tags(request.tags)?)
            .send()
            .await?;
        summary(
            output.domain_configuration_name,
            output.domain_configuration_arn,
        )
    }

    async fn describe_domain_configuration(
        &self,
        domain_configuration_name: &str,
    ) -> Result<DomainConfigurationDescription, Error> {
        let output = self
            .describe_domain_configuration()
            .domain_configuration_name(domain_configuration_name)
            .send()
            .await?;
        Ok(DomainConfigurationDescription {
            domain_configuration_name: extract!(output, domain_configuration_name)?,
            domain_configuration_arn: extract!(output, domain_configuration_arn)?,
            domain_name: output.domain_name,
            server_certificates: output
                .server_certificates
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            authorizer_config: output.authorizer_config.map(Into::into),
            status: parse_enum(
                output.domain_configuration_status,
                DomainConfigurationStatus::parse,
            ),
            service_type: parse_enum(output.service_type, ServiceType::parse),
            domain_type: parse_enum(output.domain_type, DomainType::parse),
            tls_config: output.tls_config.map(Into::into),
        })
    }

    async fn update_domain_configuration(
        &self,
        request: UpdateDomainConfigurationRequest,
    ) -> Result<(), Error> {
        let _output = self
            .update_domain_configuration()
            .domain_configuration_name(request.domain_configuration_name)
            .set_authorizer_config(request.authorizer_config.map(Into::into))
            .set_domain_configuration_status(
                request
                    .status
                    .map(|status| types::DomainConfigurationStatus::from(status.as_str())),
            )
            .set_remove_authorizer_config(request.remove_authorizer_config)
            .set_tls_config(request.tls_config.map(Into::into))
            .send()
            .await?;
        Ok(())
    }

    async fn delete_domain_configuration(
        &self,
        domain_configuration_name: &str,
    ) -> Result<(), Error> {
        let _output = self
            .delete_domain_configuration()
            .domain_configuration_name(domain_configuration_name)
            .send()
            .await?;
        Ok(())
    }

    async fn list_domain_configurations(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let output = self
            .list_domain_configurations()
            .set_marker(next_token)
            .send()
            .await?;
        page(
            output.domain_configurations,
            output.next_marker,
            |configuration| {
                summary(
                    configuration.domain_configuration_name,
                    configuration.domain_configuration_arn,
                )
            },
        )
    }

    async fn get_v2_logging_options(&self) -> Result<LoggingOptions, Error> {
        let output = self.get_v2_logging_options().send().await?;
        Ok(LoggingOptions {
            role_arn: output.role_arn,
            default_log_level: parse_enum(output.default_log_level, LogLevel::parse),
            disable_all_logs: output.disable_all_logs.lenient().unwrap_or_default(),
        })
    }

    async fn set_v2_logging_options(&self, options: LoggingOptions) -> Result<(), Error> {
        let _output = self
            .set_v2_logging_options()
            .set_role_arn(options.role_arn)
            .set_default_log_level(
                options
                    .default_log_level
                    .map(|level| types::LogLevel::from(level.as_str())),
            )
            .disable_all_logs(options.disable_all_logs)
            .send()
            .await?;
        Ok(())
    }

    async fn create_policy(&self, request: CreatePolicyRequest) -> Result<ResourceSummary, Error> {
        let output = self
            .create_policy()
            .policy_name(request.policy_name)
            .policy_document(request.policy_document)
            .set_tags(sdk_tags(request.tags)?)
            .send()
            .await?;
        summary(output.policy_name, output.policy_arn)
    }

    async fn get_policy(&self, policy_name: &str) -> Result<PolicyDescription, Error> {
        let output = self.get_policy().policy_name(policy_name).send().await?;
        Ok(PolicyDescription {
            policy_name: extract!(output, policy_name)?,
            policy_arn: extract!(output, policy_arn)?,
            policy_document: output.policy_document,
            default_version_id: output.default_version_id,
        })
    }

    async fn create_policy_version(
        &self,
        policy_name: &str,
        policy_document: &str,
        set_as_default: bool,
    ) -> Result<(), Error> {
        let _output = self
            .create_policy_version()
            .policy_name(policy_name)
            .policy_document(policy_document)
            .set_as_default(set_as_default)
            .send()
            .await?;
        Ok(())
    }

    async fn list_policy_versions(&self, policy_name: &str) -> Result<Vec<VersionSummary>, Error> {
        let output = self
            .list_policy_versions()
            .policy_name(policy_name)
            .send()
            .await?;
        output
            .policy_versions
            .unwrap_or_default()
            .into_iter()
            .map(|version| {
                Ok(VersionSummary {
                    version_id: extract!(version, version_id)?,
                    is_default: version.is_default_version.lenient().unwrap_or_default(),
                    create_date: timestamp(version.create_date)?,
                })
            })
            .collect()
    }

    async fn set_default_policy_version(
        &self,
        policy_name: &str,
        policy_version_id: &str,
    ) -> Result<(), Error> {
        let _output = self
            .set_default_policy_version()
            .policy_name(policy_name)
            .policy_version_id(policy_version_id)
            .send()
            .await?;
        Ok(())
    }

    async fn delete_policy_version(
        &self,
        policy_name: &str,
        policy_version_id: &str,
    ) -> Result<(), Error> {
        let _output = self
            .delete_policy_version()
            .policy_name(policy_name)
            .policy_version_id(policy_version_id)
            .send()
            .await?;
        Ok(())
    }

    async fn delete_policy(&self, policy_name: &str) -> Result<(), Error> {
        let _output = self.delete_policy().policy_name(policy_name).send().await?;
        Ok(())
    }

    async fn list_policies(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let output = self.list_policies().set_marker(next_token).send().await?;
        page(output.policies, output.next_marker, |policy| {
            summary(policy.policy_name, policy.policy_arn)
        })
    }

    async fn create_provisioning_template(
        &self,
        request: CreateProvisioningTemplateRequest,
    ) -> Result<ResourceSummary, Error> {
        let output = self
            .create_provisioning_template()
            .template_name(request.template_name)
            .set_description(request.description)
            .set_template_body(request.template_body)
            .set_enabled(request.enabled)
            .set_provisioning_role_arn(request.provisioning_role_arn)
            .set_pre_provisioning_hook(
                request
                    .pre_provisioning_hook
                    .map(types::ProvisioningHook::try_from)
                    .transpose()?,
            )
            .set_type(
                request
                    .template_type
                    .map(|template_type| types::TemplateType::from(template_type.as_str())),
            )
            .set_tags(sdk_tags(request.tags)?)
            .send()
            .await?;
        summary(output.template_name, output.template_arn)
    }

    async fn describe_provisioning_template(
        &self,
        template_name: &str,
    ) -> Result<ProvisioningTemplateDescription, Error> {
        let output = self
            .describe_provisioning_template()
            .template_name(template_name)
            .send()
            .await?;
        Ok(ProvisioningTemplateDescription {
            template_name: extract!(output, template_name)?,
            template_arn: extract!(output, template_arn)?,
            description: output.description,
            enabled: output.enabled.lenient(),
            provisioning_role_arn: output.provisioning_role_arn,
            template_body: output.template_body,
            template_type: parse_enum(output.r#type, TemplateType::parse),
            default_version_id: output.default_version_id.lenient(),
            pre_provisioning_hook: output.pre_provisioning_hook.map(Into::into),
        })
    }

    async fn update_provisioning_template(
        &self,
        request: UpdateProvisioningTemplateRequest,
    ) -> Result<(), Error> {
        let _output = self
            .update_provisioning_template()
            .template_name(request.template_name)
            .set_description(request.description)
            .set_enabled(request.enabled)
            .set_default_version_id(request.default_version_id)
            .set_provisioning_role_arn(request.provisioning_role_arn)
            .set_pre_provisioning_hook(
                request
                    .pre_provisioning_hook
                    .map(types::ProvisioningHook::try_from)
                    .transpose()?,
            )
            .set_remove_pre_provisioning_hook(request.remove_pre_provisioning_hook)
            .send()
            .await?;
        Ok(())
    }

    async fn delete_provisioning_template(&self, template_name: &str) -> Result<(), Error> {
        let _output = self
            .delete_provisioning_template()
            .template_name(template_name)
            .send()
            .await?;
        Ok(())
    }

    async fn list_provisioning_templates(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let output = self
            .list_provisioning_templates()
            .set_next_token(next_token)
            .send()
            .await?;
        page(output.templates, output.next_token, |template| {
            summary(template.template_name, template.template_arn)
        })
    }

    async fn create_provisioning_template_version(
        &self,
        template_name: &str,
        template_body: &str,
        set_as_default: bool,
    ) -> Result<(), Error> {
        let _output = self
            .create_provisioning_template_version()
            .template_name(template_name)
            .template_body(template_body)
            .set_as_default(set_as_default)
            .send()
            .await?;
        Ok(())
    }

    async fn list_provisioning_template_versions(
        &self,
        template_name: &str,
    ) -> Result<Vec<VersionSummary>, Error> {
        let output = self
            .list_provisioning_template_versions()
            .template_name(template_name)
            .send()
            .await?;
        output
            .versions
            .unwrap_or_default()
            .into_iter()
            .map(|version| {
                Ok(VersionSummary {
                    version_id: extract!(version, version_id)?.to_string(),
                    is_default: version.is_default_version.lenient().unwrap_or_default(),
                    create_date: timestamp(version.creation_date)?,
                })
            })
            .collect()
    }

    async fn delete_provisioning_template_version(
        &self,
        template_name: &str,
        version_id: i32,
    ) -> Result<(), Error> {
        let _output = self
            .delete_provisioning_template_version()
            .template_name(template_name)
            .version_id(version_id)
            .send()
            .await?;
        Ok(())
    }

    async fn create_role_alias(
        &self,
        request: CreateRoleAliasRequest,
    ) -> Result<ResourceSummary, Error> {
        let output = self
            .create_role_alias()
            .role_alias(request.role_alias)
            .set_role_arn(request.role_arn)
            .set_credential_duration_seconds(request.credential_duration_seconds)
            .set_tags(sdk_tags(request.tags)?)
            .send()
            .await?;
        summary(output.role_alias, output.role_alias_arn)
    }

    async fn describe_role_alias(&self, role_alias: &str) -> Result<RoleAliasDescription, Error> {
        let output = self
            .describe_role_alias()
            .role_alias(role_alias)
            .send()
            .await?;
        let description = extract!(output, role_alias_description)?;
        Ok(RoleAliasDescription {
            role_alias: extract!(description, role_alias)?,
            role_alias_arn: extract!(description, role_alias_arn)?,
            role_arn: description.role_arn,
            credential_duration_seconds: description.credential_duration_seconds.lenient(),
        })
    }

    async fn update_role_alias(&self, request: UpdateRoleAliasRequest) -> Result<(), Error> {
        let _output = self
            .update_role_alias()
            .role_alias(request.role_alias)
            .set_role_arn(request.role_arn)
            .set_credential_duration_seconds(request.credential_duration_seconds)
            .send()
            .await?;
        Ok(())
    }

    async fn delete_role_alias(&self, role_alias: &str) -> Result<(), Error> {
        let _output = self
            .delete_role_alias()
            .role_alias(role_alias)
            .send()
            .await?;
        Ok(())
    }

    async fn list_role_aliases(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let output = self
            .list_role_aliases()
            .set_marker(next_token)
            .send()
            .await?;
        // the list only carries names
        page(output.role_aliases, output.next_marker, |role_alias| {
            summary(Some(role_alias), None)
        })
    }

    async fn create_topic_rule(
        &self,
        rule_name: &str,
        payload: TopicRulePayload,
        tags: TagList,
    ) -> Result<(), Error> {
        // CreateTopicRule takes its tags as a URL query string
        let _output = self
            .create_topic_rule()
            .rule_name(rule_name)
            .topic_rule_payload(payload.try_into()?)
            .set_tags((!tags.is_empty()).then(|| tags.to_query_string()))
            .send()
            .await?;
        Ok(())
    }

    async fn get_topic_rule(&self, rule_name: &str) -> Result<TopicRuleDescription, Error> {
        let output = self.get_topic_rule().rule_name(rule_name).send().await?;
        let rule = extract!(output, rule)?;
        Ok(TopicRuleDescription {
            rule_name: rule
                .rule_name
                .clone()
                .unwrap_or_else(|| rule_name.to_owned()),
            rule_arn: extract!(output, rule_arn)?,
            payload: rule.into(),
        })
    }

    async fn replace_topic_rule(
        &self,
        rule_name: &str,
        payload: TopicRulePayload,
    ) -> Result<(), Error> {
        let _output = self
            .replace_topic_rule()
            .rule_name(rule_name)
            .topic_rule_payload(payload.try_into()?)
            .send()
            .await?;
        Ok(())
    }

    async fn delete_topic_rule(&self, rule_name: &str) -> Result<(), Error> {
        let _output = self
            .delete_topic_rule()
            .rule_name(rule_name)
            .send()
            .await?;
        Ok(())
    }

    async fn list_topic_rules(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let output = self
            .list_topic_rules()
            .set_next_token(next_token)
            .send()
            .await?;
        page(output.rules, output.next_token, |rule| {
            summary(rule.rule_name, rule.rule_arn)
        })
    }

    async fn create_topic_rule_destination(
        &self,
        request: CreateTopicRuleDestinationRequest,
    ) -> Result<TopicRuleDestinationDescription, Error> {
        let output = self
            .create_topic_rule_destination()
            .destination_configuration(request.try_into()?)
            .send()
            .await?;
        extract!(output, topic_rule_destination)?.try_into()
    }

    async fn get_topic_rule_destination(
        &self,
        arn: &str,
    ) -> Result<TopicRuleDestinationDescription, Error> {
        let output = self
            .get_topic_rule_destination()
            .arn(arn)
            .send()
            .await?;
        extract!(output, topic_rule_destination)?.try_into()
    }

    async fn update_topic_rule_destination(
        &self,
        arn: &str,
        status: TopicRuleDestinationStatus,
    ) -> Result<(), Error> {
        let _output = self
            .update_topic_rule_destination()
            .arn(arn)
            .status(types::TopicRuleDestinationStatus::from(status.as_str()))
            .send()
            .await?;
        Ok(())
    }

    async fn delete_topic_rule_destination(&self, arn: &str) -> Result<(), Error> {
        let _output = self
            .delete_topic_rule_destination()
            .arn(arn)
            .send()
            .await?;
        Ok(())
    }

    async fn list_topic_rule_destinations(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let output = self
            .list_topic_rule_destinations()
            .set_next_token(next_token)
            .send()
            .await?;
        page(output.destination_summaries, output.next_token, |destination| {
            let arn = destination.arn;
            summary(arn.clone(), arn)
        })
    }

    async fn create_thing(
        &self,
        thing_name: &str,
        attribute_payload: AttributePayload,
    ) -> Result<ResourceSummary, Error> {
        let output = self
            .create_thing()
            .thing_name(thing_name)
            .attribute_payload(attribute_payload.into())
            .send()
            .await?;
        summary(output.thing_name, output.thing_arn)
    }

    async fn describe_thing(&self, thing_name: &str) -> Result<ThingDescription, Error> {
        let output = self.describe_thing().thing_name(thing_name).send().await?;
        Ok(ThingDescription {
            thing_name: extract!(output, thing_name)?,
            thing_arn: extract!(output, thing_arn)?,
            thing_id: extract!(output, thing_id)?,
            attributes: attributes(output.attributes.unwrap_or_default()),
        })
    }

    async fn update_thing(
        &self,
        thing_name: &str,
        attribute_payload: AttributePayload,
    ) -> Result<(), Error> {
        let _output = self
            .update_thing()
            .thing_name(thing_name)
            .attribute_payload(attribute_payload.into())
            .send()
            .await?;
        Ok(())
    }

    async fn delete_thing(&self, thing_name: &str) -> Result<(), Error> {
        let _output = self.delete_thing().thing_name(thing_name).send().await?;
        Ok(())
    }

    async fn list_things(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let output = self.list_things().set_next_token(next_token).send().await?;
        page(output.things, output.next_token, |thing| {
            summary(thing.thing_name, thing.thing_arn)
        })
    }

    async fn create_thing_group(
        &self,
        request: CreateThingGroupRequest,
    ) -> Result<ResourceSummary, Error> {
        let output = self
            .create_thing_group()
            .thing_group_name(request.thing_group_name)
            .set_parent_group_name(request.parent_group_name)
            .thing_group_properties(request.properties.into())
            .set_tags(sdk_tags(request.tags)?)
            .send()
            .await?;
        summary(output.thing_group_name, output.thing_group_arn)
    }

    async fn describe_thing_group(
        &self,
        thing_group_name: &str,
    ) -> Result<ThingGroupDescription, Error> {
        let output = self
            .describe_thing_group()
            .thing_group_name(thing_group_name)
            .send()
            .await?;
        Ok(ThingGroupDescription {
            thing_group_name: extract!(output, thing_group_name)?,
            thing_group_arn: extract!(output, thing_group_arn)?,
            thing_group_id: extract!(output, thing_group_id)?,
            parent_group_name: output
                .thing_group_metadata
                .and_then(|metadata| metadata.parent_group_name),
            properties: output
                .thing_group_properties
                .map(Into::into)
                .unwrap_or_default(),
        })
    }

    async fn update_thing_group(
        &self,
        thing_group_name: &str,
        properties: ThingGroupProperties,
    ) -> Result<(), Error> {
        let _output = self
            .update_thing_group()
            .thing_group_name(thing_group_name)
            .thing_group_properties(properties.into())
            .send()
            .await?;
        Ok(())
    }

    async fn delete_thing_group(&self, thing_group_name: &str) -> Result<(), Error> {
        let _output = self
            .delete_thing_group()
            .thing_group_name(thing_group_name)
            .send()
            .await?;
        Ok(())
    }

    async fn list_thing_groups(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let output = self
            .list_thing_groups()
            .set_next_token(next_token)
            .send()
            .await?;
        page(output.thing_groups, output.next_token, |group| {
            summary(group.group_name, group.group_arn)
        })
    }

    async fn create_thing_type(
        &self,
        request: CreateThingTypeRequest,
    ) -> Result<ResourceSummary, Error> {
        let output = self
            .create_thing_type()
            .thing_type_name(request.thing_type_name)
            .thing_type_properties(request.properties.into())
            .set_tags(sdk_tags(request.tags)?)
            .send()
            .await?;
        summary(output.thing_type_name, output.thing_type_arn)
    }

    async fn describe_thing_type(
        &self,
        thing_type_name: &str,
    ) -> Result<ThingTypeDescription, Error> {
        let output = self
            .describe_thing_type()
            .thing_type_name(thing_type_name)
            .send()
            .await?;
        Ok(ThingTypeDescription {
            thing_type_name: extract!(output, thing_type_name)?,
            thing_type_arn: extract!(output, thing_type_arn)?,
            thing_type_id: extract!(output, thing_type_id)?,
            properties: output
                .thing_type_properties
                .map(Into::into)
                .unwrap_or_default(),
            deprecated: output
                .thing_type_metadata
                .and_then(|metadata| metadata.deprecated.lenient())
                .unwrap_or(false),
        })
    }

    async fn deprecate_thing_type(
        &self,
        thing_type_name: &str,
        undo_deprecate: bool,
    ) -> Result<(), Error> {
        let _output = self
            .deprecate_thing_type()
            .thing_type_name(thing_type_name)
            .undo_deprecate(undo_deprecate)
            .send()
            .await?;
        Ok(())
    }

    async fn delete_thing_type(&self, thing_type_name: &str) -> Result<(), Error> {
        let _output = self
            .delete_thing_type()
            .thing_type_name(thing_type_name)
            .send()
            .await?;
        Ok(())
    }

    async fn list_thing_types(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let output = self
            .list_thing_types()
            .set_next_token(next_token)
            .send()
            .await?;
        page(output.thing_types, output.next_token, |thing_type| {
            summary(thing_type.thing_type_name, thing_type.thing_type_arn)
        })
    }
}
