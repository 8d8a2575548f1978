//! The IoT control-plane operations the providers issue
//!
//! [`IotApi`] is the seam between the handlers and whatever client the host
//! hands in. The shapes mirror the IoT API closely, but only carry the members
//! the providers use.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    tags::{TagKey, TagList},
    Error,
};

mod shapes;
pub use shapes::*;

/// A closed set of the error codes the IoT control plane responds with.
///
/// Codes are parsed from the error code string of a service response, with or
/// without the trailing `Exception`. Anything not listed is kept verbatim in
/// [`ServiceErrorCode::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceErrorCode {
    ResourceAlreadyExists,
    ResourceNotFound,
    NotConfigured,
    InvalidRequest,
    Unauthorized,
    AccessDenied,
    Throttling,
    LimitExceeded,
    VersionsLimitExceeded,
    ServiceUnavailable,
    InternalFailure,
    Internal,
    Conflict,
    ConflictingResourceUpdate,
    VersionConflict,
    DeleteConflict,
    CertificateState,
    CertificateConflict,
    CertificateValidation,
    InvalidStateTransition,
    MalformedPolicy,
    SqlParse,
    RegistrationCodeValidation,
    Unknown(String),
}

impl ServiceErrorCode {
    pub fn from_code(code: &str) -> Self {
        match code.strip_suffix("Exception").unwrap_or(code) {
            "ResourceAlreadyExists" => Self::ResourceAlreadyExists,
            "ResourceNotFound" => Self::ResourceNotFound,
            "NotConfigured" => Self::NotConfigured,
            "InvalidRequest" => Self::InvalidRequest,
            "Unauthorized" => Self::Unauthorized,
            "AccessDenied" => Self::AccessDenied,
            "Throttling" => Self::Throttling,
            "LimitExceeded" => Self::LimitExceeded,
            "VersionsLimitExceeded" => Self::VersionsLimitExceeded,
            "ServiceUnavailable" => Self::ServiceUnavailable,
            "InternalFailure" => Self::InternalFailure,
            "Internal" => Self::Internal,
            "Conflict" => Self::Conflict,
            "ConflictingResourceUpdate" => Self::ConflictingResourceUpdate,
            "VersionConflict" => Self::VersionConflict,
            "DeleteConflict" => Self::DeleteConflict,
            "CertificateState" => Self::CertificateState,
            "CertificateConflict" => Self::CertificateConflict,
            "CertificateValidation" => Self::CertificateValidation,
            "InvalidStateTransition" => Self::InvalidStateTransition,
            "MalformedPolicy" => Self::MalformedPolicy,
            "SqlParse" => Self::SqlParse,
            "RegistrationCodeValidation" => Self::RegistrationCodeValidation,
            _ => Self::Unknown(code.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match *self {
            Self::ResourceAlreadyExists => "ResourceAlreadyExistsException",
            Self::ResourceNotFound => "ResourceNotFoundException",
            Self::NotConfigured => "NotConfiguredException",
            Self::InvalidRequest => "InvalidRequestException",
            Self::Unauthorized => "UnauthorizedException",
            Self::AccessDenied => "AccessDeniedException",
            Self::Throttling => "ThrottlingException",
            Self::LimitExceeded => "LimitExceededException",
            Self::VersionsLimitExceeded => "VersionsLimitExceededException",
            Self::ServiceUnavailable => "ServiceUnavailableException",
            Self::InternalFailure => "InternalFailureException",
            Self::Internal => "InternalException",
            Self::Conflict => "ConflictException",
            Self::ConflictingResourceUpdate => "ConflictingResourceUpdateException",
            Self::VersionConflict => "VersionConflictException",
            Self::DeleteConflict => "DeleteConflictException",
            Self::CertificateState => "CertificateStateException",
            Self::CertificateConflict => "CertificateConflictException",
            Self::CertificateValidation => "CertificateValidationException",
            Self::InvalidStateTransition => "InvalidStateTransitionException",
            Self::MalformedPolicy => "MalformedPolicyException",
            Self::SqlParse => "SqlParseException",
            Self::RegistrationCodeValidation => "RegistrationCodeValidationException",
            Self::Unknown(ref code) => code,
        }
    }
}

impl fmt::Display for ServiceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error response of the IoT control plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    code: ServiceErrorCode,
    message: String,
}

impl ServiceError {
    pub fn new(code: ServiceErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub const fn code(&self) -> &ServiceErrorCode {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ServiceError {}

/// One page of a list operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

/// Identifier and ARN of a resource, as returned by create and list calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSummary {
    pub identifier: String,
    pub arn: Option<String>,
}

/// A version of a policy or provisioning template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSummary {
    pub version_id: String,
    pub is_default: bool,
    pub create_date: Option<DateTime<Utc>>,
}

/// The IoT operations used by the providers.
///
/// Retries, backoff and credentials are the implementor's business. Errors
/// from the service are reported as [`Error::Service`].
#[async_trait]
pub trait IotApi: Send + Sync {
    async fn tag_resource(&self, resource_arn: &str, tags: TagList) -> Result<(), Error>;
    async fn untag_resource(&self, resource_arn: &str, tag_keys: Vec<TagKey>)
        -> Result<(), Error>;
    /// Returns all tags of a resource, following pagination.
    async fn list_tags_for_resource(&self, resource_arn: &str) -> Result<TagList, Error>;

    async fn create_authorizer(
        &self,
        request: CreateAuthorizerRequest,
    ) -> Result<ResourceSummary, Error>;
    async fn describe_authorizer(&self, authorizer_name: &str)
        -> Result<AuthorizerDescription, Error>;
    async fn update_authorizer(&self, request: UpdateAuthorizerRequest) -> Result<(), Error>;
    async fn delete_authorizer(&self, authorizer_name: &str) -> Result<(), Error>;
    async fn list_authorizers(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error>;

    async fn create_billing_group(
        &self,
        request: CreateBillingGroupRequest,
    ) -> Result<ResourceSummary, Error>;
    async fn describe_billing_group(
        &self,
        billing_group_name: &str,
    ) -> Result<BillingGroupDescription, Error>;
    async fn update_billing_group(
        &self,
        billing_group_name: &str,
        properties: BillingGroupProperties,
    ) -> Result<(), Error>;
    async fn delete_billing_group(&self, billing_group_name: &str) -> Result<(), Error>;
    async fn list_billing_groups(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error>;

    async fn register_ca_certificate(
        &self,
        request: RegisterCaCertificateRequest,
    ) -> Result<ResourceSummary, Error>;
    async fn describe_ca_certificate(
        &self,
        certificate_id: &str,
    ) -> Result<CaCertificateDescription, Error>;
    async fn update_ca_certificate(&self, request: UpdateCaCertificateRequest)
        -> Result<(), Error>;
    async fn delete_ca_certificate(&self, certificate_id: &str) -> Result<(), Error>;
    async fn list_ca_certificates(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error>;

    async fn create_certificate_from_csr(
        &self,
        certificate_signing_request: &str,
        set_as_active: bool,
    ) -> Result<ResourceSummary, Error>;
    async fn register_certificate(
        &self,
        request: RegisterCertificateRequest,
    ) -> Result<ResourceSummary, Error>;
    async fn register_certificate_without_ca(
        &self,
        certificate_pem: &str,
        status: Option<CertificateStatus>,
    ) -> Result<ResourceSummary, Error>;
    async fn describe_certificate(&self, certificate_id: &str)
        -> Result<CertificateDescription, Error>;
    async fn update_certificate(
        &self,
        certificate_id: &str,
        new_status: CertificateStatus,
    ) -> Result<(), Error>;
    async fn delete_certificate(&self, certificate_id: &str) -> Result<(), Error>;
    async fn list_certificates(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error>;

    async fn create_domain_configuration(
        &self,
        request: CreateDomainConfigurationRequest,
    ) -> Result<ResourceSummary, Error>;
    async fn describe_domain_configuration(
        &self,
        domain_configuration_name: &str,
    ) -> Result<DomainConfigurationDescription, Error>;
    async fn update_domain_configuration(
        &self,
        request: UpdateDomainConfigurationRequest,
    ) -> Result<(), Error>;
    async fn delete_domain_configuration(&self, domain_configuration_name: &str)
        -> Result<(), Error>;
    async fn list_domain_configurations(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error>;

    async fn get_v2_logging_options(&self) -> Result<LoggingOptions, Error>;
    async fn set_v2_logging_options(&self, options: LoggingOptions) -> Result<(), Error>;

    async fn create_policy(&self, request: CreatePolicyRequest) -> Result<ResourceSummary, Error>;
    async fn get_policy(&self, policy_name: &str) -> Result<PolicyDescription, Error>;
    async fn create_policy_version(
        &self,
        policy_name: &str,
        policy_document: &str,
        set_as_default: bool,
    ) -> Result<(), Error>;
    async fn list_policy_versions(&self, policy_name: &str) -> Result<Vec<VersionSummary>, Error>;
    async fn set_default_policy_version(
        &self,
        policy_name: &str,
        policy_version_id: &str,
    ) -> Result<(), Error>;
    async fn delete_policy_version(
        &self,
        policy_name: &str,
        policy_version_id: &str,
    ) -> Result<(), Error>;
    async fn delete_policy(&self, policy_name: &str) -> Result<(), Error>;
    async fn list_policies(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error>;

    async fn create_provisioning_template(
        &self,
        request: CreateProvisioningTemplateRequest,
    ) -> Result<ResourceSummary, Error>;
    async fn describe_provisioning_template(
        &self,
        template_name: &str,
    ) -> Result<ProvisioningTemplateDescription, Error>;
    async fn update_provisioning_template(
        &self,
        request: UpdateProvisioningTemplateRequest,
    ) -> Result<(), Error>;
    async fn delete_provisioning_template(&self, template_name: &str) -> Result<(), Error>;
    async fn list_provisioning_templates(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error>;
    async fn create_provisioning_template_version(
        &self,
        template_name: &str,
        template_body: &str,
        set_as_default: bool,
    ) -> Result<(), Error>;
    async fn list_provisioning_template_versions(
        &self,
        template_name: &str,
    ) -> Result<Vec<VersionSummary>, Error>;
    async fn delete_provisioning_template_version(
        &self,
        template_name: &str,
        version_id: i32,
    ) -> Result<(), Error>;

    async fn create_role_alias(
        &self,
        request: CreateRoleAliasRequest,
    ) -> Result<ResourceSummary, Error>;
    async fn describe_role_alias(&self, role_alias: &str) -> Result<RoleAliasDescription, Error>;
    async fn update_role_alias(&self, request: UpdateRoleAliasRequest) -> Result<(), Error>;
    async fn delete_role_alias(&self, role_alias: &str) -> Result<(), Error>;
    async fn list_role_aliases(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error>;

    async fn create_topic_rule(
        &self,
        rule_name: &str,
        payload: TopicRulePayload,
        tags: TagList,
    ) -> Result<(), Error>;
    async fn get_topic_rule(&self, rule_name: &str) -> Result<TopicRuleDescription, Error>;
    async fn replace_topic_rule(&self, rule_name: &str, payload: TopicRulePayload)
        -> Result<(), Error>;
    async fn delete_topic_rule(&self, rule_name: &str) -> Result<(), Error>;
    async fn list_topic_rules(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error>;

    async fn create_topic_rule_destination(
        &self,
        request: CreateTopicRuleDestinationRequest,
    ) -> Result<TopicRuleDestinationDescription, Error>;
    async fn get_topic_rule_destination(
        &self,
        arn: &str,
    ) -> Result<TopicRuleDestinationDescription, Error>;
    async fn update_topic_rule_destination(
        &self,
        arn: &str,
        status: TopicRuleDestinationStatus,
    ) -> Result<(), Error>;
    async fn delete_topic_rule_destination(&self, arn: &str) -> Result<(), Error>;
    /// Destinations are identified by their ARN, so summaries carry it twice.
    async fn list_topic_rule_destinations(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error>;

    async fn create_thing(
        &self,
        thing_name: &str,
        attribute_payload: AttributePayload,
    ) -> Result<ResourceSummary, Error>;
    async fn describe_thing(&self, thing_name: &str) -> Result<ThingDescription, Error>;
    async fn update_thing(
        &self,
        thing_name: &str,
        attribute_payload: AttributePayload,
    ) -> Result<(), Error>;
    async fn delete_thing(&self, thing_name: &str) -> Result<(), Error>;
    async fn list_things(&self, next_token: Option<String>)
        -> Result<Page<ResourceSummary>, Error>;

    async fn create_thing_group(
        &self,
        request: CreateThingGroupRequest,
    ) -> Result<ResourceSummary, Error>;
    async fn describe_thing_group(
        &self,
        thing_group_name: &str,
    ) -> Result<ThingGroupDescription, Error>;
    async fn update_thing_group(
        &self,
        thing_group_name: &str,
        properties: ThingGroupProperties,
    ) -> Result<(), Error>;
    async fn delete_thing_group(&self, thing_group_name: &str) -> Result<(), Error>;
    async fn list_thing_groups(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error>;

    async fn create_thing_type(
        &self,
        request: CreateThingTypeRequest,
    ) -> Result<ResourceSummary, Error>;
    async fn describe_thing_type(
        &self,
        thing_type_name: &str,
    ) -> Result<ThingTypeDescription, Error>;
    /// Deprecates a thing type, or reverts a deprecation when `undo_deprecate`
    /// is set.
    async fn deprecate_thing_type(
        &self,
        thing_type_name: &str,
        undo_deprecate: bool,
    ) -> Result<(), Error>;
    async fn delete_thing_type(&self, thing_type_name: &str) -> Result<(), Error>;
    async fn list_thing_types(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error>;
}
