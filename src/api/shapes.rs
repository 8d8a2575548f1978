use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::tags::TagList;

macro_rules! iot_enum {
    ($name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = String::deserialize(deserializer)?;
                Self::parse(&value).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "invalid {} value \"{value}\"",
                        stringify!($name)
                    ))
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

iot_enum!(AuthorizerStatus {
    Active => "ACTIVE",
    Inactive => "INACTIVE",
});

iot_enum!(CertificateStatus {
    Active => "ACTIVE",
    Inactive => "INACTIVE",
    Revoked => "REVOKED",
    PendingTransfer => "PENDING_TRANSFER",
    RegisterInactive => "REGISTER_INACTIVE",
    PendingActivation => "PENDING_ACTIVATION",
});

iot_enum!(CaCertificateStatus {
    Active => "ACTIVE",
    Inactive => "INACTIVE",
});

iot_enum!(AutoRegistrationStatus {
    Enable => "ENABLE",
    Disable => "DISABLE",
});

iot_enum!(CertificateMode {
    Default => "DEFAULT",
    SniOnly => "SNI_ONLY",
});

iot_enum!(DomainConfigurationStatus {
    Enabled => "ENABLED",
    Disabled => "DISABLED",
});

iot_enum!(ServiceType {
    Data => "DATA",
    CredentialProvider => "CREDENTIAL_PROVIDER",
    Jobs => "JOBS",
});

iot_enum!(DomainType {
    Endpoint => "ENDPOINT",
    AwsManaged => "AWS_MANAGED",
    CustomerManaged => "CUSTOMER_MANAGED",
});

iot_enum!(ServerCertificateStatus {
    Invalid => "INVALID",
    Valid => "VALID",
});

iot_enum!(LogLevel {
    Debug => "DEBUG",
    Info => "INFO",
    Error => "ERROR",
    Warn => "WARN",
    Disabled => "DISABLED",
});

iot_enum!(TopicRuleDestinationStatus {
    Enabled => "ENABLED",
    InProgress => "IN_PROGRESS",
    Disabled => "DISABLED",
    Error => "ERROR",
    Deleting => "DELETING",
});

iot_enum!(TemplateType {
    FleetProvisioning => "FLEET_PROVISIONING",
    Jitp => "JITP",
});

// Authorizer

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizerDescription {
    pub authorizer_name: String,
    pub authorizer_arn: String,
    pub authorizer_function_arn: Option<String>,
    pub token_key_name: Option<String>,
    pub token_signing_public_keys: BTreeMap<String, String>,
    pub status: Option<AuthorizerStatus>,
    pub signing_disabled: Option<bool>,
    pub enable_caching_for_http: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAuthorizerRequest {
    pub authorizer_name: String,
    pub authorizer_function_arn: Option<String>,
    pub token_key_name: Option<String>,
    pub token_signing_public_keys: Option<BTreeMap<String, String>>,
    pub status: Option<AuthorizerStatus>,
    pub signing_disabled: Option<bool>,
    pub enable_caching_for_http: Option<bool>,
    pub tags: TagList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateAuthorizerRequest {
    pub authorizer_name: String,
    pub authorizer_function_arn: Option<String>,
    pub token_key_name: Option<String>,
    pub token_signing_public_keys: Option<BTreeMap<String, String>>,
    pub status: Option<AuthorizerStatus>,
    pub enable_caching_for_http: Option<bool>,
}

// Billing group

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BillingGroupProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_group_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingGroupDescription {
    pub billing_group_name: String,
    pub billing_group_arn: String,
    pub billing_group_id: String,
    pub properties: BillingGroupProperties,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBillingGroupRequest {
    pub billing_group_name: String,
    pub properties: BillingGroupProperties,
    pub tags: TagList,
}

// CA certificate

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegistrationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaCertificateDescription {
    pub certificate_id: String,
    pub certificate_arn: String,
    pub certificate_pem: Option<String>,
    pub status: Option<CaCertificateStatus>,
    pub auto_registration_status: Option<AutoRegistrationStatus>,
    pub certificate_mode: Option<CertificateMode>,
    pub registration_config: Option<RegistrationConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterCaCertificateRequest {
    pub ca_certificate: String,
    pub verification_certificate: Option<String>,
    pub set_as_active: bool,
    pub allow_auto_registration: bool,
    pub registration_config: Option<RegistrationConfig>,
    pub certificate_mode: Option<CertificateMode>,
    pub tags: TagList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCaCertificateRequest {
    pub certificate_id: String,
    pub new_status: Option<CaCertificateStatus>,
    pub new_auto_registration_status: Option<AutoRegistrationStatus>,
    pub registration_config: Option<RegistrationConfig>,
    pub remove_auto_registration: Option<bool>,
}

// Certificate

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateDescription {
    pub certificate_id: String,
    pub certificate_arn: String,
    pub certificate_pem: Option<String>,
    pub ca_certificate_id: Option<String>,
    pub status: Option<CertificateStatus>,
    pub certificate_mode: Option<CertificateMode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterCertificateRequest {
    pub certificate_pem: String,
    pub ca_certificate_pem: Option<String>,
    pub status: Option<CertificateStatus>,
}

// Domain configuration

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthorizerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_authorizer_override: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_authorizer_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TlsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_policy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerCertificateSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_certificate_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_certificate_status: Option<ServerCertificateStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_certificate_status_detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainConfigurationDescription {
    pub domain_configuration_name: String,
    pub domain_configuration_arn: String,
    pub domain_name: Option<String>,
    pub server_certificates: Vec<ServerCertificateSummary>,
    pub authorizer_config: Option<AuthorizerConfig>,
    pub status: Option<DomainConfigurationStatus>,
    pub service_type: Option<ServiceType>,
    pub domain_type: Option<DomainType>,
    pub tls_config: Option<TlsConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDomainConfigurationRequest {
    pub domain_configuration_name: String,
    pub domain_name: Option<String>,
    pub server_certificate_arns: Option<Vec<String>>,
    pub validation_certificate_arn: Option<String>,
    pub authorizer_config: Option<AuthorizerConfig>,
    pub service_type: Option<ServiceType>,
    pub tls_config: Option<TlsConfig>,
    pub tags: TagList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateDomainConfigurationRequest {
    pub domain_configuration_name: String,
    pub authorizer_config: Option<AuthorizerConfig>,
    pub status: Option<DomainConfigurationStatus>,
    pub remove_authorizer_config: Option<bool>,
    pub tls_config: Option<TlsConfig>,
}

// Logging

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingOptions {
    pub role_arn: Option<String>,
    pub default_log_level: Option<LogLevel>,
    pub disable_all_logs: bool,
}

impl LoggingOptions {
    /// Logging counts as configured once a role is set and logs are not
    /// switched off entirely.
    pub const fn is_configured(&self) -> bool {
        self.role_arn.is_some() && !self.disable_all_logs
    }
}

// Policy

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDescription {
    pub policy_name: String,
    pub policy_arn: String,
    pub policy_document: Option<String>,
    pub default_version_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePolicyRequest {
    pub policy_name: String,
    pub policy_document: String,
    pub tags: TagList,
}

// Provisioning template

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisioningHook {
    pub target_arn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningTemplateDescription {
    pub template_name: String,
    pub template_arn: String,
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub provisioning_role_arn: Option<String>,
    pub template_body: Option<String>,
    pub template_type: Option<TemplateType>,
    pub default_version_id: Option<i32>,
    pub pre_provisioning_hook: Option<ProvisioningHook>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProvisioningTemplateRequest {
    pub template_name: String,
    pub description: Option<String>,
    pub template_body: Option<String>,
    pub enabled: Option<bool>,
    pub provisioning_role_arn: Option<String>,
    pub pre_provisioning_hook: Option<ProvisioningHook>,
    pub template_type: Option<TemplateType>,
    pub tags: TagList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProvisioningTemplateRequest {
    pub template_name: String,
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub default_version_id: Option<i32>,
    pub provisioning_role_arn: Option<String>,
    pub pre_provisioning_hook: Option<ProvisioningHook>,
    pub remove_pre_provisioning_hook: Option<bool>,
}

// Role alias

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAliasDescription {
    pub role_alias: String,
    pub role_alias_arn: String,
    pub role_arn: Option<String>,
    pub credential_duration_seconds: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleAliasRequest {
    pub role_alias: String,
    pub role_arn: Option<String>,
    pub credential_duration_seconds: Option<i32>,
    pub tags: TagList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRoleAliasRequest {
    pub role_alias: String,
    pub role_arn: Option<String>,
    pub credential_duration_seconds: Option<i32>,
}

// Topic rule

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LambdaAction {
    pub function_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepublishAction {
    pub topic: String,
    pub role_arn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qos: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct S3Action {
    pub bucket_name: String,
    pub key: String,
    pub role_arn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canned_acl: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsAction {
    pub target_arn: String,
    pub role_arn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SqsAction {
    pub queue_url: String,
    pub role_arn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_base64: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FirehoseAction {
    pub delivery_stream_name: String,
    pub role_arn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_mode: Option<bool>,
}

/// A topic rule action. Exactly one member is expected to be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lambda: Option<LambdaAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub republish: Option<RepublishAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sns: Option<SnsAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sqs: Option<SqsAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firehose: Option<FirehoseAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TopicRulePayload {
    pub sql: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_iot_sql_version: Option<String>,
    #[serde(default)]
    pub actions: Vec<RuleAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_action: Option<RuleAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRuleDescription {
    pub rule_name: String,
    pub rule_arn: String,
    pub payload: TopicRulePayload,
}

// Thing

/// Attributes of a thing or thing group. An update replaces all attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThingDescription {
    pub thing_name: String,
    pub thing_arn: String,
    pub thing_id: String,
    pub attributes: BTreeMap<String, String>,
}

// Thing type

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThingTypeProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thing_type_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searchable_attributes: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThingTypeDescription {
    pub thing_type_name: String,
    pub thing_type_arn: String,
    pub thing_type_id: String,
    pub properties: ThingTypeProperties,
    pub deprecated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateThingTypeRequest {
    pub thing_type_name: String,
    pub properties: ThingTypeProperties,
    pub tags: TagList,
}

// Thing group

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThingGroupProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thing_group_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_payload: Option<AttributePayload>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThingGroupDescription {
    pub thing_group_name: String,
    pub thing_group_arn: String,
    pub thing_group_id: String,
    pub parent_group_name: Option<String>,
    pub properties: ThingGroupProperties,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateThingGroupRequest {
    pub thing_group_name: String,
    pub parent_group_name: Option<String>,
    pub properties: ThingGroupProperties,
    pub tags: TagList,
}

// Topic rule destination

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HttpUrlDestinationProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VpcDestinationProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRuleDestinationDescription {
    pub arn: String,
    pub status: Option<TopicRuleDestinationStatus>,
    pub status_reason: Option<String>,
    pub http_url_properties: Option<HttpUrlDestinationProperties>,
    pub vpc_properties: Option<VpcDestinationProperties>,
}

/// Exactly one of the two destination kinds is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTopicRuleDestinationRequest {
    pub http_url_properties: Option<HttpUrlDestinationProperties>,
    pub vpc_properties: Option<VpcDestinationProperties>,
}
