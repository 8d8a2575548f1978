//! An in-memory IoT control plane for handler tests

use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    api::{
        AttributePayload, AuthorizerDescription, AuthorizerStatus, AutoRegistrationStatus,
        BillingGroupDescription, BillingGroupProperties, CaCertificateDescription,
        CaCertificateStatus, CertificateDescription, CertificateMode, CertificateStatus,
        CreateAuthorizerRequest, CreateBillingGroupRequest, CreateDomainConfigurationRequest,
        CreatePolicyRequest, CreateProvisioningTemplateRequest, CreateRoleAliasRequest,
        CreateThingGroupRequest, CreateThingTypeRequest, CreateTopicRuleDestinationRequest,
        DomainConfigurationDescription, DomainConfigurationStatus, DomainType, IotApi,
        LoggingOptions, Page, PolicyDescription, ProvisioningTemplateDescription,
        RegisterCaCertificateRequest, RegisterCertificateRequest, ResourceSummary,
        RoleAliasDescription, ServerCertificateStatus, ServerCertificateSummary, ServiceError,
        ServiceErrorCode, ThingDescription, ThingGroupDescription, ThingGroupProperties,
        ThingTypeDescription, TopicRuleDescription, TopicRuleDestinationDescription,
        TopicRuleDestinationStatus, TopicRulePayload, UpdateAuthorizerRequest,
        UpdateCaCertificateRequest, UpdateDomainConfigurationRequest,
        UpdateProvisioningTemplateRequest, UpdateRoleAliasRequest, VersionSummary,
    },
    handler::ResourceHandlerRequest,
    model::ResourceModel,
    tags::{TagKey, TagList},
    Error,
};

pub(crate) const ACCOUNT: &str = "123456789012";
pub(crate) const STACK_ID: &str =
    "arn:aws:cloudformation:us-east-1:123456789012:stack/my-stack/5b918d10-cd98-11ea-90d5-0e9cbd6c6a09";
pub(crate) const STACK_NAME_TAG: &str = "aws:cloudformation:stack-name";
const VERSION_LIMIT: usize = 5;

/// A request as CloudFormation sends it for a resource of stack `my-stack`.
pub(crate) fn request<M: ResourceModel>(logical_id: &str, desired: M) -> ResourceHandlerRequest<M> {
    ResourceHandlerRequest {
        aws_account_id: Some(ACCOUNT.to_owned()),
        aws_partition: Some("aws".to_owned()),
        region: Some("us-east-1".to_owned()),
        stack_id: Some(STACK_ID.to_owned()),
        logical_resource_identifier: Some(logical_id.to_owned()),
        client_request_token: Some("4b90a7e4-b790-456b-a937-0cfdfa211dfe".to_owned()),
        desired_resource_state: Some(desired),
        system_tags: BTreeMap::from([(STACK_NAME_TAG.to_owned(), "my-stack".to_owned())]),
        ..Default::default()
    }
}

pub(crate) fn update_request<M: ResourceModel>(
    logical_id: &str,
    previous: M,
    desired: M,
) -> ResourceHandlerRequest<M> {
    ResourceHandlerRequest {
        previous_resource_state: Some(previous),
        ..request(logical_id, desired)
    }
}

pub(crate) fn arn(resource: &str) -> String {
    format!("arn:aws:iot:us-east-1:{ACCOUNT}:{resource}")
}

fn service_error(code: ServiceErrorCode, message: impl Into<String>) -> Error {
    ServiceError::new(code, message).into()
}

fn not_found(what: &str) -> Error {
    service_error(ServiceErrorCode::ResourceNotFound, format!("{what} does not exist"))
}

fn already_exists(what: &str) -> Error {
    service_error(
        ServiceErrorCode::ResourceAlreadyExists,
        format!("{what} already exists"),
    )
}

fn page<T>(items: Vec<T>) -> Page<T> {
    Page {
        items,
        next_token: None,
    }
}

#[derive(Debug, Clone)]
pub(crate) struct StoredVersion {
    pub(crate) summary: VersionSummary,
    pub(crate) document: String,
}

#[derive(Debug, Clone)]
pub(crate) struct Versioned<T> {
    pub(crate) description: T,
    pub(crate) versions: Vec<StoredVersion>,
}

impl<T> Versioned<T> {
    fn default_version(&self) -> Option<&StoredVersion> {
        self.versions.iter().find(|version| version.summary.is_default)
    }

    fn next_version_id(&self) -> String {
        let highest = self
            .versions
            .iter()
            .filter_map(|version| version.summary.version_id.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        (highest + 1).to_string()
    }

    fn set_default(&mut self, version_id: &str) -> Result<(), Error> {
        if !self
            .versions
            .iter()
            .any(|version| version.summary.version_id == version_id)
        {
            return Err(not_found(&format!("version {version_id}")));
        }
        for version in &mut self.versions {
            version.summary.is_default = version.summary.version_id == version_id;
        }
        Ok(())
    }

    fn delete_version(&mut self, version_id: &str) -> Result<(), Error> {
        let position = self
            .versions
            .iter()
            .position(|version| version.summary.version_id == version_id)
            .ok_or_else(|| not_found(&format!("version {version_id}")))?;
        if self.versions[position].summary.is_default {
            return Err(service_error(
                ServiceErrorCode::DeleteConflict,
                "cannot delete the default version",
            ));
        }
        let _removed = self.versions.remove(position);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) authorizers: BTreeMap<String, AuthorizerDescription>,
    pub(crate) billing_groups: BTreeMap<String, BillingGroupDescription>,
    pub(crate) ca_certificates: BTreeMap<String, CaCertificateDescription>,
    pub(crate) certificates: BTreeMap<String, CertificateDescription>,
    pub(crate) domain_configurations: BTreeMap<String, DomainConfigurationDescription>,
    pub(crate) logging: Option<LoggingOptions>,
    pub(crate) policies: BTreeMap<String, Versioned<PolicyDescription>>,
    pub(crate) templates: BTreeMap<String, Versioned<ProvisioningTemplateDescription>>,
    pub(crate) role_aliases: BTreeMap<String, RoleAliasDescription>,
    pub(crate) topic_rules: BTreeMap<String, TopicRuleDescription>,
    pub(crate) topic_rule_destinations: BTreeMap<String, TopicRuleDestinationDescription>,
    pub(crate) things: BTreeMap<String, ThingDescription>,
    pub(crate) thing_groups: BTreeMap<String, ThingGroupDescription>,
    pub(crate) thing_types: BTreeMap<String, ThingTypeDescription>,
    pub(crate) tags: BTreeMap<String, TagList>,
    pub(crate) calls: Vec<&'static str>,
    pub(crate) tag_calls: Vec<TagList>,
    pub(crate) untag_calls: Vec<Vec<TagKey>>,
    /// How many describes still see the old state after an asynchronous
    /// change: a deleted CA certificate, or a new VPC rule destination that
    /// is not yet enabled.
    pub(crate) pending_describes: u32,
    deleting: BTreeMap<String, u32>,
    provisioning: BTreeMap<String, u32>,
    failures: BTreeMap<&'static str, ServiceErrorCode>,
    clock: i64,
    sequence: u32,
}

impl State {
    fn tick(&mut self) -> Option<DateTime<Utc>> {
        self.clock += 1;
        DateTime::<Utc>::from_timestamp(1_700_000_000 + self.clock * 60, 0)
    }

    fn next_id(&mut self) -> String {
        self.sequence += 1;
        format!("{:064x}", self.sequence)
    }

    fn store_tags(&mut self, arn: &str, tags: TagList) {
        if !tags.is_empty() {
            let _previous = self.tags.insert(arn.to_owned(), tags);
        }
    }

    fn new_version(&mut self, version_id: String, document: String) -> StoredVersion {
        StoredVersion {
            summary: VersionSummary {
                version_id,
                is_default: true,
                create_date: self.tick(),
            },
            document,
        }
    }

    /// Adds a version to a policy, as if created outside of CloudFormation.
    pub(crate) fn add_policy_version(&mut self, policy_name: &str, document: &str, set_as_default: bool) {
        let version_id = self.policies[policy_name].next_version_id();
        let mut version = self.new_version(version_id.clone(), document.to_owned());
        version.summary.is_default = false;
        let policy = self.policies.get_mut(policy_name).expect("policy exists");
        policy.versions.push(version);
        if set_as_default {
            policy.set_default(&version_id).expect("version exists");
        }
    }

    /// Makes an existing template version the default, as if changed outside
    /// of CloudFormation.
    pub(crate) fn set_template_default(&mut self, template_name: &str, version_id: &str) {
        self.templates
            .get_mut(template_name)
            .expect("template exists")
            .set_default(version_id)
            .expect("version exists");
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeIot {
    state: Mutex<State>,
}

impl FakeIot {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Lets the next call of `operation` fail with `code`.
    pub(crate) fn fail(&self, operation: &'static str, code: ServiceErrorCode) {
        let _previous = self.state().failures.insert(operation, code);
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("fake state poisoned")
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.state().calls.clone()
    }

    pub(crate) fn tags_of(&self, arn: &str) -> TagList {
        self.state().tags.get(arn).cloned().unwrap_or_default()
    }

    fn call(&self, operation: &'static str) -> Result<MutexGuard<'_, State>, Error> {
        let mut state = self.state();
        state.calls.push(operation);
        match state.failures.remove(operation) {
            Some(code) => Err(service_error(code, "injected failure")),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl IotApi for FakeIot {
    async fn tag_resource(&self, resource_arn: &str, tags: TagList) -> Result<(), Error> {
        let mut state = self.call("tag_resource")?;
        state.tag_calls.push(tags.clone());
        let current = state.tags.remove(resource_arn).unwrap_or_default();
        let _previous = state
            .tags
            .insert(resource_arn.to_owned(), current.merge(tags));
        Ok(())
    }

    async fn untag_resource(&self, resource_arn: &str, tag_keys: Vec<TagKey>) -> Result<(), Error> {
        let mut state = self.call("untag_resource")?;
        state.untag_calls.push(tag_keys.clone());
        if let Some(current) = state.tags.get_mut(resource_arn) {
            *current = TagList::from_vec(
                current
                    .as_slice()
                    .iter()
                    .filter(|tag| !tag_keys.contains(tag.key()))
                    .cloned()
                    .collect(),
            );
        }
        Ok(())
    }

    async fn list_tags_for_resource(&self, resource_arn: &str) -> Result<TagList, Error> {
        let state = self.call("list_tags_for_resource")?;
        Ok(state.tags.get(resource_arn).cloned().unwrap_or_default())
    }

    async fn create_authorizer(
        &self,
        request: CreateAuthorizerRequest,
    ) -> Result<ResourceSummary, Error> {
        let mut state = self.call("create_authorizer")?;
        let name = request.authorizer_name;
        if state.authorizers.contains_key(&name) {
            return Err(already_exists(&name));
        }
        let arn = arn(&format!("authorizer/{name}"));
        state.store_tags(&arn, request.tags);
        let _previous = state.authorizers.insert(
            name.clone(),
            AuthorizerDescription {
                authorizer_name: name.clone(),
                authorizer_arn: arn.clone(),
                authorizer_function_arn: request.authorizer_function_arn,
                token_key_name: request.token_key_name,
                token_signing_public_keys: request.token_signing_public_keys.unwrap_or_default(),
                status: Some(request.status.unwrap_or(AuthorizerStatus::Active)),
                signing_disabled: request.signing_disabled,
                enable_caching_for_http: request.enable_caching_for_http,
            },
        );
        Ok(ResourceSummary {
            identifier: name,
            arn: Some(arn),
        })
    }

    async fn describe_authorizer(
        &self,
        authorizer_name: &str,
    ) -> Result<AuthorizerDescription, Error> {
        let state = self.call("describe_authorizer")?;
        state
            .authorizers
            .get(authorizer_name)
            .cloned()
            .ok_or_else(|| not_found(authorizer_name))
    }

    async fn update_authorizer(&self, request: UpdateAuthorizerRequest) -> Result<(), Error> {
        let mut state = self.call("update_authorizer")?;
        let authorizer = state
            .authorizers
            .get_mut(&request.authorizer_name)
            .ok_or_else(|| not_found(&request.authorizer_name))?;
        if request.authorizer_function_arn.is_some() {
            authorizer.authorizer_function_arn = request.authorizer_function_arn;
        }
        if request.token_key_name.is_some() {
            authorizer.token_key_name = request.token_key_name;
        }
        if let Some(keys) = request.token_signing_public_keys {
            authorizer.token_signing_public_keys = keys;
        }
        if request.status.is_some() {
            authorizer.status = request.status;
        }
        if request.enable_caching_for_http.is_some() {
            authorizer.enable_caching_for_http = request.enable_caching_for_http;
        }
        Ok(())
    }

    async fn delete_authorizer(&self, authorizer_name: &str) -> Result<(), Error> {
        let mut state = self.call("delete_authorizer")?;
        let authorizer = state
            .authorizers
            .get(authorizer_name)
            .ok_or_else(|| not_found(authorizer_name))?;
        if authorizer.status == Some(AuthorizerStatus::Active) {
            return Err(service_error(
                ServiceErrorCode::DeleteConflict,
                "authorizer is active",
            ));
        }
        let _removed = state.authorizers.remove(authorizer_name);
        Ok(())
    }

    async fn list_authorizers(
        &self,
        _next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let state = self.call("list_authorizers")?;
        Ok(page(
            state
                .authorizers
                .values()
                .map(|authorizer| ResourceSummary {
                    identifier: authorizer.authorizer_name.clone(),
                    arn: Some(authorizer.authorizer_arn.clone()),
                })
                .collect(),
        ))
    }

    async fn create_billing_group(
        &self,
        request: CreateBillingGroupRequest,
    ) -> Result<ResourceSummary, Error> {
        let mut state = self.call("create_billing_group")?;
        let name = request.billing_group_name;
        if state.billing_groups.contains_key(&name) {
            return Err(already_exists(&name));
        }
        let arn = arn(&format!("billinggroup/{name}"));
        let id = state.next_id();
        state.store_tags(&arn, request.tags);
        let _previous = state.billing_groups.insert(
            name.clone(),
            BillingGroupDescription {
                billing_group_name: name.clone(),
                billing_group_arn: arn.clone(),
                billing_group_id: id,
                properties: request.properties,
            },
        );
        Ok(ResourceSummary {
            identifier: name,
            arn: Some(arn),
        })
    }

    async fn describe_billing_group(
        &self,
        billing_group_name: &str,
    ) -> Result<BillingGroupDescription, Error> {
        let state = self.call("describe_billing_group")?;
        state
            .billing_groups
            .get(billing_group_name)
            .cloned()
            .ok_or_else(|| not_found(billing_group_name))
    }

    async fn update_billing_group(
        &self,
        billing_group_name: &str,
        properties: BillingGroupProperties,
    ) -> Result<(), Error> {
        let mut state = self.call("update_billing_group")?;
        let group = state
            .billing_groups
            .get_mut(billing_group_name)
            .ok_or_else(|| not_found(billing_group_name))?;
        group.properties = properties;
        Ok(())
    }

    async fn delete_billing_group(&self, billing_group_name: &str) -> Result<(), Error> {
        let mut state = self.call("delete_billing_group")?;
        let _removed = state.billing_groups.remove(billing_group_name);
        Ok(())
    }

    async fn list_billing_groups(
        &self,
        _next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let state = self.call("list_billing_groups")?;
        Ok(page(
            state
                .billing_groups
                .values()
                .map(|group| ResourceSummary {
                    identifier: group.billing_group_name.clone(),
                    arn: Some(group.billing_group_arn.clone()),
                })
                .collect(),
        ))
    }

    async fn register_ca_certificate(
        &self,
        request: RegisterCaCertificateRequest,
    ) -> Result<ResourceSummary, Error> {
        let mut state = self.call("register_ca_certificate")?;
        let id = state.next_id();
        let arn = arn(&format!("cacert/{id}"));
        state.store_tags(&arn, request.tags);
        let _previous = state.ca_certificates.insert(
            id.clone(),
            CaCertificateDescription {
                certificate_id: id.clone(),
                certificate_arn: arn.clone(),
                certificate_pem: Some(request.ca_certificate),
                status: Some(if request.set_as_active {
                    CaCertificateStatus::Active
                } else {
                    CaCertificateStatus::Inactive
                }),
                auto_registration_status: Some(if request.allow_auto_registration {
                    AutoRegistrationStatus::Enable
                } else {
                    AutoRegistrationStatus::Disable
                }),
                certificate_mode: Some(request.certificate_mode.unwrap_or(CertificateMode::Default)),
                registration_config: request.registration_config,
            },
        );
        Ok(ResourceSummary {
            identifier: id,
            arn: Some(arn),
        })
    }

    async fn describe_ca_certificate(
        &self,
        certificate_id: &str,
    ) -> Result<CaCertificateDescription, Error> {
        let mut state = self.call("describe_ca_certificate")?;
        if let Some(remaining) = state.deleting.get_mut(certificate_id) {
            if *remaining == 0 {
                let _removed = state.deleting.remove(certificate_id);
                let _removed = state.ca_certificates.remove(certificate_id);
            } else {
                *remaining = remaining.saturating_sub(1);
            }
        }
        state
            .ca_certificates
            .get(certificate_id)
            .cloned()
            .ok_or_else(|| not_found(certificate_id))
    }

    async fn update_ca_certificate(&self, request: UpdateCaCertificateRequest) -> Result<(), Error> {
        let mut state = self.call("update_ca_certificate")?;
        let certificate = state
            .ca_certificates
            .get_mut(&request.certificate_id)
            .ok_or_else(|| not_found(&request.certificate_id))?;
        if request.new_status.is_some() {
            certificate.status = request.new_status;
        }
        if request.new_auto_registration_status.is_some() {
            certificate.auto_registration_status = request.new_auto_registration_status;
        }
        if request.registration_config.is_some() {
            certificate.registration_config = request.registration_config;
        }
        if request.remove_auto_registration == Some(true) {
            certificate.registration_config = None;
        }
        Ok(())
    }

    async fn delete_ca_certificate(&self, certificate_id: &str) -> Result<(), Error> {
        let mut state = self.call("delete_ca_certificate")?;
        let certificate = state
            .ca_certificates
            .get(certificate_id)
            .ok_or_else(|| not_found(certificate_id))?;
        if certificate.status == Some(CaCertificateStatus::Active) {
            return Err(service_error(
                ServiceErrorCode::CertificateState,
                "certificate is active",
            ));
        }
        if state.pending_describes == 0 {
            let _removed = state.ca_certificates.remove(certificate_id);
        } else {
            let lingering = state.pending_describes;
            let _previous = state.deleting.insert(certificate_id.to_owned(), lingering);
        }
        Ok(())
    }

    async fn list_ca_certificates(
        &self,
        _next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let state = self.call("list_ca_certificates")?;
        Ok(page(
            state
                .ca_certificates
                .values()
                .map(|certificate| ResourceSummary {
                    identifier: certificate.certificate_id.clone(),
                    arn: Some(certificate.certificate_arn.clone()),
                })
                .collect(),
        ))
    }

    async fn create_certificate_from_csr(
        &self,
        certificate_signing_request: &str,
        set_as_active: bool,
    ) -> Result<ResourceSummary, Error> {
        let mut state = self.call("create_certificate_from_csr")?;
        let id = state.next_id();
        let arn = arn(&format!("cert/{id}"));
        let _previous = state.certificates.insert(
            id.clone(),
            CertificateDescription {
                certificate_id: id.clone(),
                certificate_arn: arn.clone(),
                certificate_pem: Some(format!("signed:{certificate_signing_request}")),
                ca_certificate_id: None,
                status: Some(if set_as_active {
                    CertificateStatus::Active
                } else {
                    CertificateStatus::Inactive
                }),
                certificate_mode: Some(CertificateMode::Default),
            },
        );
        Ok(ResourceSummary {
            identifier: id,
            arn: Some(arn),
        })
    }

    async fn register_certificate(
        &self,
        request: RegisterCertificateRequest,
    ) -> Result<ResourceSummary, Error> {
        let mut state = self.call("register_certificate")?;
        if state
            .certificates
            .values()
            .any(|certificate| certificate.certificate_pem.as_ref() == Some(&request.certificate_pem))
        {
            return Err(service_error(
                ServiceErrorCode::CertificateConflict,
                "certificate already registered",
            ));
        }
        let id = state.next_id();
        let arn = arn(&format!("cert/{id}"));
        let _previous = state.certificates.insert(
            id.clone(),
            CertificateDescription {
                certificate_id: id.clone(),
                certificate_arn: arn.clone(),
                certificate_pem: Some(request.certificate_pem),
                ca_certificate_id: request.ca_certificate_pem.map(|_| "ca".to_owned()),
                status: Some(request.status.unwrap_or(CertificateStatus::Inactive)),
                certificate_mode: Some(CertificateMode::Default),
            },
        );
        Ok(ResourceSummary {
            identifier: id,
            arn: Some(arn),
        })
    }

    async fn register_certificate_without_ca(
        &self,
        certificate_pem: &str,
        status: Option<CertificateStatus>,
    ) -> Result<ResourceSummary, Error> {
        let mut state = self.call("register_certificate_without_ca")?;
        let id = state.next_id();
        let arn = arn(&format!("cert/{id}"));
        let _previous = state.certificates.insert(
            id.clone(),
            CertificateDescription {
                certificate_id: id.clone(),
                certificate_arn: arn.clone(),
                certificate_pem: Some(certificate_pem.to_owned()),
                ca_certificate_id: None,
                status: Some(status.unwrap_or(CertificateStatus::Inactive)),
                certificate_mode: Some(CertificateMode::SniOnly),
            },
        );
        Ok(ResourceSummary {
            identifier: id,
            arn: Some(arn),
        })
    }

    async fn describe_certificate(&self, certificate_id: &str) -> Result<CertificateDescription, Error> {
        let state = self.call("describe_certificate")?;
        state
            .certificates
            .get(certificate_id)
            .cloned()
            .ok_or_else(|| not_found(certificate_id))
    }

    async fn update_certificate(
        &self,
        certificate_id: &str,
        new_status: CertificateStatus,
    ) -> Result<(), Error> {
        let mut state = self.call("update_certificate")?;
        let certificate = state
            .certificates
            .get_mut(certificate_id)
            .ok_or_else(|| not_found(certificate_id))?;
        certificate.status = Some(new_status);
        Ok(())
    }

    async fn delete_certificate(&self, certificate_id: &str) -> Result<(), Error> {
        let mut state = self.call("delete_certificate")?;
        let certificate = state
            .certificates
            .get(certificate_id)
            .ok_or_else(|| not_found(certificate_id))?;
        if certificate.status == Some(CertificateStatus::Active) {
            return Err(service_error(
                ServiceErrorCode::CertificateState,
                "certificate is active",
            ));
        }
        let _removed = state.certificates.remove(certificate_id);
        Ok(())
    }

    async fn list_certificates(
        &self,
        _next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let state = self.call("list_certificates")?;
        Ok(page(
            state
                .certificates
                .values()
                .map(|certificate| ResourceSummary {
                    identifier: certificate.certificate_id.clone(),
                    arn: Some(certificate.certificate_arn.clone()),
                })
                .collect(),
        ))
    }

    async fn create_domain_configuration(
        &self,
        request: CreateDomainConfigurationRequest,
    ) -> Result<ResourceSummary, Error> {
        let mut state = self.call("create_domain_configuration")?;
        let name = request.domain_configuration_name;
        if state.domain_configurations.contains_key(&name) {
            return Err(already_exists(&name));
        }
        let arn = arn(&format!("domainconfiguration/{name}/abcde"));
        state.store_tags(&arn, request.tags);
        let server_certificate_arns = request.server_certificate_arns.unwrap_or_default();
        let domain_type = if server_certificate_arns.is_empty() {
            DomainType::Endpoint
        } else {
            DomainType::CustomerManaged
        };
        let _previous = state.domain_configurations.insert(
            name.clone(),
            DomainConfigurationDescription {
                domain_configuration_name: name.clone(),
                domain_configuration_arn: arn.clone(),
                domain_name: request.domain_name,
                server_certificates: server_certificate_arns
                    .into_iter()
                    .map(|arn| ServerCertificateSummary {
                        server_certificate_arn: Some(arn),
                        server_certificate_status: Some(ServerCertificateStatus::Valid),
                        server_certificate_status_detail: None,
                    })
                    .collect(),
                authorizer_config: request.authorizer_config,
                status: Some(DomainConfigurationStatus::Enabled),
                service_type: request.service_type,
                domain_type: Some(domain_type),
                tls_config: request.tls_config,
            },
        );
        Ok(ResourceSummary {
            identifier: name,
            arn: Some(arn),
        })
    }

    async fn describe_domain_configuration(
        &self,
        domain_configuration_name: &str,
    ) -> Result<DomainConfigurationDescription, Error> {
        let state = self.call("describe_domain_configuration")?;
        state
            .domain_configurations
            .get(domain_configuration_name)
            .cloned()
            .ok_or_else(|| not_found(domain_configuration_name))
    }

    async fn update_domain_configuration(
        &self,
        request: UpdateDomainConfigurationRequest,
    ) -> Result<(), Error> {
        let mut state = self.call("update_domain_configuration")?;
        let configuration = state
            .domain_configurations
            .get_mut(&request.domain_configuration_name)
            .ok_or_else(|| not_found(&request.domain_configuration_name))?;
        if request.authorizer_config.is_some() {
            configuration.authorizer_config = request.authorizer_config;
        }
        if request.remove_authorizer_config == Some(true) {
            configuration.authorizer_config = None;
        }
        if request.status.is_some() {
            configuration.status = request.status;
        }
        if request.tls_config.is_some() {
            configuration.tls_config = request.tls_config;
        }
        Ok(())
    }

    async fn delete_domain_configuration(
        &self,
        domain_configuration_name: &str,
    ) -> Result<(), Error> {
        let mut state = self.call("delete_domain_configuration")?;
        let configuration = state
            .domain_configurations
            .get(domain_configuration_name)
            .ok_or_else(|| not_found(domain_configuration_name))?;
        if configuration.status == Some(DomainConfigurationStatus::Enabled) {
            return Err(service_error(
                ServiceErrorCode::InvalidRequest,
                "domain configuration must be disabled before deletion",
            ));
        }
        let _removed = state.domain_configurations.remove(domain_configuration_name);
        Ok(())
    }

    async fn list_domain_configurations(
        &self,
        _next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let state = self.call("list_domain_configurations")?;
        Ok(page(
            state
                .domain_configurations
                .values()
                .map(|configuration| ResourceSummary {
                    identifier: configuration.domain_configuration_name.clone(),
                    arn: Some(configuration.domain_configuration_arn.clone()),
                })
                .collect(),
        ))
    }

    async fn get_v2_logging_options(&self) -> Result<LoggingOptions, Error> {
        let state = self.call("get_v2_logging_options")?;
        state.logging.clone().ok_or_else(|| {
            service_error(ServiceErrorCode::NotConfigured, "logging is not configured")
        })
    }

    async fn set_v2_logging_options(&self, options: LoggingOptions) -> Result<(), Error> {
        let mut state = self.call("set_v2_logging_options")?;
        state.logging = Some(options);
        Ok(())
    }

    async fn create_policy(&self, request: CreatePolicyRequest) -> Result<ResourceSummary, Error> {
        let mut state = self.call("create_policy")?;
        let name = request.policy_name;
        if state.policies.contains_key(&name) {
            return Err(already_exists(&name));
        }
        let arn = arn(&format!("policy/{name}"));
        state.store_tags(&arn, request.tags);
        let version = state.new_version("1".to_owned(), request.policy_document);
        let _previous = state.policies.insert(
            name.clone(),
            Versioned {
                description: PolicyDescription {
                    policy_name: name.clone(),
                    policy_arn: arn.clone(),
                    policy_document: None,
                    default_version_id: None,
                },
                versions: vec![version],
            },
        );
        Ok(ResourceSummary {
            identifier: name,
            arn: Some(arn),
        })
    }

    async fn get_policy(&self, policy_name: &str) -> Result<PolicyDescription, Error> {
        let state = self.call("get_policy")?;
        let policy = state
            .policies
            .get(policy_name)
            .ok_or_else(|| not_found(policy_name))?;
        let default = policy.default_version();
        Ok(PolicyDescription {
            policy_document: default.map(|version| version.document.clone()),
            default_version_id: default.map(|version| version.summary.version_id.clone()),
            ..policy.description.clone()
        })
    }

    async fn create_policy_version(
        &self,
        policy_name: &str,
        policy_document: &str,
        set_as_default: bool,
    ) -> Result<(), Error> {
        let mut state = self.call("create_policy_version")?;
        let policy = state
            .policies
            .get(policy_name)
            .ok_or_else(|| not_found(policy_name))?;
        if policy.versions.len() >= VERSION_LIMIT {
            return Err(service_error(
                ServiceErrorCode::VersionsLimitExceeded,
                "too many versions",
            ));
        }
        let version_id = policy.next_version_id();
        let mut version = state.new_version(version_id.clone(), policy_document.to_owned());
        version.summary.is_default = false;
        let policy = state
            .policies
            .get_mut(policy_name)
            .ok_or_else(|| not_found(policy_name))?;
        policy.versions.push(version);
        if set_as_default {
            policy.set_default(&version_id)?;
        }
        Ok(())
    }

    async fn list_policy_versions(&self, policy_name: &str) -> Result<Vec<VersionSummary>, Error> {
        let state = self.call("list_policy_versions")?;
        let policy = state
            .policies
            .get(policy_name)
            .ok_or_else(|| not_found(policy_name))?;
        Ok(policy
            .versions
            .iter()
            .map(|version| version.summary.clone())
            .collect())
    }

    async fn set_default_policy_version(
        &self,
        policy_name: &str,
        policy_version_id: &str,
    ) -> Result<(), Error> {
        let mut state = self.call("set_default_policy_version")?;
        state
            .policies
            .get_mut(policy_name)
            .ok_or_else(|| not_found(policy_name))?
            .set_default(policy_version_id)
    }

    async fn delete_policy_version(
        &self,
        policy_name: &str,
        policy_version_id: &str,
    ) -> Result<(), Error> {
        let mut state = self.call("delete_policy_version")?;
        state
            .policies
            .get_mut(policy_name)
            .ok_or_else(|| not_found(policy_name))?
            .delete_version(policy_version_id)
    }

    async fn delete_policy(&self, policy_name: &str) -> Result<(), Error> {
        let mut state = self.call("delete_policy")?;
        let policy = state
            .policies
            .get(policy_name)
            .ok_or_else(|| not_found(policy_name))?;
        if policy.versions.len() > 1 {
            return Err(service_error(
                ServiceErrorCode::DeleteConflict,
                "policy has non-default versions",
            ));
        }
        let _removed = state.policies.remove(policy_name);
        Ok(())
    }

    async fn list_policies(
        &self,
        _next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let state = self.call("list_policies")?;
        Ok(page(
            state
                .policies
                .values()
                .map(|policy| ResourceSummary {
                    identifier: policy.description.policy_name.clone(),
                    arn: Some(policy.description.policy_arn.clone()),
                })
                .collect(),
        ))
    }

    async fn create_provisioning_template(
        &self,
        request: CreateProvisioningTemplateRequest,
    ) -> Result<ResourceSummary, Error> {
        let mut state = self.call("create_provisioning_template")?;
        let name = request.template_name;
        if state.templates.contains_key(&name) {
            return Err(already_exists(&name));
        }
        let arn = arn(&format!("provisioningtemplate/{name}"));
        state.store_tags(&arn, request.tags);
        let version = state.new_version("1".to_owned(), request.template_body.unwrap_or_default());
        let _previous = state.templates.insert(
            name.clone(),
            Versioned {
                description: ProvisioningTemplateDescription {
                    template_name: name.clone(),
                    template_arn: arn.clone(),
                    description: request.description,
                    enabled: Some(request.enabled.unwrap_or(false)),
                    provisioning_role_arn: request.provisioning_role_arn,
                    template_body: None,
                    template_type: request.template_type,
                    default_version_id: None,
                    pre_provisioning_hook: request.pre_provisioning_hook,
                },
                versions: vec![version],
            },
        );
        Ok(ResourceSummary {
            identifier: name,
            arn: Some(arn),
        })
    }

    async fn describe_provisioning_template(
        &self,
        template_name: &str,
    ) -> Result<ProvisioningTemplateDescription, Error> {
        let state = self.call("describe_provisioning_template")?;
        let template = state
            .templates
            .get(template_name)
            .ok_or_else(|| not_found(template_name))?;
        let default = template.default_version();
        Ok(ProvisioningTemplateDescription {
            template_body: default.map(|version| version.document.clone()),
            default_version_id: default.and_then(|version| version.summary.version_id.parse().ok()),
            ..template.description.clone()
        })
    }

    async fn update_provisioning_template(
        &self,
        request: UpdateProvisioningTemplateRequest,
    ) -> Result<(), Error> {
        let mut state = self.call("update_provisioning_template")?;
        let template = state
            .templates
            .get_mut(&request.template_name)
            .ok_or_else(|| not_found(&request.template_name))?;
        if request.description.is_some() {
            template.description.description = request.description;
        }
        if request.enabled.is_some() {
            template.description.enabled = request.enabled;
        }
        if request.provisioning_role_arn.is_some() {
            template.description.provisioning_role_arn = request.provisioning_role_arn;
        }
        if request.pre_provisioning_hook.is_some() {
            template.description.pre_provisioning_hook = request.pre_provisioning_hook;
        }
        if request.remove_pre_provisioning_hook == Some(true) {
            template.description.pre_provisioning_hook = None;
        }
        if let Some(version_id) = request.default_version_id {
            template.set_default(&version_id.to_string())?;
        }
        Ok(())
    }

    async fn delete_provisioning_template(&self, template_name: &str) -> Result<(), Error> {
        let mut state = self.call("delete_provisioning_template")?;
        state
            .templates
            .remove(template_name)
            .map(|_| ())
            .ok_or_else(|| not_found(template_name))
    }

    async fn list_provisioning_templates(
        &self,
        _next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let state = self.call("list_provisioning_templates")?;
        Ok(page(
            state
                .templates
                .values()
                .map(|template| ResourceSummary {
                    identifier: template.description.template_name.clone(),
                    arn: Some(template.description.template_arn.clone()),
                })
                .collect(),
        ))
    }

    async fn create_provisioning_template_version(
        &self,
        template_name: &str,
        template_body: &str,
        set_as_default: bool,
    ) -> Result<(), Error> {
        let mut state = self.call("create_provisioning_template_version")?;
        let template = state
            .templates
            .get(template_name)
            .ok_or_else(|| not_found(template_name))?;
        if template.versions.len() >= VERSION_LIMIT {
            return Err(service_error(
                ServiceErrorCode::VersionsLimitExceeded,
                "too many versions",
            ));
        }
        let version_id = template.next_version_id();
        let mut version = state.new_version(version_id.clone(), template_body.to_owned());
        version.summary.is_default = false;
        let template = state
            .templates
            .get_mut(template_name)
            .ok_or_else(|| not_found(template_name))?;
        template.versions.push(version);
        if set_as_default {
            template.set_default(&version_id)?;
        }
        Ok(())
    }

    async fn list_provisioning_template_versions(
        &self,
        template_name: &str,
    ) -> Result<Vec<VersionSummary>, Error> {
        let state = self.call("list_provisioning_template_versions")?;
        let template = state
            .templates
            .get(template_name)
            .ok_or_else(|| not_found(template_name))?;
        Ok(template
            .versions
            .iter()
            .map(|version| version.summary.clone())
            .collect())
    }

    async fn delete_provisioning_template_version(
        &self,
        template_name: &str,
        version_id: i32,
    ) -> Result<(), Error> {
        let mut state = self.call("delete_provisioning_template_version")?;
        state
            .templates
            .get_mut(template_name)
            .ok_or_else(|| not_found(template_name))?
            .delete_version(&version_id.to_string())
    }

    async fn create_role_alias(
        &self,
        request: CreateRoleAliasRequest,
    ) -> Result<ResourceSummary, Error> {
        let mut state = self.call("create_role_alias")?;
        let alias = request.role_alias;
        if state.role_aliases.contains_key(&alias) {
            return Err(already_exists(&alias));
        }
        let arn = arn(&format!("rolealias/{alias}"));
        state.store_tags(&arn, request.tags);
        let _previous = state.role_aliases.insert(
            alias.clone(),
            RoleAliasDescription {
                role_alias: alias.clone(),
                role_alias_arn: arn.clone(),
                role_arn: request.role_arn,
                credential_duration_seconds: request.credential_duration_seconds,
            },
        );
        Ok(ResourceSummary {
            identifier: alias,
            arn: Some(arn),
        })
    }

    async fn describe_role_alias(&self, role_alias: &str) -> Result<RoleAliasDescription, Error> {
        let state = self.call("describe_role_alias")?;
        state
            .role_aliases
            .get(role_alias)
            .cloned()
            .ok_or_else(|| not_found(role_alias))
    }

    async fn update_role_alias(&self, request: UpdateRoleAliasRequest) -> Result<(), Error> {
        let mut state = self.call("update_role_alias")?;
        let alias = state
            .role_aliases
            .get_mut(&request.role_alias)
            .ok_or_else(|| not_found(&request.role_alias))?;
        if request.role_arn.is_some() {
            alias.role_arn = request.role_arn;
        }
        if request.credential_duration_seconds.is_some() {
            alias.credential_duration_seconds = request.credential_duration_seconds;
        }
        Ok(())
    }

    async fn delete_role_alias(&self, role_alias: &str) -> Result<(), Error> {
        let mut state = self.call("delete_role_alias")?;
        state
            .role_aliases
            .remove(role_alias)
            .map(|_| ())
            .ok_or_else(|| not_found(role_alias))
    }

    async fn list_role_aliases(
        &self,
        _next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let state = self.call("list_role_aliases")?;
        Ok(page(
            state
                .role_aliases
                .values()
                .map(|alias| ResourceSummary {
                    identifier: alias.role_alias.clone(),
                    arn: Some(alias.role_alias_arn.clone()),
                })
                .collect(),
        ))
    }

    async fn create_topic_rule(
        &self,
        rule_name: &str,
        payload: TopicRulePayload,
        tags: TagList,
    ) -> Result<(), Error> {
        let mut state = self.call("create_topic_rule")?;
        if state.topic_rules.contains_key(rule_name) {
            return Err(already_exists(rule_name));
        }
        let arn = arn(&format!("rule/{rule_name}"));
        state.store_tags(&arn, tags);
        let _previous = state.topic_rules.insert(
            rule_name.to_owned(),
            TopicRuleDescription {
                rule_name: rule_name.to_owned(),
                rule_arn: arn,
                payload,
            },
        );
        Ok(())
    }

    async fn get_topic_rule(&self, rule_name: &str) -> Result<TopicRuleDescription, Error> {
        let state = self.call("get_topic_rule")?;
        state.topic_rules.get(rule_name).cloned().ok_or_else(|| {
            service_error(
                ServiceErrorCode::Unauthorized,
                format!("rule {rule_name} does not exist"),
            )
        })
    }

    async fn replace_topic_rule(&self, rule_name: &str, payload: TopicRulePayload) -> Result<(), Error> {
        let mut state = self.call("replace_topic_rule")?;
        let rule = state
            .topic_rules
            .get_mut(rule_name)
            .ok_or_else(|| not_found(rule_name))?;
        rule.payload = payload;
        Ok(())
    }

    async fn delete_topic_rule(&self, rule_name: &str) -> Result<(), Error> {
        let mut state = self.call("delete_topic_rule")?;
        let _removed = state.topic_rules.remove(rule_name);
        Ok(())
    }

    async fn list_topic_rules(
        &self,
        _next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let state = self.call("list_topic_rules")?;
        Ok(page(
            state
                .topic_rules
                .values()
                .map(|rule| ResourceSummary {
                    identifier: rule.rule_name.clone(),
                    arn: Some(rule.rule_arn.clone()),
                })
                .collect(),
        ))
    }

    async fn create_topic_rule_destination(
        &self,
        request: CreateTopicRuleDestinationRequest,
    ) -> Result<TopicRuleDestinationDescription, Error> {
        let mut state = self.call("create_topic_rule_destination")?;
        let id = state.next_id();
        let vpc = request.vpc_properties.is_some();
        let arn = arn(&format!(
            "ruledestination/{}/{id}",
            if vpc { "vpc" } else { "http" }
        ));
        // HTTP destinations wait for confirmation of the endpoint
        let status = if vpc && state.pending_describes == 0 {
            TopicRuleDestinationStatus::Enabled
        } else {
            if vpc {
                let pending = state.pending_describes;
                let _previous = state.provisioning.insert(arn.clone(), pending);
            }
            TopicRuleDestinationStatus::InProgress
        };
        let description = TopicRuleDestinationDescription {
            arn,
            status: Some(status),
            status_reason: None,
            http_url_properties: request.http_url_properties,
            vpc_properties: request.vpc_properties,
        };
        let _previous = state
            .topic_rule_destinations
            .insert(description.arn.clone(), description.clone());
        Ok(description)
    }

    async fn get_topic_rule_destination(
        &self,
        arn: &str,
    ) -> Result<TopicRuleDestinationDescription, Error> {
        let mut state = self.call("get_topic_rule_destination")?;
        if let Some(remaining) = state.provisioning.get_mut(arn) {
            if *remaining == 0 {
                let _removed = state.provisioning.remove(arn);
                if let Some(destination) = state.topic_rule_destinations.get_mut(arn) {
                    destination.status = Some(TopicRuleDestinationStatus::Enabled);
                }
            } else {
                *remaining = remaining.saturating_sub(1);
            }
        }
        state
            .topic_rule_destinations
            .get(arn)
            .cloned()
            .ok_or_else(|| not_found(arn))
    }

    async fn update_topic_rule_destination(
        &self,
        arn: &str,
        status: TopicRuleDestinationStatus,
    ) -> Result<(), Error> {
        let mut state = self.call("update_topic_rule_destination")?;
        let destination = state
            .topic_rule_destinations
            .get_mut(arn)
            .ok_or_else(|| not_found(arn))?;
        destination.status = Some(status);
        Ok(())
    }

    async fn delete_topic_rule_destination(&self, arn: &str) -> Result<(), Error> {
        let mut state = self.call("delete_topic_rule_destination")?;
        state
            .topic_rule_destinations
            .remove(arn)
            .map(|_| ())
            .ok_or_else(|| not_found(arn))
    }

    async fn list_topic_rule_destinations(
        &self,
        _next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let state = self.call("list_topic_rule_destinations")?;
        Ok(page(
            state
                .topic_rule_destinations
                .keys()
                .map(|arn| ResourceSummary {
                    identifier: arn.clone(),
                    arn: Some(arn.clone()),
                })
                .collect(),
        ))
    }

    async fn create_thing(
        &self,
        thing_name: &str,
        attribute_payload: AttributePayload,
    ) -> Result<ResourceSummary, Error> {
        let mut state = self.call("create_thing")?;
        if state.things.contains_key(thing_name) {
            return Err(already_exists(thing_name));
        }
        let arn = arn(&format!("thing/{thing_name}"));
        let id = state.next_id();
        let _previous = state.things.insert(
            thing_name.to_owned(),
            ThingDescription {
                thing_name: thing_name.to_owned(),
                thing_arn: arn.clone(),
                thing_id: id,
                attributes: attribute_payload.attributes.unwrap_or_default(),
            },
        );
        Ok(ResourceSummary {
            identifier: thing_name.to_owned(),
            arn: Some(arn),
        })
    }

    async fn describe_thing(&self, thing_name: &str) -> Result<ThingDescription, Error> {
        let state = self.call("describe_thing")?;
        state
            .things
            .get(thing_name)
            .cloned()
            .ok_or_else(|| not_found(thing_name))
    }

    async fn update_thing(
        &self,
        thing_name: &str,
        attribute_payload: AttributePayload,
    ) -> Result<(), Error> {
        let mut state = self.call("update_thing")?;
        let thing = state
            .things
            .get_mut(thing_name)
            .ok_or_else(|| not_found(thing_name))?;
        thing.attributes = attribute_payload.attributes.unwrap_or_default();
        Ok(())
    }

    async fn delete_thing(&self, thing_name: &str) -> Result<(), Error> {
        let mut state = self.call("delete_thing")?;
        let _removed = state.things.remove(thing_name);
        Ok(())
    }

    async fn list_things(&self, _next_token: Option<String>) -> Result<Page<ResourceSummary>, Error> {
        let state = self.call("list_things")?;
        Ok(page(
            state
                .things
                .values()
                .map(|thing| ResourceSummary {
                    identifier: thing.thing_name.clone(),
                    arn: Some(thing.thing_arn.clone()),
                })
                .collect(),
        ))
    }

    async fn create_thing_group(
        &self,
        request: CreateThingGroupRequest,
    ) -> Result<ResourceSummary, Error> {
        let mut state = self.call("create_thing_group")?;
        let name = request.thing_group_name;
        if state.thing_groups.contains_key(&name) {
            return Err(already_exists(&name));
        }
        if let Some(ref parent) = request.parent_group_name {
            if !state.thing_groups.contains_key(parent) {
                return Err(not_found(parent));
            }
        }
        let arn = arn(&format!("thinggroup/{name}"));
        let id = state.next_id();
        state.store_tags(&arn, request.tags);
        let _previous = state.thing_groups.insert(
            name.clone(),
            ThingGroupDescription {
                thing_group_name: name.clone(),
                thing_group_arn: arn.clone(),
                thing_group_id: id,
                parent_group_name: request.parent_group_name,
                properties: request.properties,
            },
        );
        Ok(ResourceSummary {
            identifier: name,
            arn: Some(arn),
        })
    }

    async fn describe_thing_group(
        &self,
        thing_group_name: &str,
    ) -> Result<ThingGroupDescription, Error> {
        let state = self.call("describe_thing_group")?;
        state
            .thing_groups
            .get(thing_group_name)
            .cloned()
            .ok_or_else(|| not_found(thing_group_name))
    }

    async fn update_thing_group(
        &self,
        thing_group_name: &str,
        properties: ThingGroupProperties,
    ) -> Result<(), Error> {
        let mut state = self.call("update_thing_group")?;
        let group = state
            .thing_groups
            .get_mut(thing_group_name)
            .ok_or_else(|| not_found(thing_group_name))?;
        group.properties = properties;
        Ok(())
    }

    async fn delete_thing_group(&self, thing_group_name: &str) -> Result<(), Error> {
        let mut state = self.call("delete_thing_group")?;
        let _removed = state.thing_groups.remove(thing_group_name);
        Ok(())
    }

    async fn list_thing_groups(
        &self,
        _next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let state = self.call("list_thing_groups")?;
        Ok(page(
            state
                .thing_groups
                .values()
                .map(|group| ResourceSummary {
                    identifier: group.thing_group_name.clone(),
                    arn: Some(group.thing_group_arn.clone()),
                })
                .collect(),
        ))
    }

    async fn create_thing_type(
        &self,
        request: CreateThingTypeRequest,
    ) -> Result<ResourceSummary, Error> {
        let mut state = self.call("create_thing_type")?;
        let name = request.thing_type_name;
        if state.thing_types.contains_key(&name) {
            return Err(already_exists(&name));
        }
        let arn = arn(&format!("thingtype/{name}"));
        let id = state.next_id();
        state.store_tags(&arn, request.tags);
        let _previous = state.thing_types.insert(
            name.clone(),
            ThingTypeDescription {
                thing_type_name: name.clone(),
                thing_type_arn: arn.clone(),
                thing_type_id: id,
                properties: request.properties,
                deprecated: false,
            },
        );
        Ok(ResourceSummary {
            identifier: name,
            arn: Some(arn),
        })
    }

    async fn describe_thing_type(
        &self,
        thing_type_name: &str,
    ) -> Result<ThingTypeDescription, Error> {
        let state = self.call("describe_thing_type")?;
        state
            .thing_types
            .get(thing_type_name)
            .cloned()
            .ok_or_else(|| not_found(thing_type_name))
    }

    async fn deprecate_thing_type(
        &self,
        thing_type_name: &str,
        undo_deprecate: bool,
    ) -> Result<(), Error> {
        let mut state = self.call("deprecate_thing_type")?;
        let thing_type = state
            .thing_types
            .get_mut(thing_type_name)
            .ok_or_else(|| not_found(thing_type_name))?;
        thing_type.deprecated = !undo_deprecate;
        Ok(())
    }

    async fn delete_thing_type(&self, thing_type_name: &str) -> Result<(), Error> {
        let mut state = self.call("delete_thing_type")?;
        let thing_type = state
            .thing_types
            .get(thing_type_name)
            .ok_or_else(|| not_found(thing_type_name))?;
        if !thing_type.deprecated {
            return Err(service_error(
                ServiceErrorCode::InvalidRequest,
                "thing type must be deprecated before deletion",
            ));
        }
        let _removed = state.thing_types.remove(thing_type_name);
        Ok(())
    }

    async fn list_thing_types(
        &self,
        _next_token: Option<String>,
    ) -> Result<Page<ResourceSummary>, Error> {
        let state = self.call("list_thing_types")?;
        Ok(page(
            state
                .thing_types
                .values()
                .map(|thing_type| ResourceSummary {
                    identifier: thing_type.thing_type_name.clone(),
                    arn: Some(thing_type.thing_type_arn.clone()),
                })
                .collect(),
        ))
    }
}
