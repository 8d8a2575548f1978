//! Default version rotation for versioned documents
//!
//! Policies and provisioning templates keep at most five versions. Creating a
//! new default version when the limit is reached requires removing the oldest
//! one first, and the default version itself cannot be deleted.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{
    api::{IotApi, ServiceErrorCode, VersionSummary},
    Error,
};

/// A resource with a versioned document.
#[async_trait]
pub(crate) trait VersionedDocument: Send + Sync {
    async fn create_version(&self, document: &str, set_as_default: bool) -> Result<(), Error>;
    async fn list_versions(&self) -> Result<Vec<VersionSummary>, Error>;
    async fn set_default_version(&self, version_id: &str) -> Result<(), Error>;
    async fn delete_version(&self, version_id: &str) -> Result<(), Error>;
}

pub(crate) struct PolicyVersions<'a> {
    pub(crate) client: &'a dyn IotApi,
    pub(crate) policy_name: &'a str,
}

#[async_trait]
impl VersionedDocument for PolicyVersions<'_> {
    async fn create_version(&self, document: &str, set_as_default: bool) -> Result<(), Error> {
        self.client
            .create_policy_version(self.policy_name, document, set_as_default)
            .await
    }

    async fn list_versions(&self) -> Result<Vec<VersionSummary>, Error> {
        self.client.list_policy_versions(self.policy_name).await
    }

    async fn set_default_version(&self, version_id: &str) -> Result<(), Error> {
        self.client
            .set_default_policy_version(self.policy_name, version_id)
            .await
    }

    async fn delete_version(&self, version_id: &str) -> Result<(), Error> {
        self.client
            .delete_policy_version(self.policy_name, version_id)
            .await
    }
}

pub(crate) struct TemplateVersions<'a> {
    pub(crate) client: &'a dyn IotApi,
    pub(crate) template_name: &'a str,
}

fn template_version_id(version_id: &str) -> Result<i32, Error> {
    version_id
        .parse()
        .map_err(|e| Error::InvalidResponseError {
            message: format!("template version id \"{version_id}\" is not a number: {e}"),
        })
}

#[async_trait]
impl VersionedDocument for TemplateVersions<'_> {
    async fn create_version(&self, document: &str, set_as_default: bool) -> Result<(), Error> {
        self.client
            .create_provisioning_template_version(self.template_name, document, set_as_default)
            .await
    }

    async fn list_versions(&self) -> Result<Vec<VersionSummary>, Error> {
        self.client
            .list_provisioning_template_versions(self.template_name)
            .await
    }

    async fn set_default_version(&self, version_id: &str) -> Result<(), Error> {
        self.client
            .update_provisioning_template(crate::api::UpdateProvisioningTemplateRequest {
                template_name: self.template_name.to_owned(),
                default_version_id: Some(template_version_id(version_id)?),
                ..Default::default()
            })
            .await
    }

    async fn delete_version(&self, version_id: &str) -> Result<(), Error> {
        self.client
            .delete_provisioning_template_version(
                self.template_name,
                template_version_id(version_id)?,
            )
            .await
    }
}

/// Sort key of a version: creation date, then numeric id.
fn age(version: &VersionSummary) -> (Option<chrono::DateTime<chrono::Utc>>, u64, &str) {
    (
        version.create_date,
        version.version_id.parse().unwrap_or(u64::MAX),
        &version.version_id,
    )
}

pub(crate) fn oldest(versions: &[VersionSummary]) -> Option<&VersionSummary> {
    versions.iter().min_by(|a, b| age(a).cmp(&age(b)))
}

pub(crate) fn newest_except<'a>(
    versions: &'a [VersionSummary],
    excluded: &VersionSummary,
) -> Option<&'a VersionSummary> {
    versions
        .iter()
        .filter(|version| version.version_id != excluded.version_id)
        .max_by(|a, b| age(a).cmp(&age(b)))
}

/// Makes room for a new version by deleting the oldest one.
async fn remove_oldest<V: VersionedDocument + ?Sized>(versions: &V) -> Result<(), Error> {
    let list = versions.list_versions().await?;

    let oldest = oldest(&list).ok_or_else(|| Error::UnexpectedNoneValue {
        entity: "oldest document version".to_owned(),
    })?;

    if oldest.is_default {
        let newest = newest_except(&list, oldest).ok_or_else(|| Error::UnexpectedNoneValue {
            entity: "replacement default version".to_owned(),
        })?;
        debug!(
            from = %oldest.version_id,
            to = %newest.version_id,
            "moving default version"
        );
        versions.set_default_version(&newest.version_id).await?;
    }

    debug!(version = %oldest.version_id, "deleting oldest version");
    versions.delete_version(&oldest.version_id).await
}

/// Creates `document` as the new default version, rotating out the oldest
/// version once if the version limit is reached.
pub(crate) async fn create_default_version<V: VersionedDocument + ?Sized>(
    versions: &V,
    document: &str,
) -> Result<(), Error> {
    match versions.create_version(document, true).await {
        Err(err) if err.service_code() == Some(&ServiceErrorCode::VersionsLimitExceeded) => {
            warn!("version limit reached, rotating out the oldest version");
            remove_oldest(versions).await?;
            versions.create_version(document, true).await
        }
        result => result,
    }
}
