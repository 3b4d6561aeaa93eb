use crate::ports::outbound::PolicyEvaluator;
use crate::remediation::domain::{
    Component, PolicyComponent, PolicyCoordinates, PolicyIdentity, RemediationDecision,
    RemediationType, RemediationVariant, Stage,
};
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Username/password pair for the policy engine's basic authentication
#[derive(Clone, PartialEq, Eq)]
pub struct PolicyCredentials {
    username: String,
    password: String,
}

impl PolicyCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Parses a `user:password` pair, splitting on the first `:`
    ///
    /// # Errors
    /// Returns an error if there is no `:` or the user part is empty
    pub fn parse(pair: &str) -> Result<Self> {
        let Some((username, password)) = pair.split_once(':') else {
            anyhow::bail!("Credentials must have the form 'user:password'");
        };

        if username.is_empty() {
            anyhow::bail!("Credentials must name a user");
        }

        Ok(Self::new(username, password))
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl std::fmt::Debug for PolicyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// IqPolicyClient adapter for a Sonatype-IQ-style policy engine REST API
///
/// This adapter implements the PolicyEvaluator port. Each evaluation
/// resolves the application's internal id (cached per client) and requests
/// the remediation options for the component's package-URL.
///
/// # Security
/// - Implements timeout (configurable, 30 seconds by default)
/// - Does not retry failed requests; a failure skips the component
pub struct IqPolicyClient {
    client: reqwest::Client,
    base_url: String,
    credentials: PolicyCredentials,
    application_ids: DashMap<String, String>,
}

impl IqPolicyClient {
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

    /// Creates a client for the policy engine at `server_url`
    ///
    /// # Errors
    /// Returns an error if the URL is not an absolute http(s) URL or the HTTP
    /// client cannot be built.
    pub fn new(server_url: &str, credentials: PolicyCredentials, timeout: Duration) -> Result<Self> {
        let parsed = reqwest::Url::parse(server_url)
            .with_context(|| format!("Invalid policy engine URL: {}", server_url))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!(
                "Policy engine URL must use http or https, got '{}'",
                parsed.scheme()
            );
        }

        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("pr-remediator/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to build policy engine HTTP client")?;

        Ok(Self {
            client,
            base_url: server_url.trim_end_matches('/').to_string(),
            credentials,
            application_ids: DashMap::new(),
        })
    }

    /// Resolves the internal id of an application from its public id
    async fn application_id(&self, public_id: &str) -> Result<String> {
        if let Some(id) = self.application_ids.get(public_id) {
            return Ok(id.value().clone());
        }

        let url = format!(
            "{}/api/v2/applications?publicId={}",
            self.base_url,
            urlencoding::encode(public_id)
        );

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await
            .with_context(|| format!("Policy engine request failed: {}", url))?;

        check_status(&response, || format!("looking up application '{}'", public_id))?;

        let body: ApplicationsResponse = response
            .json()
            .await
            .context("Malformed application lookup response from policy engine")?;

        let id = body
            .applications
            .into_iter()
            .next()
            .map(|app| app.id)
            .ok_or_else(|| anyhow::anyhow!("Policy application '{}' not found", public_id))?;

        self.application_ids
            .insert(public_id.to_string(), id.clone());
        Ok(id)
    }
}

#[async_trait]
impl PolicyEvaluator for IqPolicyClient {
    async fn evaluate(
        &self,
        component: &Component,
        stage: Stage,
        application: &str,
    ) -> Result<RemediationDecision> {
        let application_id = self.application_id(application).await?;

        let url = format!(
            "{}/api/v2/components/remediation/application/{}?stageId={}",
            self.base_url,
            urlencoding::encode(&application_id),
            stage.as_str()
        );

        let query = RemediationQuery {
            package_url: component.to_package_url(),
        };

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .json(&query)
            .send()
            .await
            .with_context(|| format!("Policy engine request failed: {}", url))?;

        check_status(&response, || format!("evaluating {}", query.package_url))?;

        let envelope: RemediationEnvelope = response
            .json()
            .await
            .context("Malformed remediation response from policy engine")?;

        Ok(envelope.remediation.into())
    }
}

fn check_status(response: &reqwest::Response, action: impl FnOnce() -> String) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        anyhow::bail!(
            "Policy engine rejected the credentials ({}) while {}",
            status,
            action()
        );
    }

    anyhow::bail!(
        "Policy engine returned status code {} while {}",
        status,
        action()
    );
}

// Policy engine request/response structures

#[derive(Debug, Deserialize)]
struct ApplicationsResponse {
    #[serde(default)]
    applications: Vec<ApplicationSummary>,
}

#[derive(Debug, Deserialize)]
struct ApplicationSummary {
    id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemediationQuery {
    package_url: String,
}

#[derive(Debug, Deserialize)]
struct RemediationEnvelope {
    remediation: IqRemediation,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IqRemediation {
    #[serde(default)]
    version_changes: Vec<IqVersionChange>,
}

#[derive(Debug, Deserialize)]
struct IqVersionChange {
    #[serde(rename = "type")]
    change_type: String,
    data: IqChangeData,
}

#[derive(Debug, Deserialize)]
struct IqChangeData {
    component: IqComponent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IqComponent {
    #[serde(default)]
    package_url: Option<String>,
    #[serde(default)]
    component_identifier: Option<IqComponentIdentifier>,
}

#[derive(Debug, Deserialize)]
struct IqComponentIdentifier {
    format: String,
    #[serde(default)]
    coordinates: HashMap<String, serde_json::Value>,
}

impl IqComponentIdentifier {
    fn coordinate(&self, key: &str) -> Option<String> {
        self.coordinates
            .get(key)
            .and_then(serde_json::Value::as_str)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

impl From<IqComponentIdentifier> for PolicyIdentity {
    fn from(identifier: IqComponentIdentifier) -> Self {
        // pypi and gem report their package name as "name"
        let package_id = identifier
            .coordinate("packageId")
            .or_else(|| identifier.coordinate("name"));

        let coordinates = PolicyCoordinates {
            group_id: identifier.coordinate("groupId"),
            artifact_id: identifier.coordinate("artifactId"),
            package_id,
            version: identifier.coordinate("version"),
        };

        PolicyIdentity::new(identifier.format, coordinates)
    }
}

impl From<IqRemediation> for RemediationDecision {
    fn from(remediation: IqRemediation) -> Self {
        let variants = remediation
            .version_changes
            .into_iter()
            .map(|change| {
                RemediationVariant::new(
                    RemediationType::from_tag(&change.change_type),
                    PolicyComponent {
                        package_url: change.data.component.package_url,
                        identity: change
                            .data
                            .component
                            .component_identifier
                            .map(PolicyIdentity::from),
                    },
                )
            })
            .collect();

        RemediationDecision::new(variants)
    }
}
