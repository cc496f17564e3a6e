//! reqwest-backed job-board API client.
//!
//! Thin wrappers over the portal endpoints plus the per-resource adapters
//! that bind them to [`RemoteOps`]. The cache layer never talks to this
//! directly; it only sees the injected trait objects.

use color_eyre::{eyre::eyre, Result};
use futures::future::BoxFuture;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

use crate::config::Config;
use crate::remote::{ApiResponse, RemoteOps};

use super::types::{Application, Job, LabelCode};

/// Job-board API client wrapper.
#[derive(Clone)]
pub struct HttpRemote {
  client: Client,
  base: Url,
  token: String,
}

impl HttpRemote {
  pub fn new(config: &Config) -> Result<Self> {
    let token = Config::api_token()?;

    let base = Url::parse(&config.api.url)
      .map_err(|e| eyre!("Invalid API url {}: {}", config.api.url, e))?;

    let client = Client::builder()
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self {
      client,
      base,
      token,
    })
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let url = self
      .base
      .join(path)
      .map_err(|e| eyre!("Invalid endpoint {}: {}", path, e))?;

    let response = self
      .client
      .get(url)
      .bearer_auth(&self.token)
      .send()
      .await
      .map_err(|e| eyre!("Request to {} failed: {}", path, e))?;

    response
      .json::<T>()
      .await
      .map_err(|e| eyre!("Failed to parse response from {}: {}", path, e))
  }

  async fn post_json<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
    let url = self
      .base
      .join(path)
      .map_err(|e| eyre!("Invalid endpoint {}: {}", path, e))?;

    let response = self
      .client
      .post(url)
      .bearer_auth(&self.token)
      .json(body)
      .send()
      .await
      .map_err(|e| eyre!("Request to {} failed: {}", path, e))?;

    response
      .json::<T>()
      .await
      .map_err(|e| eyre!("Failed to parse response from {}: {}", path, e))
  }

  /// All currently active postings.
  pub async fn active_jobs(&self) -> Result<ApiResponse<Vec<Job>>> {
    self.get_json("jobs/active").await
  }

  /// Jobs the signed-in student has saved.
  pub async fn saved_jobs(&self) -> Result<ApiResponse<Vec<Job>>> {
    self.get_json("users/me/saved-jobs").await
  }

  /// Save or unsave a job; the server decides which.
  pub async fn toggle_saved_job(&self, job_id: u64, patch: &Value) -> Result<ApiResponse<Job>> {
    self.post_json(&format!("jobs/{}/save", job_id), patch).await
  }

  /// Postings owned by an employer.
  pub async fn owned_jobs(&self, employer_id: u64) -> Result<ApiResponse<Vec<Job>>> {
    self.get_json(&format!("employers/{}/jobs", employer_id)).await
  }

  /// The signed-in student's applications.
  pub async fn applications(&self) -> Result<ApiResponse<Vec<Application>>> {
    self.get_json("users/me/applications").await
  }

  /// Submit or withdraw an application; the server decides which.
  pub async fn toggle_application(&self, id: u64, patch: &Value) -> Result<ApiResponse<Application>> {
    self.post_json(&format!("applications/{}/toggle", id), patch).await
  }

  /// Job type lookup table.
  pub async fn job_types(&self) -> Result<Vec<LabelCode>> {
    let response: ApiResponse<Vec<LabelCode>> = self.get_json("lookups/job-types").await?;
    Ok(response.data.unwrap_or_default())
  }

  /// Work mode lookup table.
  pub async fn work_modes(&self) -> Result<Vec<LabelCode>> {
    let response: ApiResponse<Vec<LabelCode>> = self.get_json("lookups/work-modes").await?;
    Ok(response.data.unwrap_or_default())
  }
}

// ============================================================================
// RemoteOps adapters, one per resource
// ============================================================================

/// Active postings: read-only.
pub struct ActiveJobsOps(pub Arc<HttpRemote>);

impl RemoteOps<Job> for ActiveJobsOps {
  fn fetch_all(&self) -> BoxFuture<'_, Result<ApiResponse<Vec<Job>>>> {
    let remote = Arc::clone(&self.0);
    Box::pin(async move { remote.active_jobs().await })
  }
}

/// Saved jobs: save/unsave through one toggle endpoint.
pub struct SavedJobsOps(pub Arc<HttpRemote>);

impl RemoteOps<Job> for SavedJobsOps {
  fn fetch_all(&self) -> BoxFuture<'_, Result<ApiResponse<Vec<Job>>>> {
    let remote = Arc::clone(&self.0);
    Box::pin(async move { remote.saved_jobs().await })
  }

  fn toggle(&self, id: u64, patch: Value) -> BoxFuture<'_, Result<ApiResponse<Job>>> {
    let remote = Arc::clone(&self.0);
    Box::pin(async move { remote.toggle_saved_job(id, &patch).await })
  }
}

/// An employer's own postings: read-only here, managed elsewhere.
pub struct OwnedJobsOps {
  pub remote: Arc<HttpRemote>,
  pub employer_id: u64,
}

impl RemoteOps<Job> for OwnedJobsOps {
  fn fetch_all(&self) -> BoxFuture<'_, Result<ApiResponse<Vec<Job>>>> {
    let remote = Arc::clone(&self.remote);
    let employer_id = self.employer_id;
    Box::pin(async move { remote.owned_jobs(employer_id).await })
  }
}

/// Applications: apply/withdraw through one toggle endpoint. Applying puts
/// the job id in the patch; the id argument names the application to drop
/// when the server reports a withdrawal.
pub struct ApplicationsOps(pub Arc<HttpRemote>);

impl RemoteOps<Application> for ApplicationsOps {
  fn fetch_all(&self) -> BoxFuture<'_, Result<ApiResponse<Vec<Application>>>> {
    let remote = Arc::clone(&self.0);
    Box::pin(async move { remote.applications().await })
  }

  fn toggle(&self, id: u64, patch: Value) -> BoxFuture<'_, Result<ApiResponse<Application>>> {
    let remote = Arc::clone(&self.0);
    Box::pin(async move { remote.toggle_application(id, &patch).await })
  }
}
