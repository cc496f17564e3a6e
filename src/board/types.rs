//! Domain types for the job board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::Entity;

/// A job posting as the list views consume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
  pub id: u64,
  pub title: String,
  #[serde(default)]
  pub description: String,
  /// Organization offering the position
  pub company: String,
  #[serde(default)]
  pub category: Option<String>,
  #[serde(default)]
  pub industry: Option<String>,
  #[serde(default)]
  pub location: Option<String>,
  /// Job type code, resolved against the job-type lookup table
  #[serde(default)]
  pub job_type: Option<i64>,
  /// Work mode code (on-site/remote/hybrid), resolved against the work-mode
  /// lookup table
  #[serde(default)]
  pub work_mode: Option<i64>,
  #[serde(default)]
  pub keywords: Vec<String>,
  #[serde(default)]
  pub posted_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub deadline: Option<DateTime<Utc>>,
}

impl Entity for Job {
  type Id = u64;

  fn id(&self) -> u64 {
    self.id
  }
}

/// Application status as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
  #[default]
  Pending,
  Reviewed,
  Accepted,
  Rejected,
}

/// A student's application to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
  pub id: u64,
  pub job_id: u64,
  #[serde(default)]
  pub status: ApplicationStatus,
  #[serde(default)]
  pub applied_at: Option<DateTime<Utc>>,
}

impl Entity for Application {
  type Id = u64;

  fn id(&self) -> u64 {
    self.id
  }
}

/// One row of a label/code lookup table (job types, work modes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCode {
  pub code: i64,
  pub label: String,
}
