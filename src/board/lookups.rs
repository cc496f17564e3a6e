//! Label/code lookup tables for enumerated job fields.

use color_eyre::Result;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use crate::cache::{CachedFetcher, ResourceKey};
use crate::store::KeyValueStore;

use super::keys::BoardSlot;
use super::types::LabelCode;

/// Label → code tables for job types and work modes.
///
/// Labels compare case-insensitively. An unknown label resolves to `None`,
/// which filtering treats as "no constraint" rather than matching nothing.
#[derive(Debug, Clone, Default)]
pub struct LabelCodes {
  job_types: HashMap<String, i64>,
  work_modes: HashMap<String, i64>,
}

impl LabelCodes {
  pub fn new(
    job_types: impl IntoIterator<Item = LabelCode>,
    work_modes: impl IntoIterator<Item = LabelCode>,
  ) -> Self {
    Self {
      job_types: index(job_types),
      work_modes: index(work_modes),
    }
  }

  /// Code for a job type label, if the label is known.
  pub fn job_type(&self, label: &str) -> Option<i64> {
    self.job_types.get(&label.to_lowercase()).copied()
  }

  /// Code for a work mode label, if the label is known.
  pub fn work_mode(&self, label: &str) -> Option<i64> {
    self.work_modes.get(&label.to_lowercase()).copied()
  }
}

fn index(rows: impl IntoIterator<Item = LabelCode>) -> HashMap<String, i64> {
  rows
    .into_iter()
    .map(|row| (row.label.to_lowercase(), row.code))
    .collect()
}

/// Load both lookup tables, each cached once per session.
///
/// The fetchers come from the surrounding application (reference data is a
/// collaborator, not something this crate owns); only the caching is ours.
pub async fn load_label_codes<F, Fut, G, Gut>(
  store: Arc<dyn KeyValueStore>,
  fetch_job_types: F,
  fetch_work_modes: G,
) -> Result<LabelCodes>
where
  F: Fn() -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<Vec<LabelCode>>> + Send + 'static,
  G: Fn() -> Gut + Send + Sync + 'static,
  Gut: Future<Output = Result<Vec<LabelCode>>> + Send + 'static,
{
  let job_types = CachedFetcher::new(
    BoardSlot::JobTypes.slot_name(),
    Arc::clone(&store),
    fetch_job_types,
  );
  let work_modes = CachedFetcher::new(BoardSlot::WorkModes.slot_name(), store, fetch_work_modes);

  Ok(LabelCodes::new(
    job_types.run().await?,
    work_modes.run().await?,
  ))
}
