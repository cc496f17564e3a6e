//! Filtering for job collections.

use super::lookups::LabelCodes;
use super::types::Job;

/// Filter criteria for job list views.
///
/// Every dimension is optional; a value that is absent or still reading as
/// an "All …"/"Any …" placeholder applies no constraint. Filtering is a
/// pure conjunction of the per-dimension predicates and preserves source
/// order, so the same inputs always derive the same view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
  /// Free-text search across title, description, company, industry,
  /// location, and keywords
  pub search: Option<String>,
  pub category: Option<String>,
  /// Job type label, resolved to a code through the lookup table
  pub job_type: Option<String>,
  /// Work mode label, resolved to a code through the lookup table
  pub work_mode: Option<String>,
  pub industry: Option<String>,
  pub location: Option<String>,
}

impl FilterCriteria {
  /// A criterion constrains only when set, non-empty, and not a placeholder.
  fn constraint(value: &Option<String>) -> Option<&str> {
    let value = value.as_deref()?.trim();
    if value.is_empty() || is_placeholder(value) {
      None
    } else {
      Some(value)
    }
  }
}

/// "All categories", "Any location" and friends select nothing.
fn is_placeholder(value: &str) -> bool {
  let lower = value.to_lowercase();
  lower == "all" || lower == "any" || lower.starts_with("all ") || lower.starts_with("any ")
}

/// Apply the criteria to a collection, preserving order.
pub fn filter_jobs<'a>(
  items: &'a [Job],
  criteria: &FilterCriteria,
  codes: &LabelCodes,
) -> Vec<&'a Job> {
  items
    .iter()
    .filter(|job| matches(job, criteria, codes))
    .collect()
}

fn matches(job: &Job, criteria: &FilterCriteria, codes: &LabelCodes) -> bool {
  if let Some(query) = FilterCriteria::constraint(&criteria.search) {
    if !matches_search(job, query) {
      return false;
    }
  }

  if let Some(category) = FilterCriteria::constraint(&criteria.category) {
    if !eq_ignore_case(job.category.as_deref(), category) {
      return false;
    }
  }

  // Enumerated labels resolve through the lookup table. An unmapped label
  // applies no constraint instead of excluding everything.
  if let Some(label) = FilterCriteria::constraint(&criteria.job_type) {
    if let Some(code) = codes.job_type(label) {
      if job.job_type != Some(code) {
        return false;
      }
    }
  }

  if let Some(label) = FilterCriteria::constraint(&criteria.work_mode) {
    if let Some(code) = codes.work_mode(label) {
      if job.work_mode != Some(code) {
        return false;
      }
    }
  }

  if let Some(industry) = FilterCriteria::constraint(&criteria.industry) {
    if !eq_ignore_case(job.industry.as_deref(), industry) {
      return false;
    }
  }

  if let Some(location) = FilterCriteria::constraint(&criteria.location) {
    if !eq_ignore_case(job.location.as_deref(), location) {
      return false;
    }
  }

  true
}

/// Case-insensitive substring match over the job's searchable text: not
/// tokenized, not ranked.
fn matches_search(job: &Job, query: &str) -> bool {
  let mut fields: Vec<&str> = vec![&job.title, &job.description, &job.company];
  fields.extend(job.industry.as_deref());
  fields.extend(job.location.as_deref());
  fields.extend(job.keywords.iter().map(|k| k.as_str()));

  let haystack = fields.join(" ").to_lowercase();
  haystack.contains(&query.to_lowercase())
}

fn eq_ignore_case(value: Option<&str>, expected: &str) -> bool {
  value.is_some_and(|v| v.eq_ignore_ascii_case(expected))
}
