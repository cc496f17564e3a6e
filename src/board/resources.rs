//! The specialized resources behind the portal views.

use color_eyre::Result;
use serde_json::Value;
use std::sync::Arc;

use crate::remote::RemoteOps;
use crate::resource::{ListResource, ToggleOutcome};
use crate::store::KeyValueStore;
use crate::view::{paginate, Page};

use super::client::{ActiveJobsOps, ApplicationsOps, HttpRemote, OwnedJobsOps, SavedJobsOps};
use super::filter::{filter_jobs, FilterCriteria};
use super::keys::BoardSlot;
use super::lookups::LabelCodes;
use super::types::{Application, Job};

/// Who the portal is signed in as; scopes the per-user cache slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSession {
  pub user_id: u64,
  /// Set for employer portals; student and school portals have no owned
  /// postings
  pub employer_id: Option<u64>,
}

impl BoardSession {
  pub fn student(user_id: u64) -> Self {
    Self {
      user_id,
      employer_id: None,
    }
  }

  pub fn employer(user_id: u64, employer_id: u64) -> Self {
    Self {
      user_id,
      employer_id: Some(employer_id),
    }
  }
}

/// Remote implementations for each collection, injected at construction.
pub struct BoardRemotes {
  pub jobs: Arc<dyn RemoteOps<Job>>,
  pub saved: Arc<dyn RemoteOps<Job>>,
  pub applications: Arc<dyn RemoteOps<Application>>,
  /// Present only when the session has an employer side
  pub owned: Option<Arc<dyn RemoteOps<Job>>>,
}

impl BoardRemotes {
  /// Bind every collection to the HTTP client.
  pub fn http(remote: Arc<HttpRemote>, session: &BoardSession) -> Self {
    Self {
      jobs: Arc::new(ActiveJobsOps(Arc::clone(&remote))),
      saved: Arc::new(SavedJobsOps(Arc::clone(&remote))),
      applications: Arc::new(ApplicationsOps(Arc::clone(&remote))),
      owned: session.employer_id.map(|employer_id| {
        Arc::new(OwnedJobsOps {
          remote: Arc::clone(&remote),
          employer_id,
        }) as Arc<dyn RemoteOps<Job>>
      }),
    }
  }
}

/// The synchronized collections behind the portal views.
///
/// Construction injects the session store and the remote implementations,
/// so the whole facade is constructible in tests without a network or a
/// browser-like host. Each resource is the sole writer of its own slot.
pub struct JobBoard {
  /// All active postings (read-only, filterable)
  pub jobs: ListResource<Job>,
  /// The student's saved jobs (save/unsave toggle)
  pub saved: ListResource<Job>,
  /// The student's applications (apply/withdraw toggle)
  pub applications: ListResource<Application>,
  /// The employer's own postings, when the session has an employer side
  pub owned: Option<ListResource<Job>>,
}

impl JobBoard {
  pub fn new(
    session: BoardSession,
    store: Arc<dyn KeyValueStore>,
    remotes: BoardRemotes,
  ) -> Self {
    let owned = match (session.employer_id, remotes.owned) {
      (Some(employer_id), Some(ops)) => Some(ListResource::new(
        &BoardSlot::OwnedJobs { employer_id },
        Arc::clone(&store),
        ops,
      )),
      _ => None,
    };

    Self {
      jobs: ListResource::new(&BoardSlot::ActiveJobs, Arc::clone(&store), remotes.jobs),
      saved: ListResource::new(
        &BoardSlot::SavedJobs {
          user_id: session.user_id,
        },
        Arc::clone(&store),
        remotes.saved,
      ),
      applications: ListResource::new(
        &BoardSlot::Applications {
          user_id: session.user_id,
        },
        store,
        remotes.applications,
      ),
      owned,
    }
  }

  /// Whether the student has saved this job.
  pub fn is_saved(&self, job_id: u64) -> bool {
    self.saved.contains(&job_id)
  }

  /// Whether the student has applied to this job.
  ///
  /// A pure projection over the applications list, derived on every call so
  /// the two can't drift apart.
  pub fn has_applied(&self, job_id: u64) -> bool {
    self
      .applications
      .items()
      .iter()
      .any(|application| application.job_id == job_id)
  }

  /// Save or unsave a job; the server decides which.
  pub async fn toggle_saved(&self, job_id: u64, patch: Value) -> Result<ToggleOutcome<Job>> {
    self.saved.toggle(job_id, patch).await
  }

  /// Submit or withdraw an application. Applying carries the job id in the
  /// patch; `application_id` names the entity dropped on a withdrawal.
  pub async fn toggle_application(
    &self,
    application_id: u64,
    patch: Value,
  ) -> Result<ToggleOutcome<Application>> {
    self.applications.toggle(application_id, patch).await
  }

  /// Active jobs passing the criteria, in source order.
  pub fn filtered_jobs(&self, criteria: &FilterCriteria, codes: &LabelCodes) -> Vec<Job> {
    let items = self.jobs.items();
    filter_jobs(&items, criteria, codes)
      .into_iter()
      .cloned()
      .collect()
  }

  /// One page of the active jobs after filtering.
  pub fn jobs_page(
    &self,
    criteria: &FilterCriteria,
    codes: &LabelCodes,
    page: usize,
    page_size: usize,
  ) -> Page<Job> {
    paginate(&self.filtered_jobs(criteria, codes), page, page_size)
  }

  /// One page of the employer's own postings after filtering. `None` when
  /// the session has no employer side.
  pub fn owned_page(
    &self,
    criteria: &FilterCriteria,
    codes: &LabelCodes,
    page: usize,
    page_size: usize,
  ) -> Option<Page<Job>> {
    let owned = self.owned.as_ref()?;
    let items = owned.items();
    let filtered: Vec<Job> = filter_jobs(&items, criteria, codes)
      .into_iter()
      .cloned()
      .collect();
    Some(paginate(&filtered, page, page_size))
  }

  /// Clear every slot this session owns. The logout path: the next mount of
  /// any view refetches from the remote.
  pub fn invalidate_all(&self) {
    self.jobs.invalidate();
    self.saved.invalidate();
    self.applications.invalidate();
    if let Some(owned) = &self.owned {
      owned.invalidate();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::remote::ApiResponse;
  use crate::store::MemoryStore;
  use futures::future::BoxFuture;
  use std::sync::Mutex;

  fn job(id: u64, title: &str) -> Job {
    Job {
      id,
      title: title.to_string(),
      description: String::new(),
      company: "Acme".to_string(),
      category: None,
      industry: None,
      location: None,
      job_type: None,
      work_mode: None,
      keywords: Vec::new(),
      posted_at: None,
      deadline: None,
    }
  }

  fn application(id: u64, job_id: u64) -> Application {
    Application {
      id,
      job_id,
      status: Default::default(),
      applied_at: None,
    }
  }

  /// Fixed-list remote for read paths, scripted toggles for write paths.
  struct ScriptedRemote<T> {
    items: Vec<T>,
    toggles: Mutex<Vec<ApiResponse<T>>>,
  }

  impl<T> ScriptedRemote<T> {
    fn new(items: Vec<T>) -> Self {
      Self {
        items,
        toggles: Mutex::new(Vec::new()),
      }
    }

    fn with_toggles(items: Vec<T>, toggles: Vec<ApiResponse<T>>) -> Self {
      Self {
        items,
        toggles: Mutex::new(toggles),
      }
    }
  }

  impl<T: crate::resource::Entity> RemoteOps<T> for ScriptedRemote<T> {
    fn fetch_all(&self) -> BoxFuture<'_, Result<ApiResponse<Vec<T>>>> {
      let items = self.items.clone();
      Box::pin(async move { Ok(ApiResponse::ok(items)) })
    }

    fn toggle(&self, _id: T::Id, _patch: Value) -> BoxFuture<'_, Result<ApiResponse<T>>> {
      let response = self.toggles.lock().unwrap().remove(0);
      Box::pin(async move { Ok(response) })
    }
  }

  fn board(
    jobs: Vec<Job>,
    saved: ScriptedRemote<Job>,
    applications: Vec<Application>,
  ) -> JobBoard {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let remotes = BoardRemotes {
      jobs: Arc::new(ScriptedRemote::new(jobs)),
      saved: Arc::new(saved),
      applications: Arc::new(ScriptedRemote::new(applications)),
      owned: None,
    };
    JobBoard::new(BoardSession::student(7), store, remotes)
  }

  #[tokio::test]
  async fn test_is_saved_follows_the_saved_list() {
    let saved = ScriptedRemote::with_toggles(
      vec![job(1, "Saved already")],
      vec![ApiResponse::ok(job(2, "Newly saved")), ApiResponse::removed()],
    );
    let board = board(Vec::new(), saved, Vec::new());
    board.saved.refetch().await.unwrap();

    assert!(board.is_saved(1));
    assert!(!board.is_saved(2));

    board.toggle_saved(2, Value::Null).await.unwrap();
    assert!(board.is_saved(2));

    board.toggle_saved(2, Value::Null).await.unwrap();
    assert!(!board.is_saved(2));
  }

  #[tokio::test]
  async fn test_has_applied_is_a_projection_over_applications() {
    let board = board(
      Vec::new(),
      ScriptedRemote::new(Vec::new()),
      vec![application(100, 1), application(101, 3)],
    );
    board.applications.refetch().await.unwrap();

    assert!(board.has_applied(1));
    assert!(board.has_applied(3));
    assert!(!board.has_applied(2));
  }

  #[tokio::test]
  async fn test_jobs_page_filters_then_slices() {
    let mut jobs = Vec::new();
    for id in 1..=12 {
      let mut j = job(id, "Engineering Intern");
      j.work_mode = Some(if id <= 8 { 2 } else { 1 });
      jobs.push(j);
    }

    let board = board(jobs, ScriptedRemote::new(Vec::new()), Vec::new());
    board.jobs.refetch().await.unwrap();

    let codes = LabelCodes::new(
      Vec::new(),
      vec![crate::board::types::LabelCode {
        code: 2,
        label: "Remote".to_string(),
      }],
    );
    let criteria = FilterCriteria {
      work_mode: Some("Remote".to_string()),
      ..Default::default()
    };

    let page = board.jobs_page(&criteria, &codes, 2, 5);
    assert_eq!(page.page_number, 2);
    // 8 remote jobs: page 2 of size 5 holds the last 3
    assert_eq!(
      page.items.iter().map(|j| j.id).collect::<Vec<_>>(),
      vec![6, 7, 8]
    );
  }

  #[tokio::test]
  async fn test_student_sessions_have_no_owned_resource() {
    let board = board(Vec::new(), ScriptedRemote::new(Vec::new()), Vec::new());
    assert!(board.owned.is_none());
    assert!(board
      .owned_page(&FilterCriteria::default(), &LabelCodes::default(), 1, 10)
      .is_none());
  }

  #[tokio::test]
  async fn test_invalidate_all_forces_refetch() {
    let board = board(vec![job(1, "Only")], ScriptedRemote::new(Vec::new()), Vec::new());
    board.jobs.refetch().await.unwrap();
    assert_eq!(board.jobs.items().len(), 1);

    board.invalidate_all();

    // The in-memory state survives until the next mount refetches
    assert_eq!(board.jobs.items().len(), 1);
    board.jobs.refetch().await.unwrap();
    assert_eq!(board.jobs.items().len(), 1);
  }
}
