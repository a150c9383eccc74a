//! End-to-end pipeline scenarios over fake port implementations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use casegen::commands::generate::synthesize_for_ticket;
use casegen::error::{Error, RemoteError};
use casegen::ports::repository::{
    CaseUpload, FolderFuture, FolderId, TestRepository, UploadFuture,
};
use casegen::ports::tracker::{TicketFuture, TicketSource};
use casegen::publish::publish_cases;
use casegen::requirements::extract;
use casegen::retry::RetryPolicy;
use casegen::testcase::{synthesize, TestCase};
use casegen::ticket::{fetch_ticket, Ticket};

/// Ticket source that records the keys it was asked for and replays a
/// scripted sequence of outcomes.
struct ScriptedTickets {
    keys: Mutex<Vec<String>>,
    outcomes: Mutex<Vec<Result<Ticket, Error>>>,
}

impl ScriptedTickets {
    fn new(outcomes: Vec<Result<Ticket, Error>>) -> Self {
        Self { keys: Mutex::new(Vec::new()), outcomes: Mutex::new(outcomes) }
    }

    fn single(ticket: Ticket) -> Self {
        Self::new(vec![Ok(ticket)])
    }

    fn recorded_keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

impl TicketSource for ScriptedTickets {
    fn fetch(&self, key: &str) -> TicketFuture<'_> {
        self.keys.lock().unwrap().push(key.to_string());
        let outcome = {
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.is_empty() {
                Err(Error::Transport("script exhausted".into()))
            } else {
                outcomes.remove(0)
            }
        };
        Box::pin(async move { outcome })
    }
}

/// Repository that records uploads and fails the configured 1-based
/// submission indexes.
struct ScriptedRepository {
    folder: Result<FolderId, Error>,
    failing_uploads: Vec<usize>,
    uploads: Mutex<Vec<CaseUpload>>,
    upload_calls: AtomicUsize,
}

impl ScriptedRepository {
    fn new(folder: Result<FolderId, Error>) -> Self {
        Self {
            folder,
            failing_uploads: Vec::new(),
            uploads: Mutex::new(Vec::new()),
            upload_calls: AtomicUsize::new(0),
        }
    }

    fn failing(folder: FolderId, failing_uploads: Vec<usize>) -> Self {
        Self { failing_uploads, ..Self::new(Ok(folder)) }
    }
}

impl TestRepository for ScriptedRepository {
    fn create_folder(&self, _name: &str) -> FolderFuture<'_> {
        let outcome = self.folder.clone();
        Box::pin(async move { outcome })
    }

    fn create_case(&self, upload: &CaseUpload) -> UploadFuture<'_> {
        let call = self.upload_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.uploads.lock().unwrap().push(upload.clone());
        let fails = self.failing_uploads.contains(&call);
        Box::pin(async move {
            if fails {
                Err(Error::RemoteValidation(RemoteError::from_response(400, "rejected")))
            } else {
                Ok(())
            }
        })
    }
}

fn ticket(description: &str) -> Ticket {
    Ticket { key: "PROJ-1".into(), summary: "Login epic".into(), description: description.into() }
}

fn cases_from(description: &str) -> Vec<TestCase> {
    synthesize(&extract(description))
}

#[tokio::test]
async fn scenario_a_two_requirements_become_two_cases() {
    let source = ScriptedTickets::single(ticket("Verify that login succeeds\n* Should show dashboard"));
    let (fetched, cases) = synthesize_for_ticket(&source, "PROJ-1").await.unwrap();

    assert_eq!(fetched.key, "PROJ-1");
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].id, "TC_001");
    assert_eq!(cases[0].steps[2], "Perform that login succeeds");
    assert_eq!(cases[1].id, "TC_002");
    assert_eq!(cases[1].steps[2], "Perform show dashboard");
}

#[tokio::test]
async fn retriever_uses_the_trimmed_ticket_key() {
    let source = ScriptedTickets::single(ticket("Verify login"));
    let fetched = fetch_ticket(&source, "  PROJ-1  ", &RetryPolicy::default()).await.unwrap();
    assert_eq!(fetched.key, "PROJ-1");
    assert_eq!(source.recorded_keys(), vec!["PROJ-1"]);
}

#[tokio::test(start_paused = true)]
async fn retriever_makes_three_attempts_then_propagates() {
    let source = ScriptedTickets::new(vec![
        Err(Error::Transport("reset".into())),
        Err(Error::Transport("reset".into())),
        Err(Error::Transport("reset".into())),
    ]);
    let start = tokio::time::Instant::now();

    let result = fetch_ticket(&source, "PROJ-1", &RetryPolicy::default()).await;

    assert!(matches!(result, Err(Error::Transport(_))));
    assert_eq!(source.recorded_keys().len(), 3);
    // A 2 s wait preceded attempt 2 and attempt 3.
    assert_eq!(start.elapsed(), Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn retriever_recovers_on_a_later_attempt() {
    let source = ScriptedTickets::new(vec![
        Err(Error::Transport("timeout".into())),
        Ok(ticket("Verify login")),
    ]);

    let fetched = fetch_ticket(&source, "PROJ-1", &RetryPolicy::default()).await.unwrap();
    assert_eq!(fetched.summary, "Login epic");
    assert_eq!(source.recorded_keys().len(), 2);
}

#[tokio::test]
async fn not_found_is_terminal_and_never_retried() {
    let source = ScriptedTickets::new(vec![Err(Error::NotFound { key: "PROJ-404".into() })]);
    let result = fetch_ticket(&source, "PROJ-404", &RetryPolicy::default()).await;
    assert!(matches!(result, Err(Error::NotFound { .. })));
    assert_eq!(source.recorded_keys().len(), 1);
}

#[tokio::test]
async fn scenario_b_folder_failure_aborts_before_any_upload() {
    let repo = ScriptedRepository::new(Err(Error::RemoteValidation(RemoteError::from_response(
        500,
        "server error",
    ))));
    let cases = cases_from("Verify login works\nVerify logout works");

    let result = publish_cases(&repo, &cases, "PROJ-1").await;

    match result {
        Err(Error::RemoteValidation(remote)) => assert_eq!(remote.status, 500),
        other => panic!("expected fatal remote validation error, got {other:?}"),
    }
    assert!(repo.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn scenario_c_item_failure_does_not_abort_siblings() {
    // Seven cases span two chunks (five and two); the third upload fails.
    let description = (1..=7)
        .map(|n| format!("Verify requirement number {n}"))
        .collect::<Vec<_>>()
        .join("\n");
    let cases = cases_from(&description);
    assert_eq!(cases.len(), 7);

    let repo = ScriptedRepository::failing(FolderId(42), vec![3]);
    let report = publish_cases(&repo, &cases, "PROJ-1").await.unwrap();

    assert_eq!(report.success_count, 6);
    assert_eq!(report.failed_count, 1);
    assert!(report.succeeded());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].case_id, "TC_003");
    // Every case was still submitted, in order.
    let uploads = repo.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 7);
    assert!(uploads.iter().all(|upload| upload.folder_id == "42"));
}

#[tokio::test]
async fn counters_always_account_for_every_submitted_case() {
    let cases = cases_from("Verify one\nVerify two\nVerify three");
    let repo = ScriptedRepository::failing(FolderId(7), vec![1, 2, 3]);

    let report = publish_cases(&repo, &cases, "PROJ-1").await.unwrap();

    assert_eq!(report.success_count + report.failed_count, cases.len());
    assert_eq!(report.success_count, 0);
    assert!(!report.succeeded());
}

#[tokio::test]
async fn auth_failure_during_folder_resolution_is_fatal() {
    let repo = ScriptedRepository::new(Err(Error::Authentication {
        detail: "auth probe rejected with status 401".into(),
    }));
    let cases = cases_from("Verify login works");

    let result = publish_cases(&repo, &cases, "PROJ-1").await;
    assert!(matches!(result, Err(Error::Authentication { .. })));
    assert!(repo.uploads.lock().unwrap().is_empty());
}
