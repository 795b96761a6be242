//! Coordinator tests against in-memory fakes of both stores.

use std::{
  collections::BTreeMap,
  path::{Path, PathBuf},
  sync::{
    Arc, Mutex,
    atomic::{AtomicU64, Ordering},
  },
};

use crate::{
  Error, ErrorKind, Result,
  coordinator::{
    CompletionOutcome, DeletionOutcome, PersonCoordinator, RequestCoordinator,
  },
  ledger::{LedgerEntry, RequestLedger},
  person::{Person, PersonInput},
  record::{EntryError, RequestRecord},
  status::Status,
  store::PersonStore,
};

// ─── Fakes ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct MemoryPersons {
  rows: Mutex<Vec<Person>>,
}

impl MemoryPersons {
  fn status_of(&self, oib: &str) -> Option<Status> {
    let rows = self.rows.lock().unwrap();
    rows.iter().rev().find(|p| p.oib == oib).map(|p| p.status)
  }
}

impl PersonStore for MemoryPersons {
  type Error = Error;

  async fn insert(&self, person: Person) -> Result<Person> {
    let mut rows = self.rows.lock().unwrap();
    if rows.iter().any(|p| p.oib == person.oib) {
      return Err(Error::PersonAlreadyExists(person.oib));
    }
    rows.push(person.clone());
    Ok(person)
  }

  async fn find_latest(&self, oib: &str) -> Result<Option<Person>> {
    let rows = self.rows.lock().unwrap();
    Ok(rows.iter().rev().find(|p| p.oib == oib).cloned())
  }

  async fn update_status(&self, oib: &str, status: Status) -> Result<usize> {
    let mut rows = self.rows.lock().unwrap();
    let mut count = 0;
    for row in rows.iter_mut().filter(|p| p.oib == oib) {
      row.status = status;
      count += 1;
    }
    Ok(count)
  }

  async fn delete(&self, oib: &str) -> Result<usize> {
    let mut rows = self.rows.lock().unwrap();
    let before = rows.len();
    rows.retain(|p| p.oib != oib);
    Ok(before - rows.len())
  }
}

/// Keeps encoded entries keyed by a fake path. Reads yield to the scheduler
/// so concurrent callers interleave between the check and the append.
#[derive(Default)]
struct MemoryLedger {
  entries:    Mutex<BTreeMap<PathBuf, String>>,
  clock:      AtomicU64,
  /// Rewrites allowed to succeed before every further rewrite fails.
  /// `None` never fails.
  fail_after: Mutex<Option<usize>>,
}

impl MemoryLedger {
  fn put_raw(&self, name: &str, content: &str) {
    self
      .entries
      .lock()
      .unwrap()
      .insert(PathBuf::from(name), content.to_owned());
  }

  fn fail_after(&self, successes: Option<usize>) {
    *self.fail_after.lock().unwrap() = successes;
  }

  fn statuses(&self, oib: &str) -> Vec<Status> {
    let entries = self.entries.lock().unwrap();
    entries
      .iter()
      .filter(|(path, _)| path.to_string_lossy().starts_with(oib))
      .map(|(_, entry)| RequestRecord::from_entry(entry).unwrap().status)
      .collect()
  }
}

impl RequestLedger for MemoryLedger {
  type Error = Error;

  async fn append(&self, record: &RequestRecord) -> Result<PathBuf> {
    let tick = self.clock.fetch_add(1, Ordering::SeqCst);
    let path = PathBuf::from(format!("{}_{tick:013}.txt", record.oib));
    self
      .entries
      .lock()
      .unwrap()
      .insert(path.clone(), record.to_entry());
    Ok(path)
  }

  async fn rewrite(&self, location: &Path, record: &RequestRecord) -> Result<PathBuf> {
    {
      let mut budget = self.fail_after.lock().unwrap();
      match budget.as_mut() {
        Some(0) => return Err(Error::Ledger("disk full".into())),
        Some(left) => *left -= 1,
        None => {}
      }
    }
    self
      .entries
      .lock()
      .unwrap()
      .insert(location.to_path_buf(), record.to_entry());
    Ok(location.to_path_buf())
  }

  async fn list_locations(&self, oib: &str) -> Result<Vec<PathBuf>> {
    let entries = self.entries.lock().unwrap();
    Ok(
      entries
        .keys()
        .filter(|path| {
          let name = path.to_string_lossy();
          name.starts_with(oib) && name.ends_with(".txt")
        })
        .cloned()
        .collect(),
    )
  }

  async fn load_active(&self, oib: &str) -> Result<Vec<LedgerEntry>> {
    tokio::task::yield_now().await;
    let mut active = Vec::new();
    for location in self.list_locations(oib).await? {
      let raw = self.entries.lock().unwrap()[&location].clone();
      let record = RequestRecord::from_entry(&raw).map_err(|source| {
        Error::InvalidEntry { location: location.clone(), source }
      })?;
      if record.status.is_active() {
        active.push(LedgerEntry { location, record });
      }
    }
    Ok(active)
  }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

const OIB: &str = "12345678907";

struct Fixture {
  persons:  Arc<MemoryPersons>,
  ledger:   Arc<MemoryLedger>,
  requests: RequestCoordinator<MemoryPersons, MemoryLedger>,
  people:   PersonCoordinator<MemoryPersons, MemoryLedger>,
}

fn fixture() -> Fixture {
  let persons = Arc::new(MemoryPersons::default());
  let ledger = Arc::new(MemoryLedger::default());
  let requests = RequestCoordinator::new(Arc::clone(&persons), Arc::clone(&ledger));
  let people = PersonCoordinator::new(Arc::clone(&persons), requests.clone());
  Fixture { persons, ledger, requests, people }
}

fn dorian() -> PersonInput { PersonInput::new(OIB, "Dorian", "Pavetic") }

// ─── Person coordinator ──────────────────────────────────────────────────────

#[tokio::test]
async fn created_person_is_inactive() {
  let f = fixture();
  let mut input = dorian();
  input.status = Some(Status::Active);

  let person = f.people.create_person(input).await.unwrap();
  assert_eq!(person.status, Status::Inactive);
  assert_eq!(f.people.search(OIB).await.unwrap(), Some(person));
}

#[tokio::test]
async fn duplicate_person_is_a_conflict() {
  let f = fixture();
  f.people.create_person(dorian()).await.unwrap();

  let err = f.people.create_person(dorian()).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn search_missing_returns_none() {
  let f = fixture();
  assert!(f.people.search("99999999999").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_touches_nothing() {
  let f = fixture();
  f.ledger.put_raw("99999999999_1.txt", "A B 99999999999 ACTIVE");

  let outcome = f.people.delete("99999999999").await.unwrap();
  assert!(matches!(outcome, DeletionOutcome::NothingToDelete));
  assert_eq!(outcome.to_string(), "nothing to delete");
  assert_eq!(f.ledger.statuses("99999999999"), vec![Status::Active]);
}

#[tokio::test]
async fn delete_cascades_to_active_requests() {
  let f = fixture();
  f.people.create_person(dorian()).await.unwrap();
  f.requests.create_request(dorian()).await.unwrap();

  let outcome = f.people.delete(OIB).await.unwrap();
  assert_eq!(outcome.to_string(), "person deleted: 1");
  let DeletionOutcome::Deleted { deleted, cascade } = outcome else {
    panic!("expected a deletion");
  };
  assert_eq!(deleted, 1);
  assert_eq!(cascade.unwrap(), 1);
  assert_eq!(f.ledger.statuses(OIB), vec![Status::Inactive]);
  assert!(f.people.search(OIB).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_survives_a_failed_cascade() {
  let f = fixture();
  f.people.create_person(dorian()).await.unwrap();
  f.requests.create_request(dorian()).await.unwrap();
  f.ledger.fail_after(Some(0));

  let outcome = f.people.delete(OIB).await.unwrap();
  let DeletionOutcome::Deleted { cascade, .. } = outcome else {
    panic!("expected a deletion");
  };
  assert_eq!(cascade.unwrap_err().kind(), ErrorKind::Internal);
  assert!(f.people.search(OIB).await.unwrap().is_none());
  assert_eq!(f.ledger.statuses(OIB), vec![Status::Active]);
}

// ─── Request coordinator ─────────────────────────────────────────────────────

#[tokio::test]
async fn request_for_unknown_person_is_not_found() {
  let f = fixture();
  let err = f.requests.create_request(dorian()).await.unwrap_err();
  assert!(matches!(err, Error::PersonNotFound(_)));
  assert_eq!(err.kind(), ErrorKind::NotFound);
  assert!(f.ledger.statuses(OIB).is_empty());
}

#[tokio::test]
async fn create_request_activates_person_and_appends_one_entry() {
  let f = fixture();
  f.people.create_person(dorian()).await.unwrap();

  let location = f.requests.create_request(dorian()).await.unwrap();
  assert!(location.to_string_lossy().starts_with(OIB));
  assert_eq!(f.persons.status_of(OIB), Some(Status::Active));
  assert!(f.ledger.has_active(OIB).await.unwrap());
  assert_eq!(f.ledger.statuses(OIB), vec![Status::Active]);
}

#[tokio::test]
async fn second_request_conflicts_and_leaves_person_active() {
  let f = fixture();
  f.people.create_person(dorian()).await.unwrap();
  f.requests.create_request(dorian()).await.unwrap();
  f.requests.complete_request(OIB).await.unwrap();
  f.requests.create_request(dorian()).await.unwrap();

  let err = f.requests.create_request(dorian()).await.unwrap_err();
  assert!(matches!(err, Error::ActiveRequestExists(_)));
  assert_eq!(err.kind(), ErrorKind::Conflict);
  assert_eq!(f.persons.status_of(OIB), Some(Status::Active));
  assert_eq!(
    f.ledger.statuses(OIB),
    vec![Status::Inactive, Status::Active]
  );
}

#[tokio::test]
async fn concurrent_requests_yield_a_single_active_entry() {
  let f = fixture();
  f.people.create_person(dorian()).await.unwrap();

  let (a, b) = tokio::join!(
    f.requests.create_request(dorian()),
    f.requests.create_request(dorian()),
  );
  assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
  assert_eq!(f.ledger.statuses(OIB), vec![Status::Active]);
}

#[tokio::test]
async fn complete_deactivates_every_active_entry() {
  let f = fixture();
  f.people.create_person(dorian()).await.unwrap();
  f.ledger.put_raw(&format!("{OIB}_1.txt"), "Dorian Pavetic 12345678907 ACTIVE");
  f.ledger.put_raw(&format!("{OIB}_2.txt"), "Dorian Pavetic 12345678907 INACTIVE");
  f.ledger.put_raw(&format!("{OIB}_3.txt"), "Dorian Pavetic 12345678907 ACTIVE");

  let outcome = f.requests.complete_request(OIB).await.unwrap();
  assert_eq!(outcome, CompletionOutcome::Completed(2));
  assert_eq!(outcome.to_string(), "completed: 2");
  assert_eq!(f.ledger.statuses(OIB), vec![Status::Inactive; 3]);
  assert_eq!(f.persons.status_of(OIB), Some(Status::Inactive));
}

#[tokio::test]
async fn complete_without_active_requests_still_succeeds() {
  let f = fixture();
  f.people.create_person(dorian()).await.unwrap();

  let outcome = f.requests.complete_request(OIB).await.unwrap();
  assert_eq!(outcome, CompletionOutcome::NothingToComplete);
  assert_eq!(outcome.to_string(), "no active requests to complete");
}

#[tokio::test]
async fn complete_for_unknown_person_is_not_found() {
  let f = fixture();
  let err = f.requests.complete_request(OIB).await.unwrap_err();
  assert!(matches!(err, Error::PersonNotFoundForCompletion(_)));
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn malformed_entry_blocks_request_creation() {
  let f = fixture();
  f.people.create_person(dorian()).await.unwrap();
  f.ledger.put_raw(&format!("{OIB}_1.txt"), "a b c d e");

  let err = f.requests.create_request(dorian()).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Internal);
  assert!(matches!(
    err,
    Error::InvalidEntry { source: EntryError::Malformed { fields: 5 }, .. }
  ));
  assert!(err.to_string().contains("malformed entry"));
}

#[tokio::test]
async fn deactivate_reports_count() {
  let f = fixture();
  assert_eq!(f.requests.deactivate_all_active(OIB).await.unwrap(), 0);

  f.ledger.put_raw(&format!("{OIB}_1.txt"), "Dorian Pavetic 12345678907 ACTIVE");
  assert_eq!(f.requests.deactivate_all_active(OIB).await.unwrap(), 1);
  assert_eq!(f.requests.deactivate_all_active(OIB).await.unwrap(), 0);
  assert!(!f.ledger.has_active(OIB).await.unwrap());
}

#[tokio::test]
async fn failed_rewrite_stops_deactivation_midway() {
  let f = fixture();
  f.people.create_person(dorian()).await.unwrap();
  for n in 1..=3 {
    f.ledger.put_raw(
      &format!("{OIB}_{n}.txt"),
      "Dorian Pavetic 12345678907 ACTIVE",
    );
  }
  f.ledger.fail_after(Some(1));

  let err = f.requests.deactivate_all_active(OIB).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Internal);
  assert_eq!(
    f.ledger.statuses(OIB),
    vec![Status::Inactive, Status::Active, Status::Active]
  );

  // The subject is released on the error path, so a retry can proceed.
  f.ledger.fail_after(None);
  let retried = tokio::time::timeout(
    std::time::Duration::from_secs(1),
    f.requests.deactivate_all_active(OIB),
  )
  .await
  .expect("subject lock still held after a failed rewrite");
  assert_eq!(retried.unwrap(), 2);
  assert_eq!(f.ledger.statuses(OIB), vec![Status::Inactive; 3]);

  f.requests.create_request(dorian()).await.unwrap();
}

#[tokio::test]
async fn end_to_end_request_lifecycle() {
  let f = fixture();
  let person = f.people.create_person(dorian()).await.unwrap();
  assert_eq!(person.status, Status::Inactive);

  f.requests.create_request(dorian()).await.unwrap();
  assert_eq!(f.persons.status_of(OIB), Some(Status::Active));
  assert_eq!(f.ledger.statuses(OIB), vec![Status::Active]);

  let err = f.requests.create_request(dorian()).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Conflict);
  assert_eq!(f.persons.status_of(OIB), Some(Status::Active));

  let outcome = f.requests.complete_request(OIB).await.unwrap();
  assert_eq!(outcome.to_string(), "completed: 1");
  assert_eq!(f.persons.status_of(OIB), Some(Status::Inactive));
  assert_eq!(f.ledger.statuses(OIB), vec![Status::Inactive]);
}
