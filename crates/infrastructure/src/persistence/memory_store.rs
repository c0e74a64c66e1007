//! In-memory practice store
//!
//! Implements every repository port over `parking_lot::RwLock`-guarded maps.
//! Used by tests and by `database.backend = "memory"`. Unique keys (ids, bar
//! numbers, emails, case numbers) are enforced like the SQLite schema does;
//! references between records are left to the services.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{
        AttorneyRepository, CaseFilter, CaseRepository, ClientRepository, CourtRepository,
        DatabaseHealth, DatabaseHealthPort, DeadlineRepository, DocumentRepository,
        JudgeRepository,
    },
};
use async_trait::async_trait;
use domain::{
    Attorney, AttorneyId, BarNumber, Case, CaseId, CaseNumber, Client, ClientId, Court, CourtId,
    Deadline, DeadlineId, Document, DocumentId, EmailAddress, Judge, JudgeId,
};
use parking_lot::RwLock;
use tracing::debug;

/// One table: rows keyed by id, remembering insertion order
#[derive(Debug)]
struct Table<K, V> {
    rows: HashMap<K, (u64, V)>,
    next_seq: u64,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<K, V> Table<K, V>
where
    K: Eq + Hash + Copy + std::fmt::Display,
    V: Clone,
{
    fn insert(&mut self, entity: &str, id: K, value: V) -> Result<(), ApplicationError> {
        if self.rows.contains_key(&id) {
            return Err(ApplicationError::Conflict(format!("{entity} {id} already exists")));
        }
        self.rows.insert(id, (self.next_seq, value));
        self.next_seq += 1;
        Ok(())
    }

    fn update(&mut self, entity: &str, id: K, value: V) -> Result<(), ApplicationError> {
        match self.rows.get_mut(&id) {
            Some((_, row)) => {
                *row = value;
                Ok(())
            },
            None => Err(ApplicationError::not_found(entity, id)),
        }
    }

    fn get(&self, id: &K) -> Option<V> {
        self.rows.get(id).map(|(_, v)| v.clone())
    }

    fn remove(&mut self, entity: &str, id: &K) -> Result<(), ApplicationError> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ApplicationError::not_found(entity, id))
    }

    /// Rows matching `keep`, in insertion order
    fn select(&self, keep: impl Fn(&V) -> bool) -> Vec<V> {
        let mut rows: Vec<_> = self.rows.values().filter(|(_, v)| keep(v)).collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows.into_iter().map(|(_, v)| v.clone()).collect()
    }

    fn find(&self, matches: impl Fn(&V) -> bool) -> Option<V> {
        self.rows.values().map(|(_, v)| v).find(|v| matches(*v)).cloned()
    }

    fn any_other(&self, id: &K, matches: impl Fn(&V) -> bool) -> bool {
        self.rows.iter().any(|(k, (_, v))| k != id && matches(v))
    }

    fn retain(&mut self, keep: impl Fn(&V) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|_, (_, v)| keep(v));
        before - self.rows.len()
    }
}

/// Practice store kept in process memory
#[derive(Debug, Default, Clone)]
pub struct InMemoryPracticeStore {
    attorneys: Arc<RwLock<Table<AttorneyId, Attorney>>>,
    judges: Arc<RwLock<Table<JudgeId, Judge>>>,
    clients: Arc<RwLock<Table<ClientId, Client>>>,
    courts: Arc<RwLock<Table<CourtId, Court>>>,
    cases: Arc<RwLock<Table<CaseId, Case>>>,
    deadlines: Arc<RwLock<Table<DeadlineId, Deadline>>>,
    documents: Arc<RwLock<Table<DocumentId, Document>>>,
}

impl InMemoryPracticeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate(what: &str, value: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::Conflict(format!("{what} '{value}' is already in use"))
}

#[async_trait]
impl AttorneyRepository for InMemoryPracticeStore {
    async fn insert(&self, attorney: &Attorney) -> Result<(), ApplicationError> {
        let mut table = self.attorneys.write();
        if table.any_other(&attorney.id, |a| a.bar_number == attorney.bar_number) {
            return Err(duplicate("Bar number", &attorney.bar_number));
        }
        if table.any_other(&attorney.id, |a| a.email == attorney.email) {
            return Err(duplicate("Email", &attorney.email));
        }
        table.insert("Attorney", attorney.id, attorney.clone())
    }

    async fn update(&self, attorney: &Attorney) -> Result<(), ApplicationError> {
        let mut table = self.attorneys.write();
        if table.any_other(&attorney.id, |a| a.bar_number == attorney.bar_number) {
            return Err(duplicate("Bar number", &attorney.bar_number));
        }
        if table.any_other(&attorney.id, |a| a.email == attorney.email) {
            return Err(duplicate("Email", &attorney.email));
        }
        table.update("Attorney", attorney.id, attorney.clone())
    }

    async fn get(&self, id: &AttorneyId) -> Result<Option<Attorney>, ApplicationError> {
        Ok(self.attorneys.read().get(id))
    }

    async fn list(&self) -> Result<Vec<Attorney>, ApplicationError> {
        Ok(self.attorneys.read().select(|_| true))
    }

    async fn delete(&self, id: &AttorneyId) -> Result<(), ApplicationError> {
        self.attorneys.write().remove("Attorney", id)
    }

    async fn find_by_bar_number(
        &self,
        bar_number: &BarNumber,
    ) -> Result<Option<Attorney>, ApplicationError> {
        Ok(self.attorneys.read().find(|a| &a.bar_number == bar_number))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Attorney>, ApplicationError> {
        Ok(self.attorneys.read().find(|a| &a.email == email))
    }
}

#[async_trait]
impl JudgeRepository for InMemoryPracticeStore {
    async fn insert(&self, judge: &Judge) -> Result<(), ApplicationError> {
        self.judges.write().insert("Judge", judge.id, judge.clone())
    }

    async fn update(&self, judge: &Judge) -> Result<(), ApplicationError> {
        self.judges.write().update("Judge", judge.id, judge.clone())
    }

    async fn get(&self, id: &JudgeId) -> Result<Option<Judge>, ApplicationError> {
        Ok(self.judges.read().get(id))
    }

    async fn list(&self) -> Result<Vec<Judge>, ApplicationError> {
        Ok(self.judges.read().select(|_| true))
    }

    async fn delete(&self, id: &JudgeId) -> Result<(), ApplicationError> {
        self.judges.write().remove("Judge", id)
    }

    async fn list_by_court(&self, court_id: &CourtId) -> Result<Vec<Judge>, ApplicationError> {
        Ok(self
            .judges
            .read()
            .select(|j| j.court_id.as_ref() == Some(court_id)))
    }
}

#[async_trait]
impl ClientRepository for InMemoryPracticeStore {
    async fn insert(&self, client: &Client) -> Result<(), ApplicationError> {
        let mut table = self.clients.write();
        if table.any_other(&client.id, |c| c.email == client.email) {
            return Err(duplicate("Email", &client.email));
        }
        table.insert("Client", client.id, client.clone())
    }

    async fn update(&self, client: &Client) -> Result<(), ApplicationError> {
        let mut table = self.clients.write();
        if table.any_other(&client.id, |c| c.email == client.email) {
            return Err(duplicate("Email", &client.email));
        }
        table.update("Client", client.id, client.clone())
    }

    async fn get(&self, id: &ClientId) -> Result<Option<Client>, ApplicationError> {
        Ok(self.clients.read().get(id))
    }

    async fn list(&self) -> Result<Vec<Client>, ApplicationError> {
        Ok(self.clients.read().select(|_| true))
    }

    async fn delete(&self, id: &ClientId) -> Result<(), ApplicationError> {
        self.clients.write().remove("Client", id)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Client>, ApplicationError> {
        Ok(self.clients.read().find(|c| &c.email == email))
    }

    async fn count(&self) -> Result<usize, ApplicationError> {
        Ok(self.clients.read().rows.len())
    }
}

#[async_trait]
impl CourtRepository for InMemoryPracticeStore {
    async fn insert(&self, court: &Court) -> Result<(), ApplicationError> {
        self.courts.write().insert("Court", court.id, court.clone())
    }

    async fn update(&self, court: &Court) -> Result<(), ApplicationError> {
        self.courts.write().update("Court", court.id, court.clone())
    }

    async fn get(&self, id: &CourtId) -> Result<Option<Court>, ApplicationError> {
        Ok(self.courts.read().get(id))
    }

    async fn list(&self) -> Result<Vec<Court>, ApplicationError> {
        Ok(self.courts.read().select(|_| true))
    }

    async fn delete(&self, id: &CourtId) -> Result<(), ApplicationError> {
        self.courts.write().remove("Court", id)
    }
}

#[async_trait]
impl CaseRepository for InMemoryPracticeStore {
    async fn insert(&self, case: &Case) -> Result<(), ApplicationError> {
        let mut table = self.cases.write();
        if table.any_other(&case.id, |c| c.case_number == case.case_number) {
            return Err(duplicate("Case number", &case.case_number));
        }
        table.insert("Case", case.id, case.clone())
    }

    async fn update(&self, case: &Case) -> Result<(), ApplicationError> {
        let mut table = self.cases.write();
        if table.any_other(&case.id, |c| c.case_number == case.case_number) {
            return Err(duplicate("Case number", &case.case_number));
        }
        table.update("Case", case.id, case.clone())
    }

    async fn get(&self, id: &CaseId) -> Result<Option<Case>, ApplicationError> {
        Ok(self.cases.read().get(id))
    }

    async fn list(&self) -> Result<Vec<Case>, ApplicationError> {
        Ok(self.cases.read().select(|_| true))
    }

    async fn list_where(&self, filter: CaseFilter) -> Result<Vec<Case>, ApplicationError> {
        Ok(self.cases.read().select(|c| match filter {
            CaseFilter::Client(id) => c.client_id == id,
            CaseFilter::Attorney(id) => c.attorney_id == id,
            CaseFilter::Court(id) => c.court_id == Some(id),
            CaseFilter::Judge(id) => c.judge_id == Some(id),
        }))
    }

    async fn delete(&self, id: &CaseId) -> Result<(), ApplicationError> {
        self.cases.write().remove("Case", id)
    }

    async fn find_by_case_number(
        &self,
        case_number: &CaseNumber,
    ) -> Result<Option<Case>, ApplicationError> {
        Ok(self.cases.read().find(|c| &c.case_number == case_number))
    }
}

#[async_trait]
impl DeadlineRepository for InMemoryPracticeStore {
    async fn insert(&self, deadline: &Deadline) -> Result<(), ApplicationError> {
        self.deadlines
            .write()
            .insert("Deadline", deadline.id, deadline.clone())
    }

    async fn update(&self, deadline: &Deadline) -> Result<(), ApplicationError> {
        self.deadlines
            .write()
            .update("Deadline", deadline.id, deadline.clone())
    }

    async fn get(&self, id: &DeadlineId) -> Result<Option<Deadline>, ApplicationError> {
        Ok(self.deadlines.read().get(id))
    }

    async fn list(&self) -> Result<Vec<Deadline>, ApplicationError> {
        Ok(self.deadlines.read().select(|_| true))
    }

    async fn list_by_case(&self, case_id: &CaseId) -> Result<Vec<Deadline>, ApplicationError> {
        Ok(self.deadlines.read().select(|d| &d.case_id == case_id))
    }

    async fn delete(&self, id: &DeadlineId) -> Result<(), ApplicationError> {
        self.deadlines.write().remove("Deadline", id)
    }

    async fn delete_by_case(&self, case_id: &CaseId) -> Result<usize, ApplicationError> {
        let deleted = self.deadlines.write().retain(|d| &d.case_id != case_id);
        debug!(deleted, "Deleted case deadlines");
        Ok(deleted)
    }
}

#[async_trait]
impl DocumentRepository for InMemoryPracticeStore {
    async fn insert(&self, document: &Document) -> Result<(), ApplicationError> {
        self.documents
            .write()
            .insert("Document", document.id, document.clone())
    }

    async fn update(&self, document: &Document) -> Result<(), ApplicationError> {
        self.documents
            .write()
            .update("Document", document.id, document.clone())
    }

    async fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError> {
        Ok(self.documents.read().get(id))
    }

    async fn list(&self) -> Result<Vec<Document>, ApplicationError> {
        Ok(self.documents.read().select(|_| true))
    }

    async fn list_by_case(&self, case_id: &CaseId) -> Result<Vec<Document>, ApplicationError> {
        Ok(self.documents.read().select(|d| &d.case_id == case_id))
    }

    async fn delete(&self, id: &DocumentId) -> Result<(), ApplicationError> {
        self.documents.write().remove("Document", id)
    }

    async fn delete_by_case(&self, case_id: &CaseId) -> Result<usize, ApplicationError> {
        let deleted = self.documents.write().retain(|d| &d.case_id != case_id);
        debug!(deleted, "Deleted case documents");
        Ok(deleted)
    }
}

#[async_trait]
impl DatabaseHealthPort for InMemoryPracticeStore {
    async fn is_available(&self) -> bool {
        true
    }

    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError> {
        Ok(DatabaseHealth::healthy("in-memory").with_response_time(0))
    }
}
