//! In-process stand-ins for the search and recommendation services

use async_trait::async_trait;
use shelf_common::api::{BookResult, SubmissionRecord};
use shelf_wizard::{ClientError, RecommendationService, SearchBackend, SearchKind};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::oneshot;

/// Canned answer for the recommendation endpoint
#[derive(Debug, Clone)]
pub enum Reply {
    Books(Vec<BookResult>),
    Fail(String),
}

/// Recommendation service returning a configurable reply and recording
/// every submitted profile
pub struct StubRecommender {
    reply: Mutex<Reply>,
    submissions: Mutex<Vec<SubmissionRecord>>,
}

impl StubRecommender {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply: Mutex::new(reply),
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn submissions(&self) -> Vec<SubmissionRecord> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecommendationService for StubRecommender {
    async fn recommend(&self, record: &SubmissionRecord) -> Result<Vec<BookResult>, ClientError> {
        self.submissions.lock().unwrap().push(record.clone());
        match self.reply.lock().unwrap().clone() {
            Reply::Books(books) => Ok(books),
            Reply::Fail(message) => Err(ClientError::ApiError(502, message)),
        }
    }
}

/// Search backend answering from a fixed table; unknown queries fail
#[derive(Default)]
pub struct ScriptedSearch {
    answers: HashMap<(SearchKind, String), Vec<String>>,
}

impl ScriptedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, kind: SearchKind, query: &str, results: &[&str]) -> Self {
        self.answers.insert(
            (kind, query.to_string()),
            results.iter().map(|s| s.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl SearchBackend for ScriptedSearch {
    async fn search(&self, kind: SearchKind, query: &str) -> Result<Vec<String>, ClientError> {
        self.answers
            .get(&(kind, query.to_string()))
            .cloned()
            .ok_or_else(|| ClientError::NetworkError(format!("no route for {}", query)))
    }
}

/// Search backend whose responses are released by the test, one query at a
/// time, so arrival order can be chosen freely
pub struct GatedSearch {
    gates: Mutex<HashMap<String, oneshot::Receiver<Vec<String>>>>,
}

/// Build a gated backend plus the senders that release each query
pub fn gated_search(queries: &[&str]) -> (GatedSearch, HashMap<String, oneshot::Sender<Vec<String>>>) {
    let mut gates = HashMap::new();
    let mut releases = HashMap::new();
    for query in queries {
        let (tx, rx) = oneshot::channel();
        gates.insert(query.to_string(), rx);
        releases.insert(query.to_string(), tx);
    }
    (
        GatedSearch {
            gates: Mutex::new(gates),
        },
        releases,
    )
}

#[async_trait]
impl SearchBackend for GatedSearch {
    async fn search(&self, _kind: SearchKind, query: &str) -> Result<Vec<String>, ClientError> {
        let gate = self
            .gates
            .lock()
            .unwrap()
            .remove(query)
            .ok_or_else(|| ClientError::NetworkError(format!("no gate for {}", query)))?;
        gate.await
            .map_err(|_| ClientError::NetworkError("gate dropped".to_string()))
    }
}
