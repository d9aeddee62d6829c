//! `MockProvider` — a test double for `ConnectionProvider`.
//!
//! Records every connection event (connect, statement, commit, close) in call
//! order and answers queries with programmer-specified rows or a failure.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::provider::{ConnectionProvider, SqlConnection};
use crate::{DbError, Dialect, Row, Statement};

/// Something that happened on a mock connection.
#[derive(Debug, Clone, PartialEq)]
pub enum MockEvent {
    Connect,
    FetchAll(Statement),
    Execute(Statement),
    Commit,
    Close,
}

/// What the mock does when asked to connect or run a statement.
#[derive(Debug, Clone)]
pub enum MockBehaviour {
    /// Every query returns these rows; every write affects one row.
    ReturnRows(Vec<Row>),
    /// Every statement fails with a `Driver` error.
    FailStatements(String),
    /// `connect` itself fails with a `Connection` error.
    RefuseConnect(String),
}

/// A provider whose connections record what they were asked to do.
pub struct MockProvider {
    pub behaviour: MockBehaviour,
    pub dialect: Dialect,
    /// All events seen by connections from this provider (in call order).
    pub events: Arc<Mutex<Vec<MockEvent>>>,
}

impl MockProvider {
    fn with_behaviour(behaviour: MockBehaviour) -> Self {
        Self {
            behaviour,
            dialect: Dialect::TSql,
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock whose queries return `rows`.
    pub fn returning(rows: Vec<Row>) -> Self {
        Self::with_behaviour(MockBehaviour::ReturnRows(rows))
    }

    /// Create a mock whose statements all fail.
    pub fn failing(msg: impl Into<String>) -> Self {
        Self::with_behaviour(MockBehaviour::FailStatements(msg.into()))
    }

    /// Create a mock that cannot hand out connections.
    pub fn refusing(msg: impl Into<String>) -> Self {
        Self::with_behaviour(MockBehaviour::RefuseConnect(msg.into()))
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Snapshot of every recorded event.
    pub fn events(&self) -> Vec<MockEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Statements issued, whether read or write.
    pub fn statements(&self) -> Vec<Statement> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                MockEvent::FetchAll(s) | MockEvent::Execute(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded events equal to `event`.
    pub fn count(&self, event: &MockEvent) -> usize {
        self.events().iter().filter(|e| *e == event).count()
    }
}

#[async_trait]
impl ConnectionProvider for MockProvider {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    async fn connect(&self) -> Result<Box<dyn SqlConnection>, DbError> {
        if let MockBehaviour::RefuseConnect(msg) = &self.behaviour {
            return Err(DbError::Connection(msg.clone()));
        }
        let conn = MockConnection {
            behaviour: self.behaviour.clone(),
            events: Arc::clone(&self.events),
        };
        conn.record(MockEvent::Connect);
        Ok(Box::new(conn))
    }
}

struct MockConnection {
    behaviour: MockBehaviour,
    events: Arc<Mutex<Vec<MockEvent>>>,
}

impl MockConnection {
    fn record(&self, event: MockEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[async_trait]
impl SqlConnection for MockConnection {
    async fn fetch_all(&mut self, statement: &Statement) -> Result<Vec<Row>, DbError> {
        self.record(MockEvent::FetchAll(statement.clone()));
        match &self.behaviour {
            MockBehaviour::ReturnRows(rows) => Ok(rows.clone()),
            MockBehaviour::FailStatements(msg) | MockBehaviour::RefuseConnect(msg) => {
                Err(DbError::Driver(msg.clone()))
            }
        }
    }

    async fn execute(&mut self, statement: &Statement) -> Result<u64, DbError> {
        self.record(MockEvent::Execute(statement.clone()));
        match &self.behaviour {
            MockBehaviour::ReturnRows(_) => Ok(1),
            MockBehaviour::FailStatements(msg) | MockBehaviour::RefuseConnect(msg) => {
                Err(DbError::Driver(msg.clone()))
            }
        }
    }

    async fn commit(&mut self) -> Result<(), DbError> {
        self.record(MockEvent::Commit);
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<(), DbError> {
        self.record(MockEvent::Close);
        Ok(())
    }
}
