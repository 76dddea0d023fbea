#![allow(dead_code)]

use std::collections::VecDeque;
use std::error::Error;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sqlweave_core::{Record, SqlValue};
use sqlweave_repo::{BoxError, Context, Executor, IsolationLevel};

/// Installs a fmt subscriber writing through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Uniqueness violation raised by the scripted back-end.
#[derive(Debug)]
pub struct UniqueViolation;

impl fmt::Display for UniqueViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UNIQUE constraint failed")
    }
}

impl Error for UniqueViolation {}

pub fn unique_classifier(err: &(dyn Error + 'static)) -> bool {
    err.is::<UniqueViolation>()
}

/// Scripted answer to the next statement.
pub enum Reply {
    Rows(Vec<Record>),
    Affected(u64),
    Fail(BoxError),
    /// Never answers.
    Stall,
}

#[derive(Default)]
struct State {
    replies: VecDeque<Reply>,
    log: Vec<String>,
    params: Vec<Vec<SqlValue>>,
    fail_commit: bool,
    commit_error: Option<BoxError>,
    commit_delay: Option<Duration>,
    fail_rollback: bool,
}

/// Executor answering from a script. Unscripted queries return no rows and
/// unscripted statements affect one row. Clones share the script and log.
#[derive(Clone, Default)]
pub struct ScriptedExecutor {
    state: Arc<Mutex<State>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, reply: Reply) -> &Self {
        self.state.lock().unwrap().replies.push_back(reply);
        self
    }

    pub fn fail_commit(&self) {
        self.state.lock().unwrap().fail_commit = true;
    }

    /// Fails the next COMMIT with `err`.
    pub fn fail_commit_with(&self, err: BoxError) {
        self.state.lock().unwrap().commit_error = Some(err);
    }

    /// Makes COMMIT take `delay` before it is acknowledged.
    pub fn delay_commit(&self, delay: Duration) {
        self.state.lock().unwrap().commit_delay = Some(delay);
    }

    pub fn fail_rollback(&self) {
        self.state.lock().unwrap().fail_rollback = true;
    }

    /// Every statement and transaction command seen so far.
    pub fn log(&self) -> Vec<String> {
        self.state.lock().unwrap().log.clone()
    }

    /// Parameters of every statement, in order.
    pub fn params(&self) -> Vec<Vec<SqlValue>> {
        self.state.lock().unwrap().params.clone()
    }

    fn next(&self, sql: &str, params: &[SqlValue]) -> Option<Reply> {
        let mut state = self.state.lock().unwrap();
        state.log.push(String::from(sql));
        state.params.push(params.to_vec());
        state.replies.pop_front()
    }

    fn record(&self, command: String) -> bool {
        let mut state = self.state.lock().unwrap();
        let fail = match command.as_str() {
            "COMMIT" => state.fail_commit,
            "ROLLBACK" => state.fail_rollback,
            _ => false,
        };
        state.log.push(command);
        fail
    }
}

impl Executor for ScriptedExecutor {
    async fn execute(
        &mut self,
        _ctx: &Context,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<u64, BoxError> {
        match self.next(sql, params) {
            None => Ok(1),
            Some(Reply::Affected(n)) => Ok(n),
            Some(Reply::Fail(err)) => Err(err),
            Some(Reply::Stall) => std::future::pending().await,
            Some(Reply::Rows(_)) => panic!("rows scripted for statement: {sql}"),
        }
    }

    async fn query(
        &mut self,
        _ctx: &Context,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Vec<Record>, BoxError> {
        match self.next(sql, params) {
            None => Ok(vec![]),
            Some(Reply::Rows(rows)) => Ok(rows),
            Some(Reply::Fail(err)) => Err(err),
            Some(Reply::Stall) => std::future::pending().await,
            Some(Reply::Affected(_)) => panic!("count scripted for query: {sql}"),
        }
    }

    async fn begin(&mut self, isolation: IsolationLevel) -> Result<(), BoxError> {
        self.record(format!("BEGIN {isolation:?}"));
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), BoxError> {
        let failed = self.record(String::from("COMMIT"));
        let (error, delay) = {
            let mut state = self.state.lock().unwrap();
            (state.commit_error.take(), state.commit_delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = error {
            return Err(err);
        }
        if failed {
            return Err("commit failed".into());
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), BoxError> {
        if self.record(String::from("ROLLBACK")) {
            return Err("rollback failed".into());
        }
        Ok(())
    }
}

pub fn user(email: &str, name: &str) -> Record {
    Record::from([
        (String::from("email"), SqlValue::Text(String::from(email))),
        (String::from("name"), SqlValue::Text(String::from(name))),
    ])
}

pub fn row_with_id(id: i64) -> Record {
    Record::from([(String::from("id"), SqlValue::Int(id))])
}
