//! Mock CDP implementation for testing
//!
//! This module provides mock implementations of CDP traits so probes and
//! storage backends can be exercised without a browser.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use crate::cdp::traits::*;
use crate::Error;

/// Mock CDP connection
///
/// Answers commands from a queue of canned `result` payloads (an empty
/// object once the queue is drained) and records every command sent.
#[derive(Debug)]
pub struct MockCdpConnection {
    is_active: AtomicBool,
    results: Mutex<VecDeque<serde_json::Value>>,
    sent: Mutex<Vec<(String, serde_json::Value)>>,
}

impl MockCdpConnection {
    /// Create a new mock CDP connection
    pub fn new() -> Self {
        Self {
            is_active: AtomicBool::new(true),
            results: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Queue the `result` payload for the next command
    pub async fn push_result(&self, result: serde_json::Value) {
        self.results.lock().await.push_back(result);
    }

    /// Commands sent so far as (method, params)
    pub async fn sent_commands(&self) -> Vec<(String, serde_json::Value)> {
        self.sent.lock().await.clone()
    }
}

impl Default for MockCdpConnection {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CdpConnection for MockCdpConnection {
    async fn send_command(&self, method: &str, params: serde_json::Value) -> Result<CdpResponse, Error> {
        if !self.is_active.load(Ordering::Relaxed) {
            return Err(Error::cdp("Connection is closed"));
        }

        let mut sent = self.sent.lock().await;
        sent.push((method.to_string(), params));
        let id = sent.len() as u64;
        drop(sent);

        let result = self
            .results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| serde_json::json!({}));

        Ok(CdpResponse {
            id,
            result: Some(result),
            error: None,
        })
    }

    async fn close(&self) -> Result<(), Error> {
        self.is_active.store(false, Ordering::Relaxed);
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.is_active.load(Ordering::Relaxed)
    }
}

/// Scripted outcome of an evaluation
#[derive(Debug, Clone)]
pub enum MockEvaluation {
    /// Evaluation returns this value
    Value(EvaluationResult),
    /// Evaluation throws with this description
    Throw(String),
}

/// Mock CDP client
///
/// Evaluations are matched against registered expression fragments; the most
/// recently registered matching fragment wins. Unmatched scripts fail with a
/// CDP error.
#[derive(Debug, Default)]
pub struct MockCdpClient {
    rules: std::sync::Mutex<Vec<(String, MockEvaluation)>>,
    evaluated: std::sync::Mutex<Vec<(String, bool)>>,
}

impl MockCdpClient {
    /// Create a new mock CDP client with no scripted answers
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer scripts containing `fragment` with `result`
    pub fn on(self, fragment: &str, result: EvaluationResult) -> Self {
        self.push_rule(fragment, MockEvaluation::Value(result));
        self
    }

    /// Make scripts containing `fragment` throw `message`
    pub fn on_throw(self, fragment: &str, message: &str) -> Self {
        self.push_rule(fragment, MockEvaluation::Throw(message.to_string()));
        self
    }

    fn push_rule(&self, fragment: &str, outcome: MockEvaluation) {
        if let Ok(mut rules) = self.rules.lock() {
            rules.push((fragment.to_string(), outcome));
        }
    }

    /// Scripts evaluated so far
    pub fn evaluated(&self) -> Vec<String> {
        self.evaluated
            .lock()
            .map(|e| e.iter().map(|(script, _)| script.clone()).collect())
            .unwrap_or_default()
    }

    /// Scripts evaluated with `await_promise` set
    pub fn awaited(&self) -> Vec<String> {
        self.evaluated
            .lock()
            .map(|e| e.iter().filter(|(_, awaited)| *awaited).map(|(s, _)| s.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CdpClient for MockCdpClient {
    async fn evaluate(&self, script: &str, await_promise: bool) -> Result<EvaluationResult, Error> {
        if let Ok(mut evaluated) = self.evaluated.lock() {
            evaluated.push((script.to_string(), await_promise));
        }

        let outcome = self.rules.lock().ok().and_then(|rules| {
            rules
                .iter()
                .rev()
                .find(|(fragment, _)| script.contains(fragment.as_str()))
                .map(|(_, outcome)| outcome.clone())
        });

        match outcome {
            Some(MockEvaluation::Value(result)) => Ok(result),
            Some(MockEvaluation::Throw(message)) => Err(Error::script_execution_failed(message)),
            None => Err(Error::cdp(format!("No scripted response for: {}", script))),
        }
    }

    async fn enable_domain(&self, _domain: &str) -> Result<(), Error> {
        Ok(())
    }

    async fn call_method(&self, _method: &str, _params: serde_json::Value) -> Result<serde_json::Value, Error> {
        Ok(serde_json::json!({}))
    }
}
