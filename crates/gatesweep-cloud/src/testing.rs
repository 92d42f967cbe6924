//! Scripted request transport for tests

use crate::error::{CloudError, Result};
use crate::request::ProviderRequest;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// A request observed by [`ScriptedRequester`]
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub service: String,
    pub operation: String,
    pub params: Value,
}

enum Reply {
    Ok(Value),
    Err(String),
}

/// Fake transport answering from per-operation queues
///
/// Operations without a queued reply answer `{}`. Every request yields to the
/// runtime once before replying, so overlapping requests would show up as
/// interleaved entries in [`ScriptedRequester::timeline`].
#[derive(Default)]
pub struct ScriptedRequester {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<Call>>,
    timeline: Mutex<Vec<String>>,
}

impl ScriptedRequester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response for `operation`
    pub fn respond(self, operation: &str, response: Value) -> Self {
        self.push(operation, Reply::Ok(response));
        self
    }

    /// Queue a failure for `operation`
    pub fn fail(self, operation: &str, message: &str) -> Self {
        self.push(operation, Reply::Err(message.to_string()));
        self
    }

    fn push(&self, operation: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(operation.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Requests received so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests received for `operation`
    pub fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// `start <op>` / `end <op>` markers for every request
    pub fn timeline(&self) -> Vec<String> {
        self.timeline.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderRequest for ScriptedRequester {
    async fn request(&self, service: &str, operation: &str, params: Value) -> Result<Value> {
        self.calls.lock().unwrap().push(Call {
            service: service.to_string(),
            operation: operation.to_string(),
            params,
        });
        self.timeline
            .lock()
            .unwrap()
            .push(format!("start {}", operation));

        tokio::task::yield_now().await;

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(operation)
            .and_then(VecDeque::pop_front);

        self.timeline
            .lock()
            .unwrap()
            .push(format!("end {}", operation));

        match reply {
            Some(Reply::Ok(value)) => Ok(value),
            Some(Reply::Err(message)) => {
                Err(CloudError::request_failed(service, operation, message))
            }
            None => Ok(json!({})),
        }
    }
}
