// Mock collaborators for pipeline tests.

use crate::core::document::{Document, SourceType};
use crate::core::loader::ContentLoader;
use crate::core::model::{ModelClient, ModelProvider};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// `n` distinct space-separated words.
pub fn words(n: usize) -> String {
    (0..n)
        .map(|i| format!("w{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone)]
enum Reply {
    Text(String),
    Fail(String),
}

/// Replies from a script, falling back to a canned summary, and records prompts.
#[derive(Clone, Default)]
pub struct MockModelClient {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockModelClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, text: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Text(text.to_string()));
        self
    }

    pub fn with_error(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Fail(message.to_string()));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len()
        };

        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail(message)) => Err(Error::inference(message)),
            None => Ok(format!("summary {call}")),
        }
    }
}

/// Hands out clones of one `MockModelClient` and records the credentials used.
#[derive(Clone, Default)]
pub struct MockModelProvider {
    pub client: MockModelClient,
    credentials: Arc<Mutex<Vec<String>>>,
}

impl MockModelProvider {
    pub fn new(client: MockModelClient) -> Self {
        Self {
            client,
            credentials: Arc::default(),
        }
    }

    pub fn connections(&self) -> Vec<String> {
        self.credentials.lock().unwrap().clone()
    }
}

impl ModelProvider for MockModelProvider {
    type Client = MockModelClient;

    fn connect(&self, credential: &str) -> MockModelClient {
        self.credentials.lock().unwrap().push(credential.to_string());
        self.client.clone()
    }
}

/// Arguments captured from a load call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadCall {
    pub url: String,
    pub source_type: SourceType,
}

#[derive(Clone, Default)]
pub struct MockLoader {
    documents: Arc<Mutex<Option<Vec<Document>>>>,
    failure: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<LoadCall>>>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(self, documents: Vec<Document>) -> Self {
        *self.documents.lock().unwrap() = Some(documents);
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<LoadCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentLoader for MockLoader {
    async fn load(&self, url: &str, source_type: SourceType) -> Result<Vec<Document>> {
        self.calls.lock().unwrap().push(LoadCall {
            url: url.to_string(),
            source_type,
        });

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::load(message));
        }

        Ok(self.documents.lock().unwrap().clone().unwrap_or_default())
    }
}
