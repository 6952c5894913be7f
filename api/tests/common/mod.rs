//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use jb_api::AppState;
use jb_core::repositories::InMemoryStore;
use jb_core::services::{WelcomeMailer, WelcomeMessage};
use jb_shared::{AppConfig, AuthConfig, JwtConfig};

pub const API_KEY: &str = "test-api-key";
pub const SIGNING_KEY: &str = "test-signing-key";

/// Welcome mailer that keeps every message in memory
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<WelcomeMessage>>,
}

impl RecordingMailer {
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_password(&self) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .last()
            .map(|m| m.temporary_password.clone())
    }
}

#[async_trait]
impl WelcomeMailer for RecordingMailer {
    async fn send_welcome(&self, message: &WelcomeMessage) -> Result<String, String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(message.clone());
        Ok(format!("test-{}", sent.len()))
    }
}

pub struct TestContext {
    pub store: Arc<InMemoryStore>,
    pub mailer: Arc<RecordingMailer>,
    pub state: web::Data<AppState<InMemoryStore, RecordingMailer>>,
    pub config: AppConfig,
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth = AuthConfig::new(JwtConfig::new(SIGNING_KEY), API_KEY).with_hash_cost(4);
    config
}

pub fn context() -> TestContext {
    let config = test_config();
    let store = Arc::new(InMemoryStore::new());
    let mailer = Arc::new(RecordingMailer::default());
    let state = web::Data::new(AppState::new(store.clone(), mailer.clone(), &config.auth));

    TestContext {
        store,
        mailer,
        state,
        config,
    }
}

/// `Authorization` value accepted by the API key gate
pub fn api_key_header() -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", STANDARD.encode(API_KEY)))
}

/// `Authorization` value carrying a transport-encoded session token
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
