#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::{TestRequest, TestServer};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use vanity_shortener::application::services::auth_service::hash_token;
use vanity_shortener::prelude::*;
use vanity_shortener::routes::routes;

pub const TOKEN: &str = "integration-test-token";
pub const HOST: &str = "s.example.com";

/// Short URL store backed by a map, with the same contract as the
/// PostgreSQL repository.
pub struct InMemoryShortUrls {
    records: Mutex<BTreeMap<String, ShortUrl>>,
    next_id: Mutex<i64>,
    pub unavailable: AtomicBool,
}

impl Default for InMemoryShortUrls {
    fn default() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            next_id: Mutex::new(1024),
            unavailable: AtomicBool::new(false),
        }
    }
}

impl InMemoryShortUrls {
    pub fn get(&self, vanity: &str) -> Option<ShortUrl> {
        self.records.lock().unwrap().get(vanity).cloned()
    }

    pub fn put(&self, record: ShortUrl) {
        self.records
            .lock()
            .unwrap()
            .insert(record.vanity.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn current_next_id(&self) -> i64 {
        *self.next_id.lock().unwrap()
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::storage("Store unavailable", json!({})));
        }
        Ok(())
    }
}

#[async_trait]
impl ShortUrlRepository for InMemoryShortUrls {
    async fn find(&self, vanity: &str) -> Result<Option<ShortUrl>, AppError> {
        self.check_available()?;
        Ok(self.get(vanity))
    }

    async fn insert(&self, record: &ShortUrl) -> Result<(), AppError> {
        self.check_available()?;
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&record.vanity) {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }
        records.insert(record.vanity.clone(), record.clone());
        Ok(())
    }

    async fn upsert(&self, record: &ShortUrl) -> Result<(), AppError> {
        self.check_available()?;
        self.put(record.clone());
        Ok(())
    }

    async fn delete(&self, vanity: &str) -> Result<bool, AppError> {
        self.check_available()?;
        Ok(self.records.lock().unwrap().remove(vanity).is_some())
    }

    async fn list(&self, archived: bool) -> Result<Vec<ShortUrl>, AppError> {
        self.check_available()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.is_archived == archived)
            .cloned()
            .collect())
    }

    async fn increment_clicks(&self, vanity: &str) -> Result<bool, AppError> {
        self.check_available()?;
        match self.records.lock().unwrap().get_mut(vanity) {
            Some(record) => {
                record.clicks += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn next_id(&self) -> Result<i64, AppError> {
        self.check_available()?;
        let mut id = self.next_id.lock().unwrap();
        *id += 1;
        Ok(*id)
    }

    async fn set_next_id(&self, id: i64) -> Result<(), AppError> {
        self.check_available()?;
        *self.next_id.lock().unwrap() = id;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_available()
    }
}

/// Click statistics store keyed by `(vanity, row_key)`.
#[derive(Default)]
pub struct InMemoryClickStats {
    rows: Mutex<BTreeMap<(String, String), ClickStat>>,
}

impl InMemoryClickStats {
    pub fn all(&self) -> Vec<ClickStat> {
        self.rows.lock().unwrap().values().cloned().collect()
    }

    pub fn put(&self, stat: ClickStat) {
        self.rows
            .lock()
            .unwrap()
            .insert((stat.vanity.clone(), stat.row_key.clone()), stat);
    }
}

#[async_trait]
impl ClickStatsRepository for InMemoryClickStats {
    async fn record(&self, stat: &ClickStat) -> Result<(), AppError> {
        self.put(stat.clone());
        Ok(())
    }

    async fn upsert(&self, stat: &ClickStat) -> Result<(), AppError> {
        self.put(stat.clone());
        Ok(())
    }

    async fn list(&self, vanity: Option<String>) -> Result<Vec<ClickStat>, AppError> {
        Ok(self
            .all()
            .into_iter()
            .filter(|s| vanity.as_ref().is_none_or(|v| &s.vanity == v))
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub short_urls: Arc<InMemoryShortUrls>,
    pub click_stats: Arc<InMemoryClickStats>,
    pub clicks: mpsc::Receiver<ClickEvent>,
}

impl TestApp {
    /// Authenticated GET with the test host.
    pub fn get(&self, path: &str) -> TestRequest {
        self.server
            .get(path)
            .add_header("Host", HOST)
            .add_header("Authorization", format!("Bearer {TOKEN}"))
    }

    /// Authenticated POST with the test host.
    pub fn post(&self, path: &str) -> TestRequest {
        self.server
            .post(path)
            .add_header("Host", HOST)
            .add_header("Authorization", format!("Bearer {TOKEN}"))
    }
}

pub fn create_test_app() -> TestApp {
    create_test_app_with(|state| state)
}

pub fn create_test_app_with(configure: impl FnOnce(AppState) -> AppState) -> TestApp {
    let short_urls = Arc::new(InMemoryShortUrls::default());
    let click_stats = Arc::new(InMemoryClickStats::default());
    let (tx, rx) = mpsc::channel(100);

    let state = configure(AppState::new(
        short_urls.clone(),
        click_stats.clone(),
        AuthService::new([hash_token(TOKEN)]),
        tx,
    ));

    let app = routes(&state).with_state(state);

    TestApp {
        server: TestServer::new(app).unwrap(),
        short_urls,
        click_stats,
        clicks: rx,
    }
}

pub fn short_url(vanity: &str, url: &str) -> ShortUrl {
    ShortUrl {
        vanity: vanity.to_string(),
        url: url.to_string(),
        title: String::new(),
        clicks: 0,
        is_archived: false,
        created_date: chrono::Utc::now().date_naive(),
        created_by: String::new(),
        schedules: vec![],
    }
}

pub fn click(vanity: &str, row_key: &str, datetime: &str, count: i64) -> ClickStat {
    ClickStat {
        vanity: vanity.to_string(),
        row_key: row_key.to_string(),
        datetime: datetime.to_string(),
        count,
    }
}
