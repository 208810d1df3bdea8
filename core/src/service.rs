//! The simulated backend: an in-memory user store behind a dispatch table.
//!
//! # Design
//! `MockApiService` is fully synchronous and never touches the network.
//! `dispatch` only mutates the store through the create rule; the direct
//! `*_record` operations serve the user-management demo, which bypasses
//! request routing. Simulated latency lives in `Session`, not here.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::ShowcaseConfig;
use crate::error::{ConfigError, Result, ValidationError};
use crate::fixtures::FixtureTable;
use crate::http::{status, ApiRequest, ApiResponse, HttpMethod};
use crate::rules::{self, RULES};
use crate::store::UserStore;
use crate::types::{RouteFixture, UserRecord};
use crate::validation;

/// Paths and static health fields used by the dispatch rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub collection_path: String,
    pub health_path: String,
    pub version: String,
    pub uptime: String,
}

impl From<&ShowcaseConfig> for ServiceSettings {
    fn from(config: &ShowcaseConfig) -> Self {
        Self {
            collection_path: config.collection_path.clone(),
            health_path: config.health_path.clone(),
            version: config.version.clone(),
            uptime: config.uptime.clone(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::from(&ShowcaseConfig::default())
    }
}

pub struct MockApiService {
    store: UserStore,
    fixtures: FixtureTable,
    settings: ServiceSettings,
    clock: Box<dyn Clock>,
}

impl MockApiService {
    pub fn new(store: UserStore, fixtures: FixtureTable, settings: ServiceSettings) -> Self {
        Self {
            store,
            fixtures,
            settings,
            clock: Box::new(SystemClock),
        }
    }

    /// Seed the store and load fixtures as configured.
    pub fn from_config(config: &ShowcaseConfig) -> std::result::Result<Self, ConfigError> {
        let store = UserStore::seeded(config.seed_users.clone())?;
        let fixtures = FixtureTable::load(config.fixtures_path.as_deref())?;
        Ok(Self::new(store, fixtures, ServiceSettings::from(config)))
    }

    /// Replace the clock used for health timestamps.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Simulate a request from its raw form fields.
    ///
    /// An unrecognised method answers `405`; everything else goes through
    /// [`dispatch_request`](Self::dispatch_request).
    pub fn dispatch(&mut self, method: &str, path: &str, raw_body: Option<&str>) -> ApiResponse {
        let method = match method.parse::<HttpMethod>() {
            Ok(method) => method,
            Err(e) => {
                warn!("{e}");
                return ApiResponse::error(status::METHOD_NOT_ALLOWED, "method not allowed");
            }
        };
        let mut request = ApiRequest::new(method, path);
        if let Some(body) = raw_body {
            request = request.with_body(body);
        }
        self.dispatch_request(&request)
    }

    /// Run the first matching rule of the dispatch table.
    pub fn dispatch_request(&mut self, request: &ApiRequest) -> ApiResponse {
        for rule in &RULES {
            if rule.matches(self, request) {
                debug!(
                    rule = rule.name,
                    method = %request.method,
                    path = %request.path,
                    "Dispatch matched"
                );
                return rule.handle(self, request);
            }
        }
        debug!(method = %request.method, path = %request.path, "No dispatch rule matched");
        ApiResponse::error(status::NOT_FOUND, rules::ENDPOINT_NOT_FOUND)
    }

    /// Validate and append a new user.
    pub fn create_record(
        &mut self,
        name: &str,
        email: &str,
    ) -> std::result::Result<UserRecord, ValidationError> {
        let user = validation::validate_new_user(name, email)?;
        let record = self.store.insert(user)?;
        info!(id = record.id, "Created user");
        Ok(record)
    }

    /// Replace the name of an existing user. The store is left untouched on
    /// error.
    pub fn update_record_name(&mut self, id: u64, new_name: &str) -> Result<UserRecord> {
        let name = validation::validate_name(new_name)?;
        let record = self.store.rename(id, name)?.clone();
        info!(id, "Renamed user");
        Ok(record)
    }

    /// Remove a user. Returns whether a record was actually removed.
    pub fn delete_record(&mut self, id: u64) -> bool {
        let removed = self.store.remove(id);
        if removed {
            info!(id, "Deleted user");
        } else {
            debug!(id, "Delete ignored, no such user");
        }
        removed
    }

    /// Snapshot of all records in creation order.
    pub fn records(&self) -> Vec<UserRecord> {
        self.store.records().to_vec()
    }

    pub fn find_record(&self, id: u64) -> Option<UserRecord> {
        self.store.get(id).cloned()
    }

    pub fn record_count(&self) -> usize {
        self.store.len()
    }

    pub fn next_id(&self) -> u64 {
        self.store.next_id()
    }

    /// The browsable endpoint list.
    pub fn fixtures(&self) -> &[RouteFixture] {
        self.fixtures.entries()
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    pub fn collection_path(&self) -> &str {
        &self.settings.collection_path
    }

    pub(crate) fn fixture_table(&self) -> &FixtureTable {
        &self.fixtures
    }

    pub(crate) fn store(&self) -> &UserStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut UserStore {
        &mut self.store
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::Error;
    use chrono::TimeZone;
    use serde_json::json;

    fn service() -> MockApiService {
        MockApiService::from_config(&ShowcaseConfig::default()).unwrap()
    }

    #[test]
    fn get_by_id_returns_record() {
        let mut api = service();
        let resp = api.dispatch("GET", "/api/users/2", None);
        assert_eq!(resp.status, 200);
        assert_eq!(resp.payload["name"], "Jane Smith");
    }

    #[test]
    fn get_by_unknown_id_is_404() {
        let mut api = service();
        let resp = api.dispatch("GET", "/api/users/99", None);
        assert_eq!(resp.status, 404);
        assert_eq!(resp.payload, json!({ "error": "not found" }));
    }

    #[test]
    fn non_integer_id_falls_through_to_fixture() {
        let mut api = service();
        let resp = api.dispatch("GET", "/api/users/{id}", None);
        assert_eq!(resp.status, 200);
        assert_eq!(resp.payload["name"], "John Doe");

        let resp = api.dispatch("GET", "/api/users/abc", None);
        assert_eq!(resp.status, 404);
        assert_eq!(resp.payload, json!({ "error": "endpoint not found" }));
    }

    #[test]
    fn list_reflects_live_store_not_fixture() {
        let mut api = service();
        api.delete_record(1);
        let resp = api.dispatch("GET", "/api/users", None);
        assert_eq!(resp.status, 200);
        let ids: Vec<u64> = resp.payload.as_array().unwrap().iter().map(|u| u["id"].as_u64().unwrap()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn create_via_dispatch_assigns_next_id() {
        let mut api = service();
        let resp = api.dispatch(
            "POST",
            "/api/users",
            Some(r#"{"name":"Alice","email":"alice@example.com"}"#),
        );
        assert_eq!(resp.status, 201);
        assert_eq!(
            resp.payload,
            json!({ "id": 4, "name": "Alice", "email": "alice@example.com" })
        );
        assert_eq!(api.next_id(), 5);
    }

    #[test]
    fn create_with_malformed_body_is_400_and_store_unchanged() {
        let mut api = service();
        let resp = api.dispatch("POST", "/api/users", Some("{not json"));
        assert_eq!(resp.status, 400);
        assert_eq!(resp.payload, json!({ "error": "invalid body" }));
        assert_eq!(api.record_count(), 3);
        assert_eq!(api.next_id(), 4);
    }

    #[test]
    fn create_without_body_is_400() {
        let mut api = service();
        assert_eq!(api.dispatch("POST", "/api/users", None).status, 400);
        assert_eq!(api.dispatch("POST", "/api/users", Some("  ")).status, 400);
    }

    #[test]
    fn create_with_invalid_email_explains_why() {
        let mut api = service();
        let resp = api.dispatch("POST", "/api/users", Some(r#"{"name":"Al","email":"nope"}"#));
        assert_eq!(resp.status, 400);
        assert_eq!(resp.payload["error"], "invalid body");
        assert_eq!(resp.payload["message"], "invalid email address: nope");
        assert_eq!(api.record_count(), 3);
    }

    #[test]
    fn health_uses_injected_clock() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut api = service().with_clock(FixedClock(instant));
        let resp = api.dispatch("GET", "/api/health", None);
        assert_eq!(
            resp.payload,
            json!({
                "status": "healthy",
                "timestamp": "2024-05-01T12:00:00.000Z",
                "version": "2.1.0",
                "uptime": "99.9%",
            })
        );
    }

    #[test]
    fn static_fixture_answers_exact_match() {
        let mut api = service();
        let resp = api.dispatch("GET", "/api/framework/info", None);
        assert_eq!(resp.status, 200);
        assert_eq!(resp.payload["name"], "Nimbus");
    }

    #[test]
    fn paths_are_case_sensitive() {
        let mut api = service();
        assert_eq!(api.dispatch("GET", "/API/USERS", None).status, 404);
    }

    #[test]
    fn unknown_method_is_405() {
        let mut api = service();
        let resp = api.dispatch("BREW", "/api/users", None);
        assert_eq!(resp.status, 405);
    }

    #[test]
    fn delete_via_dispatch_never_mutates() {
        let mut api = service();
        let resp = api.dispatch("DELETE", "/api/users/1", None);
        assert_eq!(resp.status, 404);
        assert_eq!(api.record_count(), 3);
    }

    #[test]
    fn deleted_record_is_gone_from_dispatch() {
        let mut api = service();
        assert!(api.delete_record(2));
        let resp = api.dispatch("GET", "/api/users/2", None);
        assert_eq!(resp.status, 404);
        assert_eq!(resp.payload, json!({ "error": "not found" }));
    }

    #[test]
    fn created_record_is_listed_once() {
        let mut api = service();
        let created = api.dispatch(
            "POST",
            "/api/users",
            Some(r#"{"name":"Alice","email":"alice@example.com"}"#),
        );
        assert_eq!(created.status, 201);

        let list = api.dispatch("GET", "/api/users", None);
        assert_eq!(list.status, 200);
        let matching: Vec<&serde_json::Value> = list
            .payload
            .as_array()
            .unwrap()
            .iter()
            .filter(|u| u["id"] == created.payload["id"])
            .collect();
        assert_eq!(matching, vec![&created.payload]);
        assert_eq!(list.payload.as_array().unwrap().len(), 4);
    }

    #[test]
    fn create_fails_cleanly_when_ids_run_out() {
        let mut config = ShowcaseConfig::default();
        config.seed_users = vec![UserRecord {
            id: u64::MAX - 1,
            name: "Max".to_string(),
            email: "max@example.com".to_string(),
        }];
        let mut api = MockApiService::from_config(&config).unwrap();

        assert_eq!(
            api.create_record("Alice", "alice@example.com"),
            Err(ValidationError::IdsExhausted)
        );
        let resp = api.dispatch(
            "POST",
            "/api/users",
            Some(r#"{"name":"Alice","email":"alice@example.com"}"#),
        );
        assert_eq!(resp.status, 400);
        assert_eq!(api.record_count(), 1);

        config.seed_users[0].id = u64::MAX;
        assert!(MockApiService::from_config(&config).is_err());
    }

    #[test]
    fn delete_record_is_not_repeatable() {
        let mut api = service();
        assert!(api.delete_record(2));
        assert!(!api.delete_record(2));
        let ids: Vec<u64> = api.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(api.next_id(), 4);
    }

    #[test]
    fn update_name_validates_and_reports_missing() {
        let mut api = service();
        let renamed = api.update_record_name(1, "  Johnny ").unwrap();
        assert_eq!(renamed.name, "Johnny");
        assert_eq!(api.find_record(1).unwrap().name, "Johnny");

        assert!(matches!(
            api.update_record_name(1, ""),
            Err(Error::Validation(ValidationError::EmptyName))
        ));
        assert!(matches!(api.update_record_name(42, "X"), Err(Error::NotFound(_))));
        assert_eq!(api.find_record(1).unwrap().name, "Johnny");
    }

    #[test]
    fn create_record_rejects_bad_input() {
        let mut api = service();
        assert_eq!(api.create_record("", "a@b.co"), Err(ValidationError::EmptyName));
        assert_eq!(
            api.create_record("A", "a@b"),
            Err(ValidationError::InvalidEmail("a@b".to_string()))
        );
        assert_eq!(api.record_count(), 3);
        assert_eq!(api.next_id(), 4);
    }

    #[test]
    fn custom_collection_path_is_honoured() {
        let config = ShowcaseConfig {
            collection_path: "/v2/people".to_string(),
            ..ShowcaseConfig::default()
        };
        let mut api = MockApiService::from_config(&config).unwrap();
        assert_eq!(api.dispatch("GET", "/v2/people/1", None).status, 200);
        assert_eq!(api.dispatch("GET", "/api/users/1", None).status, 404);
    }
}
