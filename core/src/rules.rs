//! Ordered dispatch rules for the simulated backend.
//!
//! # Design
//! Each rule is a predicate plus a handler, both plain function pointers, so
//! the priority order is visible in one place ([`RULES`]) and each rule can
//! be tested on its own. `MockApiService::dispatch_request` walks the list
//! and runs the first rule whose predicate matches; when none does, the
//! request answers `404 {"error": "endpoint not found"}`.
//!
//! | order | rule             | request                          |
//! |-------|------------------|----------------------------------|
//! | 1     | `user-by-id`     | `GET {collection}/{integer id}`  |
//! | 2     | `user-list`      | `GET {collection}`               |
//! | 3     | `user-create`    | `POST {collection}`              |
//! | 4     | `health`         | `GET {health}`                   |
//! | 5     | `static-fixture` | exact `(method, path)` fixture   |

use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::ParseError;
use crate::http::{status, ApiRequest, ApiResponse, HttpMethod};
use crate::service::MockApiService;
use crate::types::NewUser;
use crate::validation;

pub const NOT_FOUND: &str = "not found";
pub const INVALID_BODY: &str = "invalid body";
pub const ENDPOINT_NOT_FOUND: &str = "endpoint not found";

type Predicate = fn(&MockApiService, &ApiRequest) -> bool;
type Handler = fn(&mut MockApiService, &ApiRequest) -> ApiResponse;

/// One entry of the dispatch table.
pub struct DispatchRule {
    pub name: &'static str,
    matches: Predicate,
    handle: Handler,
}

impl DispatchRule {
    pub fn matches(&self, service: &MockApiService, request: &ApiRequest) -> bool {
        (self.matches)(service, request)
    }

    pub fn handle(&self, service: &mut MockApiService, request: &ApiRequest) -> ApiResponse {
        (self.handle)(service, request)
    }
}

/// The dispatch table, in priority order. First match wins.
pub static RULES: [DispatchRule; 5] = [
    DispatchRule {
        name: "user-by-id",
        matches: is_user_by_id,
        handle: get_user,
    },
    DispatchRule {
        name: "user-list",
        matches: is_user_list,
        handle: list_users,
    },
    DispatchRule {
        name: "user-create",
        matches: is_user_create,
        handle: create_user,
    },
    DispatchRule {
        name: "health",
        matches: is_health,
        handle: health,
    },
    DispatchRule {
        name: "static-fixture",
        matches: is_static_fixture,
        handle: static_fixture,
    },
];

/// Extract `{id}` from `{collection}/{id}`. Only a non-empty run of ASCII
/// digits that fits in a `u64` counts as an id.
pub fn member_id(collection: &str, path: &str) -> Option<u64> {
    let segment = path.strip_prefix(collection)?.strip_prefix('/')?;
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

fn to_payload<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

fn is_user_by_id(service: &MockApiService, request: &ApiRequest) -> bool {
    request.method == HttpMethod::Get
        && member_id(service.collection_path(), &request.path).is_some()
}

fn is_user_list(service: &MockApiService, request: &ApiRequest) -> bool {
    request.method == HttpMethod::Get && request.path == service.collection_path()
}

fn is_user_create(service: &MockApiService, request: &ApiRequest) -> bool {
    request.method == HttpMethod::Post && request.path == service.collection_path()
}

fn is_health(service: &MockApiService, request: &ApiRequest) -> bool {
    request.method == HttpMethod::Get && request.path == service.settings().health_path
}

fn is_static_fixture(service: &MockApiService, request: &ApiRequest) -> bool {
    service
        .fixture_table()
        .find(request.method, &request.path)
        .is_some()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn get_user(service: &mut MockApiService, request: &ApiRequest) -> ApiResponse {
    let found = member_id(service.collection_path(), &request.path)
        .and_then(|id| service.store().get(id));
    match found {
        Some(record) => ApiResponse::ok(to_payload(record)),
        None => ApiResponse::error(status::NOT_FOUND, NOT_FOUND),
    }
}

fn list_users(service: &mut MockApiService, _request: &ApiRequest) -> ApiResponse {
    ApiResponse::ok(to_payload(&service.store().records()))
}

fn create_user(service: &mut MockApiService, request: &ApiRequest) -> ApiResponse {
    let Some(raw) = request.body.as_deref() else {
        debug!("Create request without a body");
        return ApiResponse::error(status::BAD_REQUEST, INVALID_BODY);
    };
    let input: NewUser = match serde_json::from_str(raw).map_err(ParseError::from) {
        Ok(input) => input,
        Err(e) => {
            debug!("{e}");
            return ApiResponse::error(status::BAD_REQUEST, INVALID_BODY);
        }
    };
    let created = validation::validate_new_user(&input.name, &input.email)
        .and_then(|user| service.store_mut().insert(user));
    match created {
        Ok(record) => {
            info!(id = record.id, "Created user via dispatch");
            ApiResponse::created(to_payload(&record))
        }
        Err(e) => ApiResponse::error_with_message(status::BAD_REQUEST, INVALID_BODY, e.to_string()),
    }
}

fn health(service: &mut MockApiService, _request: &ApiRequest) -> ApiResponse {
    let settings = service.settings();
    ApiResponse::ok(json!({
        "status": "healthy",
        "timestamp": service.now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "version": settings.version,
        "uptime": settings.uptime,
    }))
}

fn static_fixture(service: &mut MockApiService, request: &ApiRequest) -> ApiResponse {
    match service.fixture_table().find(request.method, &request.path) {
        Some(fixture) => ApiResponse::ok(fixture.response.clone()),
        None => ApiResponse::error(status::NOT_FOUND, ENDPOINT_NOT_FOUND),
    }
}
