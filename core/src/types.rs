//! Domain records for the showcase.
//!
//! # Design
//! `UserRecord` is the only mutable entity; everything else here is static
//! content loaded once at startup and rendered as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::HttpMethod;

/// A single user held by the simulated backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// Request payload for creating a user. Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// A canned request/response pair for the endpoint browser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteFixture {
    pub method: HttpMethod,
    pub path: String,
    pub description: String,
    #[serde(
        default,
        rename = "requestBody",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_body: Option<Value>,
    pub response: Value,
}

/// A documented annotation shown in the docs section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocEntry {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_serializes_to_json() {
        let user = UserRecord {
            id: 4,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, json!({ "id": 4, "name": "Alice", "email": "alice@example.com" }));
    }

    #[test]
    fn new_user_ignores_extra_fields() {
        let input: NewUser =
            serde_json::from_str(r#"{"name":"Bo","email":"bo@example.com","role":"admin"}"#).unwrap();
        assert_eq!(input.name, "Bo");
    }

    #[test]
    fn new_user_rejects_missing_email() {
        let result: Result<NewUser, _> = serde_json::from_str(r#"{"name":"Bo"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn fixture_request_body_uses_camel_case_key() {
        let fixture: RouteFixture = serde_json::from_value(json!({
            "method": "POST",
            "path": "/api/users",
            "description": "Create a user",
            "requestBody": { "name": "string" },
            "response": { "id": 1 }
        }))
        .unwrap();
        assert_eq!(fixture.method, HttpMethod::Post);
        assert_eq!(fixture.request_body, Some(json!({ "name": "string" })));

        let without_body: RouteFixture = serde_json::from_value(json!({
            "method": "GET",
            "path": "/api/users",
            "description": "List users",
            "response": []
        }))
        .unwrap();
        assert!(without_body.request_body.is_none());
        let back = serde_json::to_value(&without_body).unwrap();
        assert!(back.get("requestBody").is_none());
    }
}
