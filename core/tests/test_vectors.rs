//! Run the dispatch table against JSON test vectors stored in `test-vectors/`.
//!
//! Each case starts from a fresh service and replays its steps in order, so
//! a case can create a record and then read it back. Payloads are compared
//! as parsed JSON, which ignores field ordering.

use chrono::{TimeZone, Utc};
use showcase_core::{FixedClock, MockApiService, ShowcaseConfig};

fn fresh_service() -> MockApiService {
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    MockApiService::from_config(&ShowcaseConfig::default())
        .unwrap()
        .with_clock(clock)
}

#[test]
fn dispatch_test_vectors() {
    let raw = include_str!("../../test-vectors/dispatch.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let mut api = fresh_service();

        for (i, step) in case["steps"].as_array().unwrap().iter().enumerate() {
            let method = step["method"].as_str().unwrap();
            let path = step["path"].as_str().unwrap();
            let body = step["body"].as_str();

            let response = api.dispatch(method, path, body);

            let expected_status = step["expected_status"].as_u64().unwrap() as u16;
            assert_eq!(
                response.status, expected_status,
                "{name} step {i}: status for {method} {path}"
            );
            if let Some(expected) = step.get("expected_payload") {
                assert_eq!(
                    &response.payload, expected,
                    "{name} step {i}: payload for {method} {path}"
                );
            }
        }
    }
}
