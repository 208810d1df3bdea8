//! C-ABI wrapper around `showcase-core`.
//!
//! # Overview
//! Exposes a [`showcase_core::Session`] through `extern "C"` functions so a
//! host presentation layer written in any language with a C FFI can drive
//! the simulated backend and the view router.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Dispatch is synchronous. The host asks `showcase_next_latency_ms` for
//!   the simulated delay and waits on its own event loop.
//! - View changes are queued inside the handle and drained as a JSON array
//!   with `showcase_take_view_commands`.
//! - The C caller owns all returned pointers and must call the matching
//!   `showcase_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::str::Utf8Error;

use showcase_core::{Session, ShowcaseConfig, ViewSurface};
use tracing::{error, warn};

use types::*;

/// Borrow a C string argument. `Ok(None)` means the pointer was null.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn c_str<'a>(ptr: *const c_char) -> Result<Option<&'a str>, Utf8Error> {
    if ptr.is_null() {
        return Ok(None);
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().map(Some)
}

/// Resolve a required string argument or return the matching error result.
macro_rules! required_str {
    ($ptr:expr, $name:literal) => {
        match unsafe { c_str($ptr) } {
            Ok(Some(s)) => s,
            Ok(None) => return FfiResult::null_arg($name),
            Err(_) => return FfiResult::invalid_utf8($name),
        }
    };
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

/// Install the `tracing` subscriber that writes to stderr. Returns `false`
/// if a subscriber was already installed.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_init_logging(verbose: bool) -> bool {
    catch_unwind(|| showcase_core::logging::init(verbose)).unwrap_or(false)
}

/// Create a new session.
///
/// `config_toml` is the text of a configuration file, or null for the
/// defaults. Returns null if the configuration is invalid or an internal
/// panic occurs. The caller must free the handle with
/// `showcase_session_free`.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_session_new(config_toml: *const c_char) -> *mut FfiSession {
    catch_unwind(|| {
        let config = match unsafe { c_str(config_toml) } {
            Ok(None) => ShowcaseConfig::default(),
            Ok(Some(text)) => match ShowcaseConfig::from_toml_str(text) {
                Ok(config) => config,
                Err(e) => {
                    error!("Rejected session config: {e}");
                    return std::ptr::null_mut();
                }
            },
            Err(e) => {
                error!("Session config is not valid UTF-8: {e}");
                return std::ptr::null_mut();
            }
        };
        match Session::new(&config) {
            Ok(session) => Box::into_raw(Box::new(FfiSession::new(session))),
            Err(e) => {
                error!("Failed to start session: {e}");
                std::ptr::null_mut()
            }
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a session created by `showcase_session_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_session_free(session: *mut FfiSession) {
    if !session.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(session) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Simulated backend
// ---------------------------------------------------------------------------

/// Dispatch one simulated request and queue it as a view response.
///
/// `body` may be null. Returns null if `session`, `method` or `path` is
/// null or not UTF-8. The caller must free the response with
/// `showcase_free_response`.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_dispatch(
    session: *mut FfiSession,
    method: *const c_char,
    path: *const c_char,
    body: *const c_char,
) -> *mut FfiApiResponse {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return std::ptr::null_mut();
        }
        let handle = unsafe { &mut *session };
        let (Ok(Some(method)), Ok(Some(path))) = (unsafe { c_str(method) }, unsafe { c_str(path) })
        else {
            warn!("showcase_dispatch called with a missing method or path");
            return std::ptr::null_mut();
        };
        let Ok(body) = (unsafe { c_str(body) }) else {
            warn!("showcase_dispatch body is not valid UTF-8");
            return std::ptr::null_mut();
        };

        let response = handle.session.api_mut().dispatch(method, path, body);
        handle.queue.show_response(&response);
        if response.status == showcase_core::http::status::CREATED {
            handle.session.refresh_users(&mut handle.queue);
        }
        FfiApiResponse::from_core(&response)
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Draw the next simulated latency in milliseconds. Returns 0 when latency
/// is disabled or `session` is null.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_next_latency_ms(session: *mut FfiSession) -> u64 {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return 0;
        }
        let handle = unsafe { &mut *session };
        u64::try_from(handle.session.next_latency().as_millis()).unwrap_or(u64::MAX)
    }))
    .unwrap_or(0)
}

/// Create a user record. Returns a result with `data_tag = User` on success.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_create_user(
    session: *mut FfiSession,
    name: *const c_char,
    email: *const c_char,
) -> *mut FfiResult {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return FfiResult::null_arg("session");
        }
        let name = required_str!(name, "name");
        let email = required_str!(email, "email");
        let handle = unsafe { &mut *session };
        match handle.session.api_mut().create_record(name, email) {
            Ok(record) => {
                handle.session.refresh_users(&mut handle.queue);
                FfiResult::ok_user(record)
            }
            Err(e) => FfiResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiResult::panic("panic in showcase_create_user"))
}

/// Rename a user record. Returns a result with `data_tag = User` on success
/// and `NotFound` when no record has this id.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_rename_user(
    session: *mut FfiSession,
    id: u64,
    name: *const c_char,
) -> *mut FfiResult {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return FfiResult::null_arg("session");
        }
        let name = required_str!(name, "name");
        let handle = unsafe { &mut *session };
        match handle.session.api_mut().update_record_name(id, name) {
            Ok(record) => {
                handle.session.refresh_users(&mut handle.queue);
                FfiResult::ok_user(record)
            }
            Err(e) => FfiResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiResult::panic("panic in showcase_rename_user"))
}

/// Delete a user record.
///
/// Returns 1 if a record was removed, 0 if the id is unknown, and -1 if
/// `session` is null or a panic occurred.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_delete_user(session: *mut FfiSession, id: u64) -> i32 {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return -1;
        }
        let handle = unsafe { &mut *session };
        if handle.session.api_mut().delete_record(id) {
            handle.session.refresh_users(&mut handle.queue);
            1
        } else {
            0
        }
    }))
    .unwrap_or(-1)
}

/// All user records as a JSON array in insertion order. Returns null if
/// `session` is null. Free with `showcase_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_users_json(session: *const FfiSession) -> *mut c_char {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return std::ptr::null_mut();
        }
        let handle = unsafe { &*session };
        match serde_json::to_string(&handle.session.api().records()) {
            Ok(json) => to_c_string(json),
            Err(_) => std::ptr::null_mut(),
        }
    }))
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// View router
// ---------------------------------------------------------------------------

/// Navigate to the section with this id (`dashboard`, `api-explorer`,
/// `demo`, `docs`). Unknown ids leave the view unchanged and return a
/// `Navigation` error.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_navigate_section(
    session: *mut FfiSession,
    name: *const c_char,
) -> *mut FfiResult {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return FfiResult::null_arg("session");
        }
        let name = required_str!(name, "name");
        let handle = unsafe { &mut *session };
        match handle.session.navigate_to_section(name, &mut handle.queue) {
            Ok(_) => FfiResult::ok_empty(),
            Err(e) => FfiResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiResult::panic("panic in showcase_navigate_section"))
}

/// Switch the demo tab (`users`, `api-tester`, `code`). Fails with a
/// `Navigation` error outside the demo section.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_navigate_tab(
    session: *mut FfiSession,
    name: *const c_char,
) -> *mut FfiResult {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return FfiResult::null_arg("session");
        }
        let name = required_str!(name, "name");
        let handle = unsafe { &mut *session };
        match handle.session.navigate_to_tab(name, &mut handle.queue) {
            Ok(_) => FfiResult::ok_empty(),
            Err(e) => FfiResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiResult::panic("panic in showcase_navigate_tab"))
}

/// First paint. Opens the section named by `fragment` (a leading `#` is
/// allowed; null or unknown falls back to the default section) and returns
/// the id of the section shown. Free with `showcase_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_restore_from_location(
    session: *mut FfiSession,
    fragment: *const c_char,
) -> *mut c_char {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return std::ptr::null_mut();
        }
        let fragment = unsafe { c_str(fragment) }.ok().flatten().unwrap_or("");
        let handle = unsafe { &mut *session };
        let section = handle.session.start(fragment, &mut handle.queue);
        to_c_string(section.id())
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Step back in history. Returns `false` at the oldest entry.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_history_back(session: *mut FfiSession) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return false;
        }
        let handle = unsafe { &mut *session };
        handle.session.back(&mut handle.queue).is_some()
    }))
    .unwrap_or(false)
}

/// Step forward in history. Returns `false` at the newest entry.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_history_forward(session: *mut FfiSession) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return false;
        }
        let handle = unsafe { &mut *session };
        handle.session.forward(&mut handle.queue).is_some()
    }))
    .unwrap_or(false)
}

/// Id of the active section. Free with `showcase_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_active_section(session: *const FfiSession) -> *mut c_char {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return std::ptr::null_mut();
        }
        let handle = unsafe { &*session };
        to_c_string(handle.session.state().active_section.id())
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Id of the active demo tab. Free with `showcase_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_active_tab(session: *const FfiSession) -> *mut c_char {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return std::ptr::null_mut();
        }
        let handle = unsafe { &*session };
        to_c_string(handle.session.state().active_tab.id())
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Drain queued view commands as a JSON array. Each element carries a
/// `type` field (`section-visibility`, `tab-visibility`, `fragment`,
/// `render`, `response`, `notice`). Free with `showcase_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_take_view_commands(session: *mut FfiSession) -> *mut c_char {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return std::ptr::null_mut();
        }
        let handle = unsafe { &mut *session };
        match serde_json::to_string(&handle.queue.drain()) {
            Ok(json) => to_c_string(json),
            Err(e) => {
                error!("Failed to serialize view commands: {e}");
                std::ptr::null_mut()
            }
        }
    }))
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a C string returned by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

/// Free an `FfiApiResponse` returned by `showcase_dispatch`. Safe to call
/// with null.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_free_response(response: *mut FfiApiResponse) {
    if response.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let response = unsafe { Box::from_raw(response) };
        if !response.payload_json.is_null() {
            drop(unsafe { CString::from_raw(response.payload_json) });
        }
    });
}

/// Free an `FfiResult`. Safe to call with null. Uses `data_tag` to
/// determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn showcase_free_result(result: *mut FfiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::User => {
                let user = unsafe { Box::from_raw(result.data as *mut FfiUser) };
                if !user.name.is_null() {
                    drop(unsafe { CString::from_raw(user.name) });
                }
                if !user.email.is_null() {
                    drop(unsafe { CString::from_raw(user.email) });
                }
            }
            FfiDataTag::None => {}
        }
    });
}
