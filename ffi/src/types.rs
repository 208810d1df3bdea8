//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, tagged enums with explicit
//! discriminants, and a single result envelope. Conversions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use showcase_core::{ApiResponse, CommandQueue, Error, Session, UserRecord};

/// Opaque handle to a running session. C callers receive a pointer to this
/// and pass it back into every FFI function.
///
/// View changes land in `queue` until the host drains them with
/// `showcase_take_view_commands`.
pub struct FfiSession {
    pub(crate) session: Session,
    pub(crate) queue: CommandQueue,
}

impl FfiSession {
    pub(crate) fn new(session: Session) -> Self {
        Self {
            session,
            queue: CommandQueue::new(),
        }
    }
}

/// Copy a Rust string into a heap C string. Interior NULs are dropped
/// rather than failing the call.
pub(crate) fn to_c_string(s: impl Into<String>) -> *mut c_char {
    let mut s: String = s.into();
    s.retain(|c| c != '\0');
    CString::new(s).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Dispatch output
// ---------------------------------------------------------------------------

/// A simulated response: HTTP status plus the payload as a JSON C string.
#[repr(C)]
pub struct FfiApiResponse {
    pub status: u16,
    pub payload_json: *mut c_char,
}

impl FfiApiResponse {
    pub(crate) fn from_core(response: &ApiResponse) -> *mut Self {
        let ffi = Box::new(FfiApiResponse {
            status: response.status,
            payload_json: to_c_string(response.payload.to_string()),
        });
        Box::into_raw(ffi)
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Validation = 1,
    NotFound = 2,
    Navigation = 3,
    Config = 4,
    Other = 5,
    Panic = 6,
    NullArg = 7,
    InvalidUtf8 = 8,
}

impl From<&Error> for FfiErrorCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Validation(_) => FfiErrorCode::Validation,
            Error::NotFound(_) => FfiErrorCode::NotFound,
            Error::Navigation(_) => FfiErrorCode::Navigation,
            Error::Config(_) => FfiErrorCode::Config,
            Error::Parse(_) | Error::Method(_) | Error::View(_) => FfiErrorCode::Other,
        }
    }
}

/// Tag that tells `showcase_free_result` what `FfiResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    User = 1,
}

/// A user record exposed to C.
#[repr(C)]
pub struct FfiUser {
    pub id: u64,
    pub name: *mut c_char,
    pub email: *mut c_char,
}

/// Result envelope for user mutations and navigation.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the payload tagged by `data_tag` (possibly `None`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        data_tag: FfiDataTag,
        data: *mut c_void,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code,
            error_message,
            data_tag,
            data,
        }))
    }

    /// Build a success result carrying a single `FfiUser`.
    pub(crate) fn ok_user(record: UserRecord) -> *mut Self {
        let user = Box::new(FfiUser {
            id: record.id,
            name: to_c_string(record.name),
            email: to_c_string(record.email),
        });
        Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            FfiDataTag::User,
            Box::into_raw(user) as *mut c_void,
        )
    }

    /// Build a success result with no data payload.
    pub(crate) fn ok_empty() -> *mut Self {
        Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result from any core error.
    pub(crate) fn from_error(err: impl Into<Error>) -> *mut Self {
        let err = err.into();
        Self::boxed(
            FfiErrorCode::from(&err),
            to_c_string(err.to_string()),
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::NullArg,
            to_c_string(format!("null argument: {name}")),
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result for an argument that is not valid UTF-8.
    pub(crate) fn invalid_utf8(name: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::InvalidUtf8,
            to_c_string(format!("argument is not valid UTF-8: {name}")),
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::Panic,
            to_c_string(msg),
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }
}
