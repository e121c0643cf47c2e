//! FFI bindings for the Neulish engine
//!
//! This module provides C-compatible functions for calling the engine from other
//! runtimes. All functions take and return null-terminated C strings holding JSON.
//! Returned strings are allocated here and must be freed with `neulish_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::error::EngineError;
use crate::pipeline::{corporate_metrics_json, recommend_json, weekly_summary_json};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Run a JSON boundary function over a C string argument
unsafe fn call_json(
    json: *const c_char,
    f: fn(&str) -> Result<String, EngineError>,
) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match f(&json_str) {
        Ok(result) => string_to_cstr(&result),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Build a recommendation plan from a check-in JSON object.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `neulish_free_string`.
/// - Returns NULL on error; call `neulish_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn neulish_recommend(json: *const c_char) -> *mut c_char {
    call_json(json, recommend_json)
}

/// Summarize a JSON array of day records.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `neulish_free_string`.
/// - Returns NULL on error; call `neulish_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn neulish_weekly_summary(json: *const c_char) -> *mut c_char {
    call_json(json, weekly_summary_json)
}

/// Compute corporate metrics from a JSON array of user week records.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `neulish_free_string`.
/// - Returns NULL on error; call `neulish_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn neulish_corporate_metrics(json: *const c_char) -> *mut c_char {
    call_json(json, corporate_metrics_json)
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by a Neulish function.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Neulish function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn neulish_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next Neulish function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn neulish_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the engine version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn neulish_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_ffi_recommend() {
        let json = CString::new(r#"{"time_of_day": "night"}"#).unwrap();

        unsafe {
            let result = neulish_recommend(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            assert!(result_str.contains("Sleep Wind-Down"));
            assert!(result_str.contains("\"confidence_label\":\"Gentle\""));

            neulish_free_string(result);
            assert!(neulish_last_error().is_null());
        }
    }

    #[test]
    fn test_ffi_summaries() {
        let week = CString::new(r#"[{"sleep_duration": 7, "stress": 2}]"#).unwrap();
        let users = CString::new(r#"[{"sessions": 2, "avg_stress": 3}]"#).unwrap();

        unsafe {
            let summary = neulish_weekly_summary(week.as_ptr());
            assert!(!summary.is_null());
            assert!(CStr::from_ptr(summary).to_str().unwrap().contains("Steady"));
            neulish_free_string(summary);

            let metrics = neulish_corporate_metrics(users.as_ptr());
            assert!(!metrics.is_null());
            assert!(CStr::from_ptr(metrics)
                .to_str()
                .unwrap()
                .contains("\"active_users\":1"));
            neulish_free_string(metrics);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        unsafe {
            let invalid_json = CString::new("not json").unwrap();
            let result = neulish_recommend(invalid_json.as_ptr());
            assert!(result.is_null());

            let error = neulish_last_error();
            assert!(!error.is_null());
            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(error_str.starts_with("Invalid JSON"));

            let result = neulish_weekly_summary(ptr::null());
            assert!(result.is_null());
            let error_str = CStr::from_ptr(neulish_last_error()).to_str().unwrap();
            assert_eq!(error_str, "Invalid JSON string pointer");
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = neulish_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert_eq!(version_str, env!("CARGO_PKG_VERSION"));
        }
    }
}
