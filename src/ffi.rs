//! FFI interface for C++ interop
//!
//! Match records cross the boundary as JSON strings.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::config::FetchConfig;
use crate::error::Result;
use crate::extractors::parse_match;
use crate::fetch::fetch_match;
use crate::model::MatchInfo;

/// Result struct returned to C++
/// Both pointers are owned by Rust and must be freed via free_protocol_result
#[repr(C)]
pub struct ProtocolResultFFI {
    /// JSON-serialized MatchInfo (null-terminated)
    pub json_ptr: *mut c_char,
    /// Error message if extraction failed (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Extract a match protocol from an HTML page.
///
/// # Arguments
/// * `html_ptr` - Pointer to HTML content (UTF-8, not necessarily null-terminated)
/// * `html_len` - Length of HTML content in bytes
///
/// # Returns
/// ProtocolResultFFI with either json_ptr set (success) or error_ptr set (failure)
///
/// # Safety
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - Caller must free the result via `free_protocol_result`
#[no_mangle]
pub unsafe extern "C" fn extract_match_from_html(
    html_ptr: *const c_char,
    html_len: usize,
) -> ProtocolResultFFI {
    let html = if html_ptr.is_null() || html_len == 0 {
        String::new()
    } else {
        let slice = std::slice::from_raw_parts(html_ptr as *const u8, html_len);
        match std::str::from_utf8(slice) {
            Ok(s) => s.to_string(),
            Err(_) => return make_error_result("Invalid UTF-8 in HTML content"),
        }
    };

    to_ffi_result(parse_match(&html))
}

/// Fetch and extract a match protocol by id.
///
/// `config_json` may be null to use the default `FetchConfig`.
///
/// # Safety
/// - `config_json` must be null or a valid null-terminated C string
/// - Caller must free the result via `free_protocol_result`
#[no_mangle]
pub unsafe extern "C" fn fetch_match_ffi(
    match_id: u32,
    config_json: *const c_char,
) -> ProtocolResultFFI {
    let config = if config_json.is_null() {
        FetchConfig::default()
    } else {
        let json = match CStr::from_ptr(config_json).to_str() {
            Ok(s) => s,
            Err(_) => return make_error_result("Invalid UTF-8 in config JSON"),
        };
        match FetchConfig::from_json(json) {
            Ok(c) => c,
            Err(e) => return make_error_result(&format!("Failed to parse config JSON: {}", e)),
        }
    };

    to_ffi_result(fetch_match(&config, match_id))
}

/// Free a ProtocolResultFFI returned by this module
///
/// # Safety
/// - `result` must have been returned by `extract_match_from_html` or `fetch_match_ffi`
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn free_protocol_result(result: ProtocolResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

fn to_ffi_result(result: Result<MatchInfo>) -> ProtocolResultFFI {
    let info = match result {
        Ok(info) => info,
        Err(e) => return make_error_result(&e.to_string()),
    };

    match serde_json::to_string(&info) {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => ProtocolResultFFI {
                json_ptr: cstr.into_raw(),
                error_ptr: ptr::null_mut(),
            },
            Err(_) => make_error_result("Result JSON contains null bytes"),
        },
        Err(e) => make_error_result(&format!("Failed to serialize result: {}", e)),
    }
}

// Helper to create error result
fn make_error_result(msg: &str) -> ProtocolResultFFI {
    let error_cstr = CString::new(msg.replace('\0', ""))
        .unwrap_or_else(|_| CString::from(c"Unknown error"));
    ProtocolResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr: error_cstr.into_raw(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take(result: ProtocolResultFFI) -> (Option<String>, Option<String>) {
        let read = |p: *mut c_char| {
            (!p.is_null()).then(|| unsafe { CStr::from_ptr(p) }.to_string_lossy().into_owned())
        };
        let out = (read(result.json_ptr), read(result.error_ptr));
        unsafe { free_protocol_result(result) };
        out
    }

    #[test]
    fn test_extract_match_from_html() {
        let html = include_str!("../tests/fixtures/protocol.html");
        let result = unsafe { extract_match_from_html(html.as_ptr() as *const c_char, html.len()) };
        let (json, error) = take(result);

        assert!(error.is_none());
        let value: serde_json::Value = serde_json::from_str(&json.unwrap()).unwrap();
        assert_eq!(value["home_score"], 2);
        assert_eq!(value["home_team"]["name"], "RL. Home team");
        assert_eq!(value["events"][0]["event_type"], "goal");
        assert_eq!(value["events"][0]["data"]["penalty"], false);
        assert_eq!(value["events"].as_array().unwrap().len(), 6);

        let back: MatchInfo = serde_json::from_value(value).unwrap();
        assert_eq!(back, parse_match(html).unwrap());
    }

    #[test]
    fn test_extract_error() {
        let result = unsafe { extract_match_from_html(ptr::null(), 0) };
        let (json, error) = take(result);

        assert!(json.is_none());
        assert_eq!(error.as_deref(), Some("Score not found"));
    }

    #[test]
    fn test_fetch_bad_config() {
        let config = c"{\"timeout_secs\": \"soon\"}";
        let result = unsafe { fetch_match_ffi(1, config.as_ptr()) };
        let (json, error) = take(result);

        assert!(json.is_none());
        assert!(error.unwrap().starts_with("Failed to parse config JSON"));
    }
}
