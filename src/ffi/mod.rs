//! C ABI over the field formatters and step validators, so native form
//! front-ends can share the Rust input rules.
//!
//! Strings returned as `*mut c_char` are owned by the caller and must be
//! released with [`fb_string_free`].

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::sync::OnceLock;

use serde::Serialize;
use tracing::warn;

use crate::booking::{format_field, validate_passenger, validate_payment, ValidationResult};
use crate::domain::{FormField, PassengerInfo, PaymentInfo};
use crate::errors::BookingError;

/// Semantic version of the Rust core (mirrors `Cargo.toml`).
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Semantic version of the FFI surface. Bumps when ABI/contract changes.
pub const FFI_VERSION: &str = "0.1.0";

/// Error categories surfaced across the FFI boundary.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FfiErrorCategory {
    Ok = 0,
    Validation = 1,
    Input = 2,
    Internal = 3,
}

impl From<FfiErrorCategory> for i32 {
    fn from(value: FfiErrorCategory) -> Self {
        value as i32
    }
}

pub fn classify_error(err: &BookingError) -> FfiErrorCategory {
    match err {
        BookingError::Validation(_) => FfiErrorCategory::Validation,
        BookingError::Serde(_)
        | BookingError::UnknownField(_)
        | BookingError::UnknownFilter(_)
        | BookingError::UnknownSeat(_)
        | BookingError::SeatUnavailable(_)
        | BookingError::FlightNotFound(_)
        | BookingError::InvalidConfig(_) => FfiErrorCategory::Input,
        BookingError::Io(_) => FfiErrorCategory::Internal,
    }
}

/// JSON document returned by the validation entry points.
#[derive(Debug, Serialize)]
struct ValidationReport {
    valid: bool,
    category: FfiErrorCategory,
    messages: Vec<String>,
}

impl ValidationReport {
    fn from_result(result: ValidationResult) -> Self {
        match result {
            Ok(()) => Self {
                valid: true,
                category: FfiErrorCategory::Ok,
                messages: Vec::new(),
            },
            Err(err) => Self {
                valid: false,
                category: FfiErrorCategory::Validation,
                messages: err.into_messages(),
            },
        }
    }

    fn from_error(err: &BookingError) -> Self {
        Self {
            valid: false,
            category: classify_error(err),
            messages: vec![err.to_string()],
        }
    }
}

/// Returns the core (Rust) semantic version as a C string.
#[no_mangle]
pub extern "C" fn fb_core_version() -> *const c_char {
    static CORE: OnceLock<CString> = OnceLock::new();
    CORE.get_or_init(|| CString::new(CORE_VERSION).expect("static core version"))
        .as_ptr()
}

/// Applies the input mask of `field` (e.g. `cardNumber`) to `raw` and cuts
/// the result to the field's display length, as the booking form does.
///
/// Returns null when either pointer is null, a string is not UTF-8 or the
/// field is unknown.
///
/// # Safety
/// `field` and `raw` must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn fb_format_field(field: *const c_char, raw: *const c_char) -> *mut c_char {
    let (Some(field), Some(raw)) = (read_str(field), read_str(raw)) else {
        return std::ptr::null_mut();
    };
    match field.parse::<FormField>() {
        Ok(field) => into_c_string(format_field(field, raw)),
        Err(err) => {
            warn!(%err, "ffi format request rejected");
            std::ptr::null_mut()
        }
    }
}

/// Validates a passenger JSON object (`firstName`, `lastName`, `email`,
/// `phone`, `dateOfBirth`) and returns a JSON report.
///
/// # Safety
/// `json` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn fb_validate_passenger_json(json: *const c_char) -> *mut c_char {
    validate_json(json, |raw| {
        let passenger: PassengerInfo = serde_json::from_str(raw)?;
        Ok(validate_passenger(&passenger))
    })
}

/// Validates a payment JSON object (`cardNumber`, `expiryDate`, `cvv`,
/// `cardholderName`) and returns a JSON report.
///
/// # Safety
/// `json` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn fb_validate_payment_json(json: *const c_char) -> *mut c_char {
    validate_json(json, |raw| {
        let payment: PaymentInfo = serde_json::from_str(raw)?;
        Ok(validate_payment(&payment))
    })
}

/// Releases a string previously returned by this module.
///
/// # Safety
/// `ptr` must be null or a pointer returned by one of the `fb_*` functions
/// that has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn fb_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

unsafe fn read_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

fn into_c_string(value: String) -> *mut c_char {
    CString::new(value)
        .map(CString::into_raw)
        .unwrap_or(std::ptr::null_mut())
}

unsafe fn validate_json<F>(json: *const c_char, validate: F) -> *mut c_char
where
    F: FnOnce(&str) -> Result<ValidationResult, BookingError>,
{
    let Some(raw) = read_str(json) else {
        return std::ptr::null_mut();
    };
    let report = match validate(raw) {
        Ok(result) => ValidationReport::from_result(result),
        Err(err) => ValidationReport::from_error(&err),
    };
    match serde_json::to_string(&report) {
        Ok(body) => into_c_string(body),
        Err(err) => {
            warn!(%err, "ffi validation report could not be encoded");
            std::ptr::null_mut()
        }
    }
}
