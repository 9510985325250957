//! Total, locale-free text rendering of domain values.
//!
//! [`Displayable`] is the capability a value needs to be bridged into an
//! index. It is implemented for primitives, strings, chrono dates, JSON values,
//! [`FieldValue`](crate::document::field_value::FieldValue) and the common
//! containers. Types that do not implement it can be wrapped:
//!
//! - [`Shown`] renders through `Display`
//! - [`Serialized`] renders through `serde`, which gives unit enum variants
//!   their canonical serialized name
//! - [`Opaque`] always renders [`FALLBACK_TEXT`]
//!
//! [`to_display_string`] is the entry point bridges use. It never fails: a
//! panic inside a rendering impl is caught and replaced by [`FALLBACK_TEXT`].
//!
//! # Examples
//!
//! ```
//! use fieldbridge::bridge::display::{to_display_string, Serialized, FALLBACK_TEXT, Opaque};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
//! enum Status {
//!     Open,
//!     Closed,
//! }
//!
//! assert_eq!(to_display_string(&42), "42");
//! assert_eq!(to_display_string("Active"), "Active");
//! assert_eq!(to_display_string(&Serialized(Status::Open)), "OPEN");
//! assert_eq!(to_display_string(&Opaque(std::time::Instant::now())), FALLBACK_TEXT);
//! ```

use std::fmt::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::document::field_value::FieldValue;

/// Placeholder text for values that have no textual form.
pub const FALLBACK_TEXT: &str = "<opaque>";

/// A value that can be rendered as index text.
///
/// Implementations must be deterministic: the same value always renders to
/// the same text, independent of locale, time or call history.
pub trait Displayable {
    /// Render the value as text.
    fn to_text(&self) -> String;

    /// Whether the value stands for "no value".
    ///
    /// Bridges emit nothing for absent values.
    fn is_absent(&self) -> bool {
        false
    }
}

/// The textual form of an indexed value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedToken {
    /// The rendered text.
    pub text: String,
}

impl NormalizedToken {
    /// Render a value into a token.
    pub fn from_value<T: Displayable + ?Sized>(value: &T) -> Self {
        NormalizedToken {
            text: to_display_string(value),
        }
    }
}

/// Render any displayable value, substituting [`FALLBACK_TEXT`] on panic.
pub fn to_display_string<T: Displayable + ?Sized>(value: &T) -> String {
    match panic::catch_unwind(AssertUnwindSafe(|| value.to_text())) {
        Ok(text) => text,
        Err(_) => {
            log::warn!("Value rendering panicked, indexing placeholder text instead");
            FALLBACK_TEXT.to_string()
        }
    }
}

/// Render a `Display` value, returning `None` if the impl reports an error.
fn render_display<T: fmt::Display + ?Sized>(value: &T) -> Option<String> {
    let mut out = String::new();
    write!(out, "{value}").ok()?;
    Some(out)
}

macro_rules! impl_displayable_via_to_string {
    ($($t:ty),* $(,)?) => {
        $(
            impl Displayable for $t {
                fn to_text(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_displayable_via_to_string!(
    str, String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32,
    f64, NaiveDate,
);

impl Displayable for DateTime<Utc> {
    fn to_text(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl Displayable for Value {
    fn to_text(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            other => FieldValue::from_json(other.clone()).to_text(),
        }
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }
}

impl<T: Displayable> Displayable for Option<T> {
    fn to_text(&self) -> String {
        match self {
            Some(value) => value.to_text(),
            None => "null".to_string(),
        }
    }

    fn is_absent(&self) -> bool {
        self.as_ref().is_none_or(|value| value.is_absent())
    }
}

impl<T: Displayable + ?Sized> Displayable for &T {
    fn to_text(&self) -> String {
        (**self).to_text()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Displayable + ?Sized> Displayable for Box<T> {
    fn to_text(&self) -> String {
        (**self).to_text()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Displayable + ?Sized> Displayable for Arc<T> {
    fn to_text(&self) -> String {
        (**self).to_text()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Displayable> Displayable for [T] {
    fn to_text(&self) -> String {
        let mut out = String::from("[");
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&item.to_text());
        }
        out.push(']');
        out
    }
}

impl<T: Displayable> Displayable for Vec<T> {
    fn to_text(&self) -> String {
        self.as_slice().to_text()
    }
}

/// Renders a value through its `Display` impl.
///
/// A `Display` impl that returns `fmt::Error` renders [`FALLBACK_TEXT`].
#[derive(Debug, Clone, Copy)]
pub struct Shown<T>(pub T);

impl<T: fmt::Display> Displayable for Shown<T> {
    fn to_text(&self) -> String {
        render_display(&self.0).unwrap_or_else(|| FALLBACK_TEXT.to_string())
    }
}

/// Renders a value through its `serde::Serialize` impl.
///
/// Strings and unit enum variants render as their bare serialized name,
/// everything else through [`FieldValue`]'s rendering. Only a value that
/// serializes as `None` is absent; unit values, unit structs and non-finite
/// floats all render.
#[derive(Debug, Clone, Copy)]
pub struct Serialized<T>(pub T);

impl<T: Serialize> Displayable for Serialized<T> {
    fn to_text(&self) -> String {
        match FieldValue::from_serialize(&self.0) {
            Ok(value) => value.to_text(),
            Err(e) => {
                log::warn!("Value serialization failed, indexing placeholder text instead: {e}");
                FALLBACK_TEXT.to_string()
            }
        }
    }

    fn is_absent(&self) -> bool {
        matches!(FieldValue::from_serialize(&self.0), Ok(FieldValue::Null))
    }
}

/// A value with no textual form. Always renders [`FALLBACK_TEXT`].
#[derive(Debug, Clone, Copy)]
pub struct Opaque<T>(pub T);

impl<T> Displayable for Opaque<T> {
    fn to_text(&self) -> String {
        FALLBACK_TEXT.to_string()
    }
}
