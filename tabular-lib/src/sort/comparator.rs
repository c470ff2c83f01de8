//! Column comparators.
//!
//! Every comparator orders two resolved cell values. Built-in comparators
//! treat [`Value::Null`] as greater than any present value, so a column
//! without an explicit no-value policy still sorts missing cells last when
//! ascending.

use std::cmp::Ordering;
use std::fmt;
use std::panic;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::ComparatorRegistry;
use super::collate::alphanumeric_cmp;
use super::collate::caseless_cmp;
use super::collate::locale_cmp;
use crate::error::panic_message;
use crate::model::Value;

static NULL: Value = Value::Null;

/// Signature shared by all custom comparators.
pub type CompareFn = dyn Fn(&Value, &Value) -> Result<Ordering, String> + Send + Sync;

/// A caller-supplied comparison function.
///
/// Cheap to clone. A panic inside the function is caught and reported as an
/// error, the same as an `Err` returned from a fallible comparator. The
/// panic hook still runs, so expected failures belong in
/// [`CustomComparator::fallible`].
#[derive(Clone)]
pub struct CustomComparator(Arc<CompareFn>);

impl CustomComparator {
    /// Wraps an infallible comparison function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        Self(Arc::new(move |a: &Value, b: &Value| -> Result<Ordering, String> {
            Ok(f(a, b))
        }))
    }

    /// Wraps a comparison function that may fail.
    pub fn fallible<F, E>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Ordering, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self(Arc::new(move |a: &Value, b: &Value| -> Result<Ordering, String> {
            f(a, b).map_err(|e| e.to_string())
        }))
    }

    /// Runs the comparison.
    pub fn compare(&self, a: &Value, b: &Value) -> Result<Ordering, String> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.0)(a, b))) {
            Ok(result) => result,
            Err(payload) => Err(format!("panicked: {}", panic_message(&*payload))),
        }
    }
}

impl fmt::Debug for CustomComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomComparator(..)")
    }
}

/// The ordering rule a column declares.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use tabular_lib::model::Value;
/// use tabular_lib::sort::{Comparator, ComparatorRegistry};
///
/// let status = Comparator::fixed_order(["Active", "Pending", "Inactive"]);
/// let registry = ComparatorRegistry::new();
///
/// let ord = status
///     .compare(&Value::from("Inactive"), &Value::from("Active"), &registry)
///     .unwrap();
/// assert_eq!(ord, Ordering::Greater);
/// ```
#[derive(Debug, Clone, Default)]
pub enum Comparator {
    /// Natural order of the value type. Registered as `basic`.
    #[default]
    Natural,
    /// Case-insensitive, locale-style text order. Registered as `text`.
    Text,
    /// Code point text order. Registered as `textCaseSensitive`.
    TextCaseSensitive,
    /// Digit-aware, case-insensitive text order. Registered as `alphanumeric`.
    Alphanumeric,
    /// Digit-aware, case-sensitive text order. Registered as
    /// `alphanumericCaseSensitive`.
    AlphanumericCaseSensitive,
    /// Chronological order. Registered as `datetime`.
    Datetime,
    /// Position in a declared priority list. Unlisted values sort after all
    /// listed ones.
    FixedOrder(Vec<Value>),
    /// Compare a sub-field of a structured value.
    Nested {
        /// Dot-separated path inside the value.
        path: String,
        /// Ordering applied to the sub-field.
        by: Box<Comparator>,
    },
    /// A comparator looked up by name in the registry.
    Named(String),
    /// A caller-supplied function.
    Custom(CustomComparator),
}

impl Comparator {
    /// Orders categorical values by their position in `order`.
    pub fn fixed_order<I, V>(order: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Comparator::FixedOrder(order.into_iter().map(Into::into).collect())
    }

    /// Orders structured values by the sub-field at `path`, in natural order
    /// (locale-style for strings).
    pub fn nested(path: impl Into<String>) -> Self {
        Self::nested_by(path, Comparator::Natural)
    }

    /// Orders structured values by the sub-field at `path` using `by`.
    pub fn nested_by(path: impl Into<String>, by: Comparator) -> Self {
        Comparator::Nested {
            path: path.into(),
            by: Box::new(by),
        }
    }

    /// Refers to a comparator by name.
    pub fn named(name: impl Into<String>) -> Self {
        Comparator::Named(name.into())
    }

    /// Wraps an infallible comparison function.
    ///
    /// A panic becomes a [`ComparatorFault`](crate::error::ComparatorFault),
    /// yet the panic hook still prints to stderr before it is caught. Prefer
    /// [`Comparator::try_custom`] for comparisons that can fail.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        Comparator::Custom(CustomComparator::new(f))
    }

    /// Wraps a comparison function that may fail.
    pub fn try_custom<F, E>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Ordering, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Comparator::Custom(CustomComparator::fallible(f))
    }

    /// Returns the built-in comparator registered under `name`.
    pub fn builtin(name: &str) -> Option<Comparator> {
        match name {
            "basic" => Some(Comparator::Natural),
            "text" => Some(Comparator::Text),
            "textCaseSensitive" => Some(Comparator::TextCaseSensitive),
            "alphanumeric" => Some(Comparator::Alphanumeric),
            "alphanumericCaseSensitive" => Some(Comparator::AlphanumericCaseSensitive),
            "datetime" => Some(Comparator::Datetime),
            _ => None,
        }
    }

    /// Names of all built-in comparators.
    pub const BUILTIN_NAMES: [&'static str; 6] = [
        "basic",
        "text",
        "textCaseSensitive",
        "alphanumeric",
        "alphanumericCaseSensitive",
        "datetime",
    ];

    /// Collects the registry names this comparator depends on.
    pub(crate) fn named_dependencies<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Comparator::Named(name) => out.push(name),
            Comparator::Nested { by, .. } => by.named_dependencies(out),
            _ => {}
        }
    }

    /// Compares two values.
    ///
    /// Only custom comparators can fail. An unregistered name is reported as
    /// an error too, though tables reject those at construction.
    pub fn compare(
        &self,
        a: &Value,
        b: &Value,
        registry: &ComparatorRegistry,
    ) -> Result<Ordering, String> {
        match self {
            Comparator::Natural => Ok(natural_cmp(a, b)),
            Comparator::Text => Ok(text_cmp(a, b, true)),
            Comparator::TextCaseSensitive => Ok(text_cmp(a, b, false)),
            Comparator::Alphanumeric => Ok(alphanumeric_values_cmp(a, b, false)),
            Comparator::AlphanumericCaseSensitive => Ok(alphanumeric_values_cmp(a, b, true)),
            Comparator::Datetime => Ok(datetime_cmp(a, b)),
            Comparator::FixedOrder(order) => Ok(fixed_order_cmp(order, a, b)),
            Comparator::Nested { path, by } => {
                let a = a.path(path).unwrap_or(&NULL);
                let b = b.path(path).unwrap_or(&NULL);
                by.compare(a, b, registry)
            }
            Comparator::Named(name) => match registry.lookup(name) {
                Some(resolved) => resolved.compare(a, b, registry),
                None => Err(format!("comparator '{}' is not registered", name)),
            },
            Comparator::Custom(custom) => custom.compare(a, b),
        }
    }
}

// =============================================================================
// Built-in orderings
// =============================================================================

/// Orders a missing value after any present value.
fn nulls_last(a: &Value, b: &Value) -> Option<Ordering> {
    match (a.is_null(), b.is_null()) {
        (true, true) => Some(Ordering::Equal),
        (true, false) => Some(Ordering::Greater),
        (false, true) => Some(Ordering::Less),
        (false, false) => None,
    }
}

/// Natural order of two values.
///
/// Numbers compare numerically across `Int`, `Long`, `Float` and `Decimal`;
/// strings compare with [`locale_cmp`]; timestamps chronologically; lists
/// element by element. Records have no natural order and compare equal.
/// Values of different kinds order by kind so the result stays total.
pub fn natural_cmp(a: &Value, b: &Value) -> Ordering {
    if let Some(ord) = nulls_last(a, b) {
        return ord;
    }
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => locale_cmp(x, y),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::Record(_), Value::Record(_)) => Ordering::Equal,
        (Value::List(x), Value::List(y)) => list_cmp(x, y),
        _ if a.is_number() && b.is_number() => numeric_cmp(a, b),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn list_cmp(a: &[Value], b: &[Value]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        let ord = natural_cmp(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Decimal(_) => 1,
        Value::String(_) => 2,
        Value::DateTime(_) => 3,
        Value::List(_) => 4,
        Value::Record(_) => 5,
        Value::Null => 6,
    }
}

enum Number {
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
}

fn as_number(value: &Value) -> Option<Number> {
    match value {
        Value::Int(n) => Some(Number::Integer(i64::from(*n))),
        Value::Long(n) => Some(Number::Integer(*n)),
        Value::Float(n) => Some(Number::Float(*n)),
        Value::Decimal(d) => Some(Number::Decimal(*d)),
        _ => None,
    }
}

fn numeric_cmp(a: &Value, b: &Value) -> Ordering {
    let (Some(x), Some(y)) = (as_number(a), as_number(b)) else {
        return Ordering::Equal;
    };
    match (x, y) {
        (Number::Integer(x), Number::Integer(y)) => x.cmp(&y),
        (Number::Decimal(x), Number::Decimal(y)) => x.cmp(&y),
        (Number::Integer(x), Number::Decimal(y)) => Decimal::from(x).cmp(&y),
        (Number::Decimal(x), Number::Integer(y)) => x.cmp(&Decimal::from(y)),
        (x, y) => float_cmp(to_f64(x), to_f64(y)),
    }
}

fn to_f64(n: Number) -> f64 {
    match n {
        Number::Integer(i) => i as f64,
        Number::Float(f) => f,
        Number::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
    }
}

/// NaN sorts after every number and equal to itself.
fn float_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

fn text_of(value: &Value) -> std::borrow::Cow<'_, str> {
    match value {
        Value::String(s) => std::borrow::Cow::Borrowed(s.as_str()),
        other => std::borrow::Cow::Owned(other.to_string()),
    }
}

fn text_cmp(a: &Value, b: &Value, caseless: bool) -> Ordering {
    if let Some(ord) = nulls_last(a, b) {
        return ord;
    }
    let (a, b) = (text_of(a), text_of(b));
    if caseless {
        caseless_cmp(&a, &b).then_with(|| locale_cmp(&a, &b))
    } else {
        a.cmp(&b)
    }
}

fn alphanumeric_values_cmp(a: &Value, b: &Value, case_sensitive: bool) -> Ordering {
    if let Some(ord) = nulls_last(a, b) {
        return ord;
    }
    alphanumeric_cmp(&text_of(a), &text_of(b), case_sensitive)
}

/// The instant a value denotes. RFC 3339 strings are parsed.
fn as_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::DateTime(dt) => Some(*dt),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    }
}

fn datetime_cmp(a: &Value, b: &Value) -> Ordering {
    match (as_instant(a), as_instant(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Ranks by the first listed value that is naturally equal, so `Int(1)`,
/// `Long(1)` and `Decimal(1)` all match the same entry.
fn fixed_order_cmp(order: &[Value], a: &Value, b: &Value) -> Ordering {
    let rank = |v: &Value| order.iter().position(|o| natural_cmp(o, v) == Ordering::Equal);
    match (rank(a), rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
