//! Accessors: how a column reads its value from a record.

use std::fmt;
use std::panic;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crate::error::panic_message;
use crate::model::Record;
use crate::model::Value;

/// Signature shared by all accessors.
pub type AccessorFn<R> = dyn Fn(&R) -> Result<Value, String> + Send + Sync;

/// Records that can be read by field path.
///
/// Paths are dot-separated (`"address.zipCode"`). A missing field is `None`,
/// which accessors turn into [`Value::Null`].
pub trait FieldLookup {
    /// Returns the value at `path`, if present.
    fn lookup(&self, path: &str) -> Option<Value>;
}

impl FieldLookup for Record {
    fn lookup(&self, path: &str) -> Option<Value> {
        self.get_path(path).cloned()
    }
}

impl FieldLookup for Value {
    fn lookup(&self, path: &str) -> Option<Value> {
        self.path(path).cloned()
    }
}

impl FieldLookup for serde_json::Value {
    fn lookup(&self, path: &str) -> Option<Value> {
        let pointer: String = path
            .split('.')
            .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
            .collect();
        self.pointer(&pointer).cloned().map(Value::from)
    }
}

/// Extraction rule for one column.
///
/// Either a field path (for records implementing [`FieldLookup`]) or an
/// arbitrary derivation. Accessors must be pure: the same record always
/// yields the same value.
pub struct Accessor<R> {
    path: Option<String>,
    resolve: Arc<AccessorFn<R>>,
}

impl<R> Accessor<R> {
    /// Derives the value with an infallible function.
    ///
    /// A panic in `f` is caught and reported as a fault, but the process
    /// panic hook still runs first and prints its report to stderr. Return
    /// errors through [`Accessor::fallible`] for failures that are expected.
    pub fn derived<F>(f: F) -> Self
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        Self {
            path: None,
            resolve: Arc::new(move |record: &R| -> Result<Value, String> { Ok(f(record)) }),
        }
    }

    /// Derives the value with a function that may fail.
    pub fn fallible<F, E>(f: F) -> Self
    where
        F: Fn(&R) -> Result<Value, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self {
            path: None,
            resolve: Arc::new(move |record: &R| -> Result<Value, String> {
                f(record).map_err(|e| e.to_string())
            }),
        }
    }

    /// The field path, for path accessors.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Evaluates the accessor.
    ///
    /// A missing field is `Ok(Value::Null)`. An error returned by the
    /// function, or a panic inside it, is `Err` with the message.
    pub fn resolve(&self, record: &R) -> Result<Value, String> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.resolve)(record))) {
            Ok(result) => result,
            Err(payload) => Err(format!("panicked: {}", panic_message(&*payload))),
        }
    }
}

impl<R: FieldLookup> Accessor<R> {
    /// Reads the field at a dot-separated path.
    pub fn path_of(path: impl Into<String>) -> Self {
        let path = path.into();
        let lookup = path.clone();
        Self {
            path: Some(path),
            resolve: Arc::new(move |record: &R| -> Result<Value, String> {
                Ok(record.lookup(&lookup).unwrap_or(Value::Null))
            }),
        }
    }
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            resolve: Arc::clone(&self.resolve),
        }
    }
}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "Accessor::Path({:?})", path),
            None => f.write_str("Accessor::Derived(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_path_accessor_on_record() {
        let record = Record::new().set("address", Record::new().set("zipCode", "78701"));
        let accessor = Accessor::<Record>::path_of("address.zipCode");
        assert_eq!(accessor.resolve(&record), Ok(Value::from("78701")));
        assert_eq!(accessor.path(), Some("address.zipCode"));
    }

    #[test]
    fn test_missing_field_is_null() {
        let accessor = Accessor::<Record>::path_of("address.zipCode");
        assert_eq!(accessor.resolve(&Record::new()), Ok(Value::Null));
    }

    #[test]
    fn test_path_accessor_on_json() {
        let record = json!({"fullName": {"firstName": "Tanner"}, "age": 30});
        let first = Accessor::<serde_json::Value>::path_of("fullName.firstName");
        let age = Accessor::<serde_json::Value>::path_of("age");
        assert_eq!(first.resolve(&record), Ok(Value::from("Tanner")));
        assert_eq!(age.resolve(&record), Ok(Value::Int(30)));
    }

    #[test]
    fn test_json_keys_with_pointer_characters() {
        let record = json!({"a/b": 1, "a~b": 2, "a": {"b": 3}, "x": {"c/d": 4}});
        let slash = Accessor::<serde_json::Value>::path_of("a/b");
        let tilde = Accessor::<serde_json::Value>::path_of("a~b");
        let nested = Accessor::<serde_json::Value>::path_of("a.b");
        let inner = Accessor::<serde_json::Value>::path_of("x.c/d");
        assert_eq!(slash.resolve(&record), Ok(Value::Int(1)));
        assert_eq!(tilde.resolve(&record), Ok(Value::Int(2)));
        assert_eq!(nested.resolve(&record), Ok(Value::Int(3)));
        assert_eq!(inner.resolve(&record), Ok(Value::Int(4)));
    }

    #[test]
    fn test_derived_is_repeatable() {
        let accessor = Accessor::derived(|r: &Record| {
            let first = r.get_path("fullName.firstName").cloned().unwrap_or_default();
            let last = r.get_path("fullName.lastName").cloned().unwrap_or_default();
            Value::from(format!("{} {}", first, last))
        });
        let record = Record::new().set(
            "fullName",
            Record::new().set("firstName", "Jane").set("lastName", "Doe"),
        );
        assert_eq!(accessor.resolve(&record), Ok(Value::from("Jane Doe")));
        assert_eq!(accessor.resolve(&record), accessor.resolve(&record));
    }

    #[test]
    fn test_fallible_error_and_panic() {
        let failing = Accessor::fallible(|_: &Record| Err::<Value, _>("no such thing"));
        assert_eq!(failing.resolve(&Record::new()), Err("no such thing".to_string()));

        let panicking = Accessor::derived(|_: &Record| -> Value { panic!("bad record") });
        let err = panicking.resolve(&Record::new()).unwrap_err();
        assert!(err.contains("bad record"));
    }
}
