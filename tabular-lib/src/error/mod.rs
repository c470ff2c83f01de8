//! Error types

mod accessor;
mod comparator;
mod config;
mod field;
mod table;

pub use accessor::*;
pub use comparator::*;
pub use config::*;
pub use field::*;
pub use table::*;

use std::any::Any;

/// Extract a human-readable message from a panic payload.
///
/// Panics can carry either `&str` or `String` payloads. Anything else falls
/// back to a generic message.
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_str() {
        let panic: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(panic.as_ref()), "boom");
    }

    #[test]
    fn test_panic_message_string() {
        let panic: Box<dyn Any + Send> = Box::new(String::from("boom"));
        assert_eq!(panic_message(panic.as_ref()), "boom");
    }

    #[test]
    fn test_panic_message_unknown() {
        let panic: Box<dyn Any + Send> = Box::new(42i32);
        assert_eq!(panic_message(panic.as_ref()), "Unknown panic");
    }
}
