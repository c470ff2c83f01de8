//! String collation used by the text comparators.

use std::cell::RefCell;
use std::cmp::Ordering;

use feruca::Collator;

thread_local! {
    static COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Locale-aware string comparison.
///
/// Ordering follows the Unicode Collation Algorithm with the CLDR root
/// tailoring, so accented letters sort next to their base letter
/// (`"Émily" < "Frank"`) and lowercase precedes uppercase on a case-only
/// difference. Case-folded then code point order break any remaining tie
/// so the result is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collate(a, b)
        .then_with(|| caseless_cmp(a, b))
        .then_with(|| case_cmp(a, b))
        .then_with(|| a.cmp(b))
}

fn collate(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator.try_borrow_mut() {
        Ok(mut collator) => collator.collate(a, b),
        Err(_) => Ordering::Equal,
    })
}

/// Case-insensitive comparison without the case tie-break.
pub fn caseless_cmp(a: &str, b: &str) -> Ordering {
    fold_case(a).cmp(fold_case(b))
}

fn fold_case(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

fn case_cmp(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

/// Compares strings by alternating runs of digits and non-digits.
///
/// Digit runs compare by numeric value (`"item2" < "item10"`), other runs
/// lexically. When a digit run meets a non-digit run the non-digit run sorts
/// first. With `case_sensitive == false` both inputs are lowercased first.
pub fn alphanumeric_cmp(a: &str, b: &str, case_sensitive: bool) -> Ordering {
    if case_sensitive {
        compare_chunks(a, b)
    } else {
        compare_chunks(&a.to_lowercase(), &b.to_lowercase())
    }
}

fn compare_chunks(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (is_digits(x), is_digits(y)) {
                    (true, true) => digits_cmp(x, y),
                    (false, false) => x.cmp(y),
                    (false, true) => Ordering::Less,
                    (true, false) => Ordering::Greater,
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn is_digits(chunk: &str) -> bool {
    chunk.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

/// Numeric comparison of two ASCII digit runs of any length.
fn digits_cmp(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Splits a string into maximal runs of ASCII digits and non-digits.
struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_cmp_ignores_case_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zebra", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_locale_cmp_lowercase_before_uppercase() {
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("Doe", "doe"), Ordering::Greater);
        assert_eq!(locale_cmp("doe", "doe"), Ordering::Equal);
    }

    #[test]
    fn test_locale_cmp_digits() {
        assert_eq!(locale_cmp("10001", "78701"), Ordering::Less);
        assert_eq!(locale_cmp("94107", "78701"), Ordering::Greater);
    }

    #[test]
    fn test_locale_cmp_accents_sort_with_base_letter() {
        assert_eq!(locale_cmp("Émily", "Frank"), Ordering::Less);
        assert_eq!(locale_cmp("Émily", "Ava"), Ordering::Greater);
        assert_eq!(locale_cmp("Zoe", "Émily"), Ordering::Greater);
        assert_eq!(locale_cmp("Peña", "Peng"), Ordering::Less);
    }

    #[test]
    fn test_locale_cmp_sorts_accented_names() {
        let mut names = vec!["Zoe", "Émily", "Frank", "Ava"];
        names.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(names, ["Ava", "Émily", "Frank", "Zoe"]);
    }

    #[test]
    fn test_locale_cmp_accent_only_difference_is_total() {
        assert_eq!(locale_cmp("e", "é"), Ordering::Less);
        assert_eq!(locale_cmp("é", "e"), Ordering::Greater);
        assert_eq!(locale_cmp("é", "é"), Ordering::Equal);
    }

    #[test]
    fn test_alphanumeric_numeric_runs() {
        assert_eq!(alphanumeric_cmp("item2", "item10", false), Ordering::Less);
        assert_eq!(alphanumeric_cmp("item10", "item9", false), Ordering::Greater);
        assert_eq!(alphanumeric_cmp("v007", "v7", false), Ordering::Equal);
    }

    #[test]
    fn test_alphanumeric_text_before_number() {
        assert_eq!(alphanumeric_cmp("a", "1", false), Ordering::Less);
        assert_eq!(alphanumeric_cmp("1", "a", false), Ordering::Greater);
    }

    #[test]
    fn test_alphanumeric_prefix_is_smaller() {
        assert_eq!(alphanumeric_cmp("item", "item1", false), Ordering::Less);
    }

    #[test]
    fn test_alphanumeric_case() {
        assert_eq!(alphanumeric_cmp("B", "a", false), Ordering::Greater);
        assert_eq!(alphanumeric_cmp("B", "a", true), Ordering::Less);
    }

    #[test]
    fn test_digit_runs_longer_than_u64() {
        let a = "n99999999999999999999999";
        let b = "n100000000000000000000000";
        assert_eq!(alphanumeric_cmp(a, b, true), Ordering::Less);
    }
}
