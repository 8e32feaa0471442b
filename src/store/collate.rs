//! Locale-aware-ish string ordering for display names.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Primary collation key: decomposed, combining marks dropped, lowercased.
fn fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Compare two display names the way a reader expects to see them listed.
///
/// "Åland Islands" sorts with the A's and "Curaçao" before "Cyprus"; names
/// that fold to the same key fall back to code-point order so the result is
/// a total order.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    fold(a).cmp(fold(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diacritics_sort_with_base_letter() {
        let mut names = vec!["Zambia", "Åland Islands", "Albania", "Austria"];
        names.sort_by(|a, b| locale_compare(a, b));
        assert_eq!(names, vec!["Åland Islands", "Albania", "Austria", "Zambia"]);
    }

    #[test]
    fn test_case_is_ignored_before_tiebreak() {
        assert_eq!(locale_compare("egypt", "Eritrea"), Ordering::Less);
        assert_eq!(locale_compare("Curaçao", "Cyprus"), Ordering::Less);
    }

    #[test]
    fn test_equal_keys_are_still_ordered() {
        assert_ne!(locale_compare("Cote", "Côte"), Ordering::Equal);
        assert_eq!(locale_compare("Chad", "Chad"), Ordering::Equal);
    }
}
