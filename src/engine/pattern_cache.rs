//! Thread-local cache of compiled, start-anchored patterns
//!
//! Pattern rules match only at the scan offset, so every pattern is compiled
//! as `^(?:pattern)`. Building the same pattern twice on one thread reuses
//! the compiled program.

use hashbrown::HashMap;
use regex::Regex;
use std::cell::RefCell;

thread_local! {
    static PATTERNS: RefCell<HashMap<String, Regex>> = RefCell::new(HashMap::new());
}

/// Get or compile the anchored form of `pattern`
pub fn get_or_compile(pattern: &str) -> Result<Regex, regex::Error> {
    PATTERNS.with(|cache| {
        if let Some(regex) = cache.borrow().get(pattern) {
            return Ok(regex.clone());
        }

        let regex = Regex::new(&format!("^(?:{})", pattern))?;
        cache
            .borrow_mut()
            .insert(pattern.to_string(), regex.clone());
        Ok(regex)
    })
}

/// Drop every compiled pattern on this thread
pub fn clear_cache() {
    PATTERNS.with(|cache| cache.borrow_mut().clear());
}

/// Number of compiled patterns on this thread
pub fn cache_size() -> usize {
    PATTERNS.with(|cache| cache.borrow().len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_compilation() {
        clear_cache();

        assert!(get_or_compile("[0-9]+").is_ok());
        assert_eq!(cache_size(), 1);

        assert!(get_or_compile("[0-9]+").is_ok());
        assert_eq!(cache_size(), 1);

        assert!(get_or_compile("[a-z]+").is_ok());
        assert_eq!(cache_size(), 2);
    }

    #[test]
    fn test_invalid_pattern_not_cached() {
        clear_cache();

        assert!(get_or_compile("[invalid").is_err());
        assert_eq!(cache_size(), 0);
    }

    #[test]
    fn test_anchored() {
        let r = get_or_compile("[a-z]+").unwrap();
        assert_eq!(r.find("abc1").map(|m| m.as_str()), Some("abc"));
        assert!(r.find("1abc").is_none());
    }

    #[test]
    fn test_alternation_stays_anchored() {
        let r = get_or_compile("a|b").unwrap();
        assert!(r.find("xb").is_none());
    }
}
