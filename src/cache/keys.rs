//! Cache key strategy.
//!
//! Three disjoint key families, each with its own prefix:
//! `detail:{id}`, `list:all` and `search:{query}:{location}`.

use std::fmt;

use crate::models::PropertyId;

/// Prefix of every detail key.
pub const DETAIL_PREFIX: &str = "detail:";

/// Prefix of every search key, used for bulk eviction.
pub const SEARCH_PREFIX: &str = "search:";

const LIST_ALL: &str = "list:all";

/// Key for one property by id.
#[must_use]
pub fn detail_key(id: PropertyId) -> String {
    format!("{}{}", DETAIL_PREFIX, id)
}

/// Key for the full most-recent-first listing.
#[must_use]
pub fn list_key() -> String {
    LIST_ALL.to_string()
}

/// Key for a search by query and location.
///
/// Components are kept verbatim (case-sensitive) except that `\` and `:` are
/// backslash-escaped, so `("a:b", "c")` and `("a", "b:c")` stay distinct.
#[must_use]
pub fn search_key(query: &str, location: &str) -> String {
    format!("{}{}:{}", SEARCH_PREFIX, escape(query), escape(location))
}

fn escape(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    for ch in component.chars() {
        if ch == '\\' || ch == ':' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

// == Key Family ==
/// Query shape a key belongs to. Selects the TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFamily {
    Detail,
    List,
    Search,
}

impl fmt::Display for KeyFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyFamily::Detail => "detail",
            KeyFamily::List => "list",
            KeyFamily::Search => "search",
        };
        f.write_str(name)
    }
}

// == Cache Key ==
/// A logical query, rendered to its key string with [`CacheKey::render`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Detail(PropertyId),
    List,
    Search { query: String, location: String },
}

impl CacheKey {
    pub fn search(query: impl Into<String>, location: impl Into<String>) -> Self {
        CacheKey::Search {
            query: query.into(),
            location: location.into(),
        }
    }

    pub fn family(&self) -> KeyFamily {
        match self {
            CacheKey::Detail(_) => KeyFamily::Detail,
            CacheKey::List => KeyFamily::List,
            CacheKey::Search { .. } => KeyFamily::Search,
        }
    }

    pub fn render(&self) -> String {
        match self {
            CacheKey::Detail(id) => detail_key(*id),
            CacheKey::List => list_key(),
            CacheKey::Search { query, location } => search_key(query, location),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_key() {
        assert_eq!(detail_key(PropertyId(42)), "detail:42");
    }

    #[test]
    fn test_list_key() {
        assert_eq!(list_key(), "list:all");
    }

    #[test]
    fn test_search_key_plain() {
        assert_eq!(search_key("villa", "Downtown"), "search:villa:Downtown");
        assert_eq!(search_key("", "Downtown"), "search::Downtown");
        assert_eq!(search_key("villa", ""), "search:villa:");
    }

    #[test]
    fn test_search_key_is_case_sensitive() {
        assert_ne!(search_key("Villa", ""), search_key("villa", ""));
    }

    #[test]
    fn test_search_key_separator_does_not_collide() {
        assert_ne!(search_key("a:b", "c"), search_key("a", "b:c"));
        assert_ne!(search_key("a\\", ":b"), search_key("a\\:", "b"));
        assert_eq!(search_key("a:b", "c"), "search:a\\:b:c");
    }

    #[test]
    fn test_families_are_disjoint() {
        let keys = [
            CacheKey::Detail(PropertyId(1)),
            CacheKey::List,
            CacheKey::search("all", ""),
        ];
        assert!(keys[0].render().starts_with(DETAIL_PREFIX));
        assert!(keys[2].render().starts_with(SEARCH_PREFIX));
        assert!(!keys[1].render().starts_with(SEARCH_PREFIX));
        assert_eq!(keys[1].to_string(), list_key());
    }

    #[test]
    fn test_family() {
        assert_eq!(CacheKey::Detail(PropertyId(1)).family(), KeyFamily::Detail);
        assert_eq!(CacheKey::List.family(), KeyFamily::List);
        assert_eq!(CacheKey::search("q", "l").family(), KeyFamily::Search);
        assert_eq!(KeyFamily::Search.to_string(), "search");
    }
}
