// ── Query key registry ──
//
// Single source of truth for cache keys. Every cached read and every
// mutation-driven invalidation goes through these constructors, so the
// key shape is never duplicated as ad-hoc strings at call sites.
//
// Keys are hierarchical: invalidating `Domain::all()` reaches every key
// derived from it (prefix-match semantics).

use std::fmt;

/// Resource domain — the root segment of every query key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Auth,
    Spaces,
    Bookings,
    Amenities,
    FeatureFlags,
}

impl Domain {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Spaces => "spaces",
            Self::Bookings => "bookings",
            Self::Amenities => "amenities",
            Self::FeatureFlags => "feature-flags",
        }
    }

    /// The root key for this domain. Invalidation of this key reaches
    /// every key derived from it.
    pub fn all(self) -> QueryKey {
        QueryKey {
            domain: self,
            segments: Vec::new(),
        }
    }
}

/// A hierarchical cache key: a domain root plus derived segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    domain: Domain,
    segments: Vec<String>,
}

impl QueryKey {
    /// The domain this key is rooted at.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Derive a named sub-resource key (e.g. the `owned` branch of a
    /// domain, which is user-scoped and invalidated on login/logout).
    pub fn sub(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_owned());
        self
    }

    /// Derive a list key from filter pairs.
    ///
    /// Pairs are sorted by name before fingerprinting so logically-equal
    /// filters map to the same entry regardless of construction order.
    pub fn list(mut self, pairs: &[(String, String)]) -> Self {
        let mut sorted: Vec<&(String, String)> = pairs.iter().collect();
        sorted.sort();
        let fingerprint = sorted
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        self.segments.push("list".into());
        self.segments.push(fingerprint);
        self
    }

    /// Derive a detail key for a single entity.
    pub fn detail(mut self, id: &str) -> Self {
        self.segments.push("detail".into());
        self.segments.push(id.to_owned());
        self
    }

    /// Prefix-match: `a.is_prefix_of(b)` iff invalidating `a` must also
    /// invalidate `b`. A key is a prefix of itself.
    pub fn is_prefix_of(&self, other: &QueryKey) -> bool {
        self.domain == other.domain
            && self.segments.len() <= other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a == b)
    }

    // ── Named auth keys ──────────────────────────────────────────────
    //
    // The session caches exactly two auth entries; they are always
    // written together (see Portal::apply_session).

    /// The cached session user.
    pub fn auth_user() -> Self {
        Domain::Auth.all().sub("user")
    }

    /// The cached authentication status.
    pub fn auth_status() -> Self {
        Domain::Auth.all().sub("status")
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.domain.as_str())?;
        for seg in &self.segments {
            write!(f, ":{seg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pairs(p: &[(&str, &str)]) -> Vec<(String, String)> {
        p.iter().map(|(k, v)| ((*k).into(), (*v).into())).collect()
    }

    #[test]
    fn root_is_prefix_of_every_derived_key() {
        let root = Domain::Spaces.all();
        let list = Domain::Spaces.all().list(&pairs(&[("type", "studio")]));
        let detail = Domain::Spaces.all().detail("s1");
        let owned = Domain::Spaces.all().sub("owned").list(&[]);

        assert!(root.is_prefix_of(&list));
        assert!(root.is_prefix_of(&detail));
        assert!(root.is_prefix_of(&owned));
        assert!(root.is_prefix_of(&root));
    }

    #[test]
    fn sibling_keys_are_not_prefixes() {
        let list = Domain::Spaces.all().list(&[]);
        let detail = Domain::Spaces.all().detail("s1");
        assert!(!list.is_prefix_of(&detail));
        assert!(!detail.is_prefix_of(&list));
    }

    #[test]
    fn domains_never_cross() {
        let spaces = Domain::Spaces.all();
        let bookings = Domain::Bookings.all().detail("b1");
        assert!(!spaces.is_prefix_of(&bookings));
    }

    #[test]
    fn filter_order_does_not_change_the_key() {
        let a = Domain::Spaces
            .all()
            .list(&pairs(&[("type", "studio"), ("location", "Berlin")]));
        let b = Domain::Spaces
            .all()
            .list(&pairs(&[("location", "Berlin"), ("type", "studio")]));
        assert_eq!(a, b);
    }

    #[test]
    fn owned_branch_is_isolated_from_public_lists() {
        let owned = Domain::Spaces.all().sub("owned");
        let public_list = Domain::Spaces.all().list(&[]);
        let owned_list = Domain::Spaces.all().sub("owned").list(&[]);
        assert!(owned.is_prefix_of(&owned_list));
        assert!(!owned.is_prefix_of(&public_list));
    }

    #[test]
    fn display_is_colon_separated() {
        let key = Domain::Bookings.all().sub("owned").detail("b7");
        assert_eq!(key.to_string(), "bookings:owned:detail:b7");
    }
}
