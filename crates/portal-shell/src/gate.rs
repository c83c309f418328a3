//! Navigation gate: allow-list check for every navigation the surface
//! wants to commit.
//!
//! Matching is plain substring containment on the full URL. There is no
//! scheme or host parsing, so `https://evil.com?x=example.com` passes an
//! allow-list of `["example.com"]`, and an empty entry passes everything.
//! This is not a security boundary.

use portal_types::event::NavigationIntent;

/// Fixed set of domain strings, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowList {
    entries: Vec<String>,
}

impl AllowList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// An empty entry is a substring of every URL and so allows everything.
    pub fn has_empty_entry(&self) -> bool {
        self.entries.iter().any(String::is_empty)
    }

    /// Whether `url` contains at least one entry.
    pub fn permits(&self, url: &str) -> bool {
        self.entries.iter().any(|entry| url.contains(entry.as_str()))
    }
}

/// Gate verdict for a single navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny,
}

impl Verdict {
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

/// Decides whether a navigation may proceed.
#[derive(Debug, Clone)]
pub struct NavigationGate {
    allow_list: AllowList,
}

impl NavigationGate {
    pub fn new(allow_list: AllowList) -> Self {
        Self { allow_list }
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    pub fn evaluate(&self, intent: &NavigationIntent) -> Verdict {
        if self.allow_list.permits(&intent.url) {
            Verdict::Allow
        } else {
            Verdict::Deny
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(entries: &[&str]) -> NavigationGate {
        NavigationGate::new(AllowList::new(entries.iter().copied()))
    }

    fn verdict(g: &NavigationGate, url: &str) -> Verdict {
        g.evaluate(&NavigationIntent::new(url))
    }

    #[test]
    fn allows_listed_domain() {
        let g = gate(&["example.com"]);
        assert_eq!(verdict(&g, "https://example.com/login"), Verdict::Allow);
        assert_eq!(verdict(&g, "https://www.example.com"), Verdict::Allow);
    }

    #[test]
    fn denies_unlisted_domain() {
        let g = gate(&["example.com"]);
        assert_eq!(verdict(&g, "https://other.org/"), Verdict::Deny);
    }

    #[test]
    fn substring_match_accepts_query_spoof() {
        let g = gate(&["example.com"]);
        assert_eq!(
            verdict(&g, "https://evil.com?x=example.com"),
            Verdict::Allow
        );
    }

    #[test]
    fn substring_match_accepts_suffix_spoof() {
        let g = gate(&["example.com"]);
        assert_eq!(
            verdict(&g, "https://example.com.attacker.net/"),
            Verdict::Allow
        );
    }

    #[test]
    fn match_is_case_sensitive() {
        let g = gate(&["example.com"]);
        assert_eq!(verdict(&g, "https://EXAMPLE.COM/"), Verdict::Deny);
    }

    #[test]
    fn empty_allow_list_denies_everything() {
        let g = gate(&[]);
        assert!(g.allow_list().is_empty());
        assert_eq!(verdict(&g, "https://example.com"), Verdict::Deny);
        assert_eq!(verdict(&g, ""), Verdict::Deny);
    }

    #[test]
    fn empty_entry_allows_everything() {
        let g = gate(&["example.com", ""]);
        assert!(g.allow_list().has_empty_entry());
        assert_eq!(verdict(&g, "https://anything.invalid"), Verdict::Allow);
    }

    #[test]
    fn any_entry_is_enough() {
        let g = gate(&["a.test", "b.test"]);
        assert_eq!(verdict(&g, "https://b.test/x"), Verdict::Allow);
        assert!(Verdict::Allow.is_allowed());
        assert!(!Verdict::Deny.is_allowed());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn arb_entries() -> impl Strategy<Value = Vec<String>> {
            proptest::collection::vec("[a-z]{1,6}\\.(com|org|test)", 0..5)
        }

        proptest! {
            #[test]
            fn verdict_matches_substring_definition(
                entries in arb_entries(),
                url in "https?://[a-z./?=]{0,30}",
            ) {
                let g = NavigationGate::new(AllowList::new(entries.clone()));
                let expected = entries.iter().any(|e| url.contains(e.as_str()));
                prop_assert_eq!(verdict(&g, &url).is_allowed(), expected);
            }

            #[test]
            fn listed_entry_embedded_anywhere_is_allowed(
                entries in arb_entries().prop_filter("non-empty", |e| !e.is_empty()),
                prefix in "[a-z:/.?=]{0,12}",
                suffix in "[a-z/?=&]{0,12}",
                pick in 0usize..5,
            ) {
                let entry = &entries[pick % entries.len()];
                let url = format!("{prefix}{entry}{suffix}");
                let g = NavigationGate::new(AllowList::new(entries.clone()));
                prop_assert_eq!(verdict(&g, &url), Verdict::Allow);
            }

            #[test]
            fn empty_list_never_allows(url in ".{0,40}") {
                let g = NavigationGate::new(AllowList::default());
                prop_assert_eq!(verdict(&g, &url), Verdict::Deny);
            }
        }
    }
}
