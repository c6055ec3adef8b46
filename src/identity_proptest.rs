//! Property-based tests for repository identity extraction.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::error::ErrorKind;
    use crate::identity::{RepositoryIdentity, GITHUB_PREFIX};
    use proptest::prelude::*;

    proptest! {
        /// Property: a plain owner/name url yields exactly that owner and name
        #[test]
        fn from_url_extracts_owner_and_name(
            owner in "[A-Za-z0-9][A-Za-z0-9_.-]{0,38}",
            name in "[A-Za-z0-9_.-]{1,100}",
        ) {
            let url = format!("https://github.com/{}/{}", owner, name);
            let identity = RepositoryIdentity::from_url(Some(&url)).unwrap();
            prop_assert_eq!(&identity.owner, &owner);
            prop_assert_eq!(&identity.name, &name);
        }

        /// Property: extracted segments never contain whitespace
        #[test]
        fn from_url_never_captures_whitespace(rest in "[^\\s]{1,20}/[^\\s]{1,20}( .*)?") {
            let url = format!("https://github.com/{}", rest);
            if let Ok(identity) = RepositoryIdentity::from_url(Some(&url)) {
                prop_assert!(!identity.owner.chars().any(char::is_whitespace));
                prop_assert!(!identity.name.chars().any(char::is_whitespace));
                prop_assert!(!identity.owner.is_empty());
                prop_assert!(!identity.name.is_empty());
            }
        }

        /// Property: anything without the GitHub prefix is a configuration error
        #[test]
        fn from_url_rejects_missing_prefix(url in ".*") {
            prop_assume!(!url.starts_with(GITHUB_PREFIX));
            let err = RepositoryIdentity::from_url(Some(&url)).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        }

        /// Property: extraction is deterministic
        #[test]
        fn from_url_is_deterministic(rest in ".*") {
            let url = format!("https://github.com/{}", rest);
            let first = RepositoryIdentity::from_url(Some(&url)).ok();
            let second = RepositoryIdentity::from_url(Some(&url)).ok();
            prop_assert_eq!(first, second);
        }
    }
}
