use crate::toggle::{ExpansionPair, DEFAULT_DESCRIPTION_SUFFIX};
use std::sync::atomic::{AtomicUsize, Ordering};

static COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Fresh trigger/description ids for one expandable section.
///
/// Follows the page markup convention, so an enhanced page and a component
/// can share a stylesheet.
pub fn use_expansion_pair(prefix: &str) -> ExpansionPair {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    ExpansionPair::resolve(&format!("{prefix}-{n}"), None, DEFAULT_DESCRIPTION_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_are_unique_and_follow_convention() {
        let a = use_expansion_pair("section");
        let b = use_expansion_pair("section");
        assert_ne!(a.trigger_id, b.trigger_id);
        assert!(a.trigger_id.starts_with("section-"));
        assert_eq!(a.target_id, format!("{}-description", a.trigger_id));
    }
}
