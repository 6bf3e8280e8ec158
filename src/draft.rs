//! Draft store and initial-value reconciliation
//!
//! The draft is the single source of truth for the text currently being
//! edited, independent of the host's committed value. It is seeded once at
//! construction and afterwards only two things may write it: user edits, and
//! a host-initiated reset (the host's default value changing to a defined
//! value, which wins over any unsaved edits at that moment).

use log::debug;

/// Owned draft state for one widget instance.
#[derive(Debug, Clone)]
pub struct DraftStore {
    /// The full current editor content.
    content: String,
    /// Last host default observed, so only a *change* triggers a reseed.
    last_seen_default: Option<String>,
    /// Incremented on every content change, whether a user edit or a
    /// host-initiated overwrite. Cache keys (the preview's parsed document)
    /// derive from this.
    version: u64,
}

impl DraftStore {
    /// Seed the draft from host state.
    ///
    /// Priority: committed value, then host default, then empty; first
    /// non-empty wins.
    pub fn seed(committed: Option<String>, default_value: Option<String>) -> Self {
        let content = committed
            .filter(|s| !s.is_empty())
            .or_else(|| default_value.clone().filter(|s| !s.is_empty()))
            .unwrap_or_default();
        debug!("draft seeded ({} bytes)", content.len());
        Self {
            content,
            last_seen_default: default_value,
            version: 0,
        }
    }

    /// The current draft content.
    pub fn current(&self) -> &str {
        &self.content
    }

    /// Record a user edit.
    pub fn set(&mut self, next: String) {
        if next != self.content {
            self.content = next;
            self.version = self.version.wrapping_add(1);
        }
    }

    /// Reconcile against the host's current default value.
    ///
    /// When the observed default has changed to a defined value since the
    /// last call, the draft is unconditionally overwritten: a host-initiated
    /// reset that takes priority over unsaved local edits. Returns whether an
    /// overwrite happened. No other external signal may overwrite the draft.
    pub fn reconcile_default(&mut self, observed: Option<String>) -> bool {
        if observed == self.last_seen_default {
            return false;
        }
        let changed_to_defined = observed.is_some();
        self.last_seen_default = observed.clone();
        if let Some(new_default) = observed {
            debug!("host default changed, resetting draft");
            self.content = new_default;
            self.version = self.version.wrapping_add(1);
        }
        changed_to_defined
    }

    /// Content-change counter, see the field docs.
    pub fn version(&self) -> u64 {
        self.version
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_prefers_committed_value() {
        // Committed "A" beats default "B"
        let draft = DraftStore::seed(Some("A".to_string()), Some("B".to_string()));
        assert_eq!(draft.current(), "A");
    }

    #[test]
    fn test_seed_falls_back_to_default() {
        // Empty/undefined committed falls back to the default
        let draft = DraftStore::seed(None, Some("B".to_string()));
        assert_eq!(draft.current(), "B");

        let draft = DraftStore::seed(Some(String::new()), Some("B".to_string()));
        assert_eq!(draft.current(), "B");
    }

    #[test]
    fn test_seed_empty_when_nothing_defined() {
        let draft = DraftStore::seed(None, None);
        assert_eq!(draft.current(), "");
    }

    #[test]
    fn test_reseed_overwrites_unsaved_edits() {
        // Default "B" -> "C" overwrites the draft regardless of edits
        let mut draft = DraftStore::seed(None, Some("B".to_string()));
        draft.set("local unsaved edit".to_string());

        let before = draft.version();
        assert!(draft.reconcile_default(Some("C".to_string())));
        assert_eq!(draft.current(), "C");
        assert!(draft.version() > before);
    }

    #[test]
    fn test_unchanged_default_never_clobbers_edits() {
        let mut draft = DraftStore::seed(None, Some("B".to_string()));
        draft.set("local edit".to_string());

        let before = draft.version();
        assert!(!draft.reconcile_default(Some("B".to_string())));
        assert_eq!(draft.current(), "local edit");
        assert_eq!(draft.version(), before);
    }

    #[test]
    fn test_set_bumps_version() {
        let mut draft = DraftStore::seed(Some("a".to_string()), None);
        assert_eq!(draft.version(), 0);

        draft.set("ab".to_string());
        assert_eq!(draft.version(), 1);

        // writing the same content back is not a change
        draft.set("ab".to_string());
        assert_eq!(draft.version(), 1);
    }

    #[test]
    fn test_default_becoming_undefined_keeps_draft() {
        let mut draft = DraftStore::seed(None, Some("B".to_string()));
        draft.set("local edit".to_string());

        assert!(!draft.reconcile_default(None));
        assert_eq!(draft.current(), "local edit");

        // and a later defined default still resets
        assert!(draft.reconcile_default(Some("C".to_string())));
        assert_eq!(draft.current(), "C");
    }
}
