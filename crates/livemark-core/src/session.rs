//! Last-writer-wins coordination for hosts that decorate off the UI thread.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::extract::Extractor;
use crate::filter::{DecorationMap, filter_decorations_indexed};
use crate::text::SourceText;
use crate::types::Selection;

/// Ticket for one decoration request. Later requests have larger revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Revision(u64);

impl Revision {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Runs extract + filter passes and discards results that were superseded
/// while they were being computed.
///
/// Every document or selection change calls [`PreviewSession::request`];
/// whichever thread then calls [`PreviewSession::compute`] with that revision
/// gets `None` back if a newer request arrived in the meantime.
#[derive(Debug, Default)]
pub struct PreviewSession {
    extractor: Extractor,
    latest: AtomicU64,
}

impl PreviewSession {
    pub fn new(extractor: Extractor) -> Self {
        Self {
            extractor,
            latest: AtomicU64::new(0),
        }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Register a new request, superseding all earlier ones.
    pub fn request(&self) -> Revision {
        Revision(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether no request newer than `revision` has been made.
    pub fn is_current(&self, revision: Revision) -> bool {
        self.latest.load(Ordering::Acquire) == revision.0
    }

    /// Decorate `source` for `selections`, or `None` if `revision` went stale
    /// before or during the pass.
    pub fn compute(
        &self,
        revision: Revision,
        source: &str,
        selections: &[Selection],
    ) -> Option<DecorationMap> {
        if !self.is_current(revision) {
            tracing::debug!(target: "livemark::session", revision = revision.0, "skipping stale request");
            return None;
        }

        let text = SourceText::from_str(source);
        let decorations = self.extractor.extract_indexed(source, &text);
        let map = filter_decorations_indexed(&decorations, &text, selections);

        if !self.is_current(revision) {
            tracing::debug!(target: "livemark::session", revision = revision.0, "discarding stale result");
            return None;
        }
        Some(map)
    }
}

/// Extract and filter in one pass with default options.
pub fn decorate(source: &str, selections: &[Selection]) -> DecorationMap {
    let text = SourceText::from_str(source);
    let decorations = Extractor::default().extract_indexed(source, &text);
    filter_decorations_indexed(&decorations, &text, selections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoration::DecorationType;

    #[test]
    fn test_revisions_increase() {
        let session = PreviewSession::default();
        let first = session.request();
        let second = session.request();
        assert!(second > first);
        assert_eq!(second.get(), first.get() + 1);
        assert!(!session.is_current(first));
        assert!(session.is_current(second));
    }

    #[test]
    fn test_stale_request_is_discarded() {
        let session = PreviewSession::default();
        let stale = session.request();
        let fresh = session.request();

        assert!(session.compute(stale, "**b**", &[]).is_none());
        let map = session.compute(fresh, "**b**", &[]).unwrap();
        assert!(map.contains_key(&DecorationType::Bold));
    }

    #[test]
    fn test_session_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PreviewSession>();

        let session = std::sync::Arc::new(PreviewSession::default());
        let revision = session.request();
        let worker = {
            let session = session.clone();
            std::thread::spawn(move || session.compute(revision, "# Title", &[]))
        };
        let map = worker.join().unwrap().unwrap();
        assert!(map.contains_key(&DecorationType::Heading1));
    }

    #[test]
    fn test_decorate_applies_selections() {
        let map = decorate("**bold**", &[Selection::collapsed(3)]);
        assert!(map.contains_key(&DecorationType::Bold));
        assert!(!map.contains_key(&DecorationType::Hide));
    }
}
