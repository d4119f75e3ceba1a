//! Session state: which screen is live, what has been loaded, and what the
//! last analysis said.
//!
//! The session is an explicit state struct with pure transition methods, so
//! every flow can be unit-tested without a terminal attached. Preview
//! handles are released here (on slot replacement, reset, and drop) and
//! nowhere else.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::intake::IntakeBatch;
use crate::preview::PreviewStore;
use crate::types::{AnalysisResult, CreativeSet, FormatGroup};

/// The three screens of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Upload,
    FormatSelection,
    FormatAnalysis,
}

/// In-memory state for one interactive run. Reentrant; nothing persists.
pub struct Session {
    view: View,
    set: CreativeSet,
    selected_group: Option<FormatGroup>,
    result: Option<AnalysisResult>,
    loading: bool,
    generation: u64,
    store: Arc<PreviewStore>,
}

impl Session {
    pub fn new(store: Arc<PreviewStore>) -> Self {
        Self {
            view: View::Upload,
            set: CreativeSet::default(),
            selected_group: None,
            result: None,
            loading: false,
            generation: 0,
            store,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn creative_set(&self) -> &CreativeSet {
        &self.set
    }

    pub fn selected_group(&self) -> Option<FormatGroup> {
        self.selected_group
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn preview_store(&self) -> &Arc<PreviewStore> {
        &self.store
    }

    /// Apply a settled intake batch. Returns `true` when at least one slot
    /// was updated, in which case the session moves to format selection
    /// (clearing any selection or result left over from a deeper screen).
    /// A batch with no successful slot leaves the session untouched.
    pub fn apply_intake(&mut self, batch: IntakeBatch) -> bool {
        if !batch.has_any() {
            return false;
        }

        for creative in batch.square.into_iter().chain(batch.vertical) {
            if let Some(old) = self.set.insert(creative) {
                self.store.revoke(&old.preview);
                debug!(slot = %old.slot, "replaced creative, previous preview revoked");
            }
        }

        self.selected_group = None;
        self.result = None;
        self.loading = false;
        self.view = View::FormatSelection;
        true
    }

    /// User picked a format group. Moves to the analysis screen in a loading
    /// state and hands back the generation token the eventual result must
    /// present. Refused (`None`) while no creative is loaded.
    pub fn select_group(&mut self, group: FormatGroup) -> Option<u64> {
        if !self.set.has_any() {
            warn!("no creatives available for analysis");
            return None;
        }
        self.selected_group = Some(group);
        self.result = None;
        self.loading = true;
        self.view = View::FormatAnalysis;
        self.generation += 1;
        Some(self.generation)
    }

    /// Deliver a settled analysis. Only the response to the *latest*
    /// selection is accepted; anything else (stale generation, or the user
    /// already navigated away) is dropped.
    pub fn finish_analysis(&mut self, generation: u64, result: AnalysisResult) -> bool {
        if generation != self.generation || !self.loading {
            debug!(
                generation,
                current = self.generation,
                "dropping stale analysis result"
            );
            return false;
        }
        self.result = Some(result);
        self.loading = false;
        true
    }

    /// Leave the analysis screen, forgetting the selection and its result.
    pub fn go_back(&mut self) {
        self.selected_group = None;
        self.result = None;
        self.loading = false;
        self.view = View::FormatSelection;
    }

    /// Back to the initial screen; every creative's preview is released.
    pub fn reset(&mut self) {
        for creative in self.set.drain() {
            self.store.revoke(&creative.preview);
        }
        self.selected_group = None;
        self.result = None;
        self.loading = false;
        self.view = View::Upload;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        for creative in self.set.drain() {
            self.store.revoke(&creative.preview);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChecklistSeverity, Creative, CreativeKind, FunnelStage, Slot};
    use std::path::PathBuf;

    fn creative(store: &Arc<PreviewStore>, slot: Slot) -> Creative {
        let bytes = Arc::new(vec![1u8, 2, 3]);
        let preview = store.create("image/png", Arc::clone(&bytes));
        Creative {
            path: PathBuf::from(format!("{slot}.png")),
            bytes,
            mime: "image/png".to_string(),
            kind: CreativeKind::Image,
            width: 1080,
            height: 1080,
            slot,
            preview,
        }
    }

    fn batch_with(store: &Arc<PreviewStore>, slots: &[Slot]) -> IntakeBatch {
        let mut batch = IntakeBatch::default();
        for slot in slots {
            match slot {
                Slot::Square => batch.square = Some(creative(store, Slot::Square)),
                Slot::Vertical => batch.vertical = Some(creative(store, Slot::Vertical)),
            }
        }
        batch
    }

    fn sample_result() -> AnalysisResult {
        AnalysisResult::empty_with_conclusion(
            FunnelStage::Tofu,
            "Looks good",
            ChecklistSeverity::Positive,
            "ship it",
        )
    }

    #[test]
    fn full_flow_walks_every_screen() {
        let store = PreviewStore::new();
        let mut session = Session::new(Arc::clone(&store));
        assert_eq!(session.view(), View::Upload);

        assert!(session.apply_intake(batch_with(&store, &[Slot::Square])));
        assert_eq!(session.view(), View::FormatSelection);

        let generation = session.select_group(FormatGroup::SquareLike).unwrap();
        assert_eq!(session.view(), View::FormatAnalysis);
        assert!(session.is_loading());
        assert!(session.result().is_none());

        assert!(session.finish_analysis(generation, sample_result()));
        assert!(!session.is_loading());
        assert!(session.result().is_some());

        session.go_back();
        assert_eq!(session.view(), View::FormatSelection);
        assert!(session.selected_group().is_none());
        assert!(session.result().is_none());

        session.reset();
        assert_eq!(session.view(), View::Upload);
        assert!(!session.creative_set().has_any());
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn empty_batch_changes_nothing() {
        let store = PreviewStore::new();
        let mut session = Session::new(Arc::clone(&store));
        assert!(!session.apply_intake(IntakeBatch::default()));
        assert_eq!(session.view(), View::Upload);
    }

    #[test]
    fn select_group_requires_a_creative() {
        let store = PreviewStore::new();
        let mut session = Session::new(store);
        assert!(session.select_group(FormatGroup::Vertical).is_none());
        assert_eq!(session.view(), View::Upload);
    }

    #[test]
    fn replacing_a_slot_revokes_exactly_the_old_preview() {
        let store = PreviewStore::new();
        let mut session = Session::new(Arc::clone(&store));

        session.apply_intake(batch_with(&store, &[Slot::Square, Slot::Vertical]));
        assert_eq!(store.live_count(), 2);

        // Re-upload only the square slot; the vertical preview must survive.
        session.apply_intake(batch_with(&store, &[Slot::Square]));
        assert_eq!(store.live_count(), 2);

        session.reset();
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn intake_from_deeper_screen_resets_selection() {
        let store = PreviewStore::new();
        let mut session = Session::new(Arc::clone(&store));
        session.apply_intake(batch_with(&store, &[Slot::Square]));
        let generation = session.select_group(FormatGroup::SquareLike).unwrap();
        session.finish_analysis(generation, sample_result());

        session.apply_intake(batch_with(&store, &[Slot::Vertical]));
        assert_eq!(session.view(), View::FormatSelection);
        assert!(session.selected_group().is_none());
        assert!(session.result().is_none());
        assert!(!session.is_loading());
    }

    #[test]
    fn stale_generation_is_dropped() {
        let store = PreviewStore::new();
        let mut session = Session::new(Arc::clone(&store));
        session.apply_intake(batch_with(&store, &[Slot::Square]));

        let first = session.select_group(FormatGroup::SquareLike).unwrap();
        let second = session.select_group(FormatGroup::Vertical).unwrap();
        assert_ne!(first, second);

        // The slow first response arrives after the reselection: dropped.
        assert!(!session.finish_analysis(first, sample_result()));
        assert!(session.result().is_none());
        assert!(session.is_loading());

        // The live request lands normally.
        assert!(session.finish_analysis(second, sample_result()));
        assert!(session.result().is_some());
    }

    #[test]
    fn result_after_navigation_is_dropped() {
        let store = PreviewStore::new();
        let mut session = Session::new(Arc::clone(&store));
        session.apply_intake(batch_with(&store, &[Slot::Vertical]));
        let generation = session.select_group(FormatGroup::Vertical).unwrap();

        session.go_back();
        assert!(!session.finish_analysis(generation, sample_result()));
        assert!(session.result().is_none());
    }

    #[test]
    fn dropping_the_session_releases_previews() {
        let store = PreviewStore::new();
        {
            let mut session = Session::new(Arc::clone(&store));
            session.apply_intake(batch_with(&store, &[Slot::Square, Slot::Vertical]));
            assert_eq!(store.live_count(), 2);
        }
        assert_eq!(store.live_count(), 0);
    }
}
