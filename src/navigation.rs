use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::catalog::Topic;

/// Scroll offset beyond which the back-to-top affordance shows.
pub const SCROLL_TOP_THRESHOLD: f64 = 400.0;

/// How long a code block stays marked as copied before reverting.
pub const COPY_FLASH: Duration = Duration::from_millis(2000);

/// Transient per-view state for a topic detail view. One instance per
/// displayed topic; dropping it cancels every pending copied-flag revert so
/// no update can land on a view that is no longer shown.
///
/// The four sub-states are independent; no transition in one constrains
/// another. `mark_copied` spawns its revert task onto the ambient tokio
/// runtime and must be called from within one.
pub struct NavigationState {
    active_section: Option<String>,
    mobile_menu_open: bool,
    copied: Arc<Mutex<HashSet<usize>>>,
    revert_timers: HashMap<usize, JoinHandle<()>>,
    scroll_past_threshold: bool,
}

impl NavigationState {
    /// Fresh state for a just-resolved topic; the first section's anchor
    /// starts active, everything else starts cleared.
    pub fn for_topic(topic: &Topic) -> Self {
        Self {
            active_section: topic.content.sections.first().map(|s| s.anchor()),
            mobile_menu_open: false,
            copied: Arc::new(Mutex::new(HashSet::new())),
            revert_timers: HashMap::new(),
            scroll_past_threshold: false,
        }
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    /// Explicit anchor navigation. Selecting a target also closes the mobile
    /// menu as one combined transition.
    pub fn navigate_to_section(&mut self, anchor: &str) {
        self.active_section = Some(anchor.to_string());
        self.mobile_menu_open = false;
    }

    pub fn open_menu(&mut self) {
        self.mobile_menu_open = true;
    }

    pub fn close_menu(&mut self) {
        self.mobile_menu_open = false;
    }

    pub fn menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    /// Flag a code block as copied and schedule the revert. A second copy of
    /// the same block cancels the pending revert and restarts the window
    /// instead of stacking timers.
    pub fn mark_copied(&mut self, index: usize) {
        if let Some(timer) = self.revert_timers.remove(&index) {
            timer.abort();
        }
        self.copied.lock().unwrap().insert(index);
        let copied = Arc::clone(&self.copied);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(COPY_FLASH).await;
            copied.lock().unwrap().remove(&index);
        });
        self.revert_timers.insert(index, timer);
    }

    pub fn is_copied(&self, index: usize) -> bool {
        self.copied.lock().unwrap().contains(&index)
    }

    /// Re-derive the threshold flag from the current scroll offset. Pure in
    /// the offset; no hysteresis.
    pub fn observe_scroll(&mut self, offset: f64) {
        self.scroll_past_threshold = offset > SCROLL_TOP_THRESHOLD;
    }

    pub fn scroll_past_threshold(&self) -> bool {
        self.scroll_past_threshold
    }

    fn cancel_revert_timers(&mut self) {
        for (_, timer) in self.revert_timers.drain() {
            timer.abort();
        }
    }
}

impl Drop for NavigationState {
    fn drop(&mut self) {
        self.cancel_revert_timers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn sample_topic() -> Topic {
        let catalog: Catalog = serde_json::from_str(
            r#"{
                "categories": [{
                    "id": "web",
                    "title": "Web",
                    "topics": [{
                        "id": "html",
                        "title": "HTML",
                        "content": {
                            "sections": [
                                {"title": "Getting Started", "content": "...", "codeExample": "<p>hi</p>"},
                                {"title": "Semantic Elements", "content": "..."}
                            ]
                        }
                    }]
                }]
            }"#,
        )
        .unwrap();
        catalog.resolve_topic("html").unwrap().clone()
    }

    #[tokio::test]
    async fn active_section_starts_at_first_anchor() {
        let state = NavigationState::for_topic(&sample_topic());
        assert_eq!(state.active_section(), Some("getting-started"));
    }

    #[tokio::test]
    async fn selecting_a_section_closes_the_menu() {
        let mut state = NavigationState::for_topic(&sample_topic());
        state.open_menu();
        assert!(state.menu_open());
        state.navigate_to_section("semantic-elements");
        assert!(!state.menu_open());
        assert_eq!(state.active_section(), Some("semantic-elements"));
    }

    #[tokio::test(start_paused = true)]
    async fn copied_flag_reverts_after_window() {
        let mut state = NavigationState::for_topic(&sample_topic());
        state.mark_copied(0);
        assert!(state.is_copied(0));
        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert!(!state.is_copied(0));
    }

    #[tokio::test(start_paused = true)]
    async fn second_copy_restarts_the_window() {
        let mut state = NavigationState::for_topic(&sample_topic());
        state.mark_copied(0);
        tokio::time::sleep(Duration::from_millis(1000)).await;
        state.mark_copied(0);
        // t=2500: past the original window, inside the restarted one.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(state.is_copied(0));
        // t=3100: restarted window has elapsed.
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(!state.is_copied(0));
    }

    #[tokio::test(start_paused = true)]
    async fn flags_are_independent_per_block() {
        let mut state = NavigationState::for_topic(&sample_topic());
        state.mark_copied(0);
        tokio::time::sleep(Duration::from_millis(1000)).await;
        state.mark_copied(1);
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(!state.is_copied(0));
        assert!(state.is_copied(1));
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_reverts() {
        let mut state = NavigationState::for_topic(&sample_topic());
        state.mark_copied(0);
        let flags = Arc::clone(&state.copied);
        drop(state);
        tokio::time::sleep(Duration::from_millis(2500)).await;
        // The revert was cancelled with the view; the flag is never mutated.
        assert!(flags.lock().unwrap().contains(&0));
    }

    #[tokio::test]
    async fn scroll_threshold_is_pure_in_offset() {
        let mut state = NavigationState::for_topic(&sample_topic());
        state.observe_scroll(399.0);
        assert!(!state.scroll_past_threshold());
        state.observe_scroll(401.0);
        assert!(state.scroll_past_threshold());
        state.observe_scroll(399.0);
        assert!(!state.scroll_past_threshold());
    }
}
