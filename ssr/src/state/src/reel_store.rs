use leptos::prelude::*;
use utils::reel_api::GenerateReelRequest;

use crate::reel_form::{ReelAction, ReelState};

/// Reactive home of [`ReelState`], shared with the page through context
#[derive(Clone, Copy, Debug)]
pub struct ReelStore {
    state: RwSignal<ReelState>,
}

impl Default for ReelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReelStore {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(ReelState::default()),
        }
    }

    pub fn provide() -> Self {
        let this = Self::new();
        provide_context(this);
        this
    }

    pub fn get() -> Self {
        let this: Self = expect_context();
        this
    }

    /// Applies `action`. A no-op once the owning page has been torn down.
    pub fn dispatch(&self, action: ReelAction) {
        let applied = self.state.try_update(move |state| {
            let current = std::mem::take(state);
            *state = current.reduce(action);
        });
        if applied.is_none() {
            log::debug!("reel store disposed, dropping action");
        }
    }

    /// Moves to `Generating` and returns the request id together with the
    /// body to send, or `None` if submitting is not allowed right now.
    pub fn begin_submission(&self) -> Option<(u64, GenerateReelRequest)> {
        let allowed = self
            .state
            .try_with_untracked(ReelState::can_submit)
            .unwrap_or_default();
        if !allowed {
            return None;
        }
        self.dispatch(ReelAction::Submit);
        self.state
            .try_with_untracked(|state| state.in_flight().map(|id| (id, state.request())))
            .flatten()
    }

    /// Reads the current state, tracking it when called reactively
    pub fn with<T>(&self, f: impl FnOnce(&ReelState) -> T) -> T {
        self.state.with(f)
    }

    /// Derived signal over one slice of the state
    pub fn select<T>(&self, f: impl Fn(&ReelState) -> T + Send + Sync + 'static) -> Signal<T>
    where
        T: Send + Sync + 'static,
    {
        let state = self.state;
        Signal::derive(move || state.with(&f))
    }
}

#[cfg(all(test, not(feature = "hydrate")))]
mod tests {
    use super::*;
    use crate::reel_form::{FieldValue, FormField};
    use reactive_graph::owner::Owner;
    use utils::reel_api::ReelGenError;

    fn prompt(store: &ReelStore, text: &str) {
        store.dispatch(ReelAction::UpdateField(
            FormField::Prompt,
            FieldValue::Text(text.to_string()),
        ));
    }

    #[test]
    fn submission_round_trip() {
        let owner = Owner::new();
        owner.set();

        let store = ReelStore::new();
        let generating = store.select(ReelState::is_generating);
        assert!(store.begin_submission().is_none());

        prompt(&store, "my top 3 stock picks");
        let (request_id, request) = store.begin_submission().unwrap();
        assert_eq!(request.prompt, "my top 3 stock picks");
        assert!(generating.get_untracked());

        // button is disabled while in flight
        assert!(store.begin_submission().is_none());

        store.dispatch(ReelAction::GenerationSettled {
            request_id,
            outcome: Err(ReelGenError::Rejected("quota exceeded".into())),
        });
        assert!(!generating.get_untracked());
        assert_eq!(
            store.with(|state| state.error().map(str::to_string)),
            Some("quota exceeded".to_string())
        );
    }

    #[test]
    fn disposed_store_drops_late_results() {
        let owner = Owner::new();
        owner.set();

        let store = ReelStore::new();
        prompt(&store, "x");
        let (request_id, _) = store.begin_submission().unwrap();

        owner.cleanup();

        store.dispatch(ReelAction::GenerationSettled {
            request_id,
            outcome: Err(ReelGenError::Network("late".into())),
        });
        assert!(store.begin_submission().is_none());
    }
}
