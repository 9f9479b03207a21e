use leptos::prelude::*;
use leptos::task::spawn_local;
use state::reel_form::ReelAction;
use state::reel_store::ReelStore;
use utils::reel_api::fetch_trends;
use utils::web::RequestScope;

/// Fetches the trending panel once, after the page is mounted in the
/// browser. Failures only hide the panel.
pub fn load_trends(store: ReelStore, scope: RequestScope) {
    Effect::new(move |prev: Option<()>| {
        if prev.is_some() {
            return;
        }
        let scope = scope.clone();
        spawn_local(async move {
            match fetch_trends(&scope).await {
                Ok(trends) => store.dispatch(ReelAction::TrendsLoaded(trends)),
                Err(e) => log::warn!("failed to load trends: {e}"),
            }
        });
    });
}
