use leptos::prelude::*;
use state::reel_form::ReelAction;
use state::reel_store::ReelStore;
use utils::reel_api::generate_reel;
use utils::web::RequestScope;

/// Runs one generation: moves the store to `Generating`, waits for the
/// backend and settles the request with its outcome.
///
/// Dispatching while a reel is already generating does nothing.
pub fn use_generate_action(store: ReelStore, scope: RequestScope) -> Action<(), ()> {
    Action::new_local(move |_: &()| {
        let scope = scope.clone();
        let submission = store.begin_submission();
        async move {
            let Some((request_id, request)) = submission else {
                log::debug!("generate ignored, submit not allowed");
                return;
            };
            let outcome = generate_reel(&request, &scope).await;
            if !scope.is_alive() {
                return;
            }
            store.dispatch(ReelAction::GenerationSettled {
                request_id,
                outcome,
            });
        }
    })
}
