mod form;
mod loader;
mod preview;
mod submit;
mod trends;

use form::ReelForm;
use leptos::prelude::*;
use leptos_meta::Title;
use preview::ReelPreview;
use state::reel_store::ReelStore;
use trends::TrendsPanel;
use utils::web::RequestScope;

#[component]
pub fn ReelGeneratorPage() -> impl IntoView {
    let store = ReelStore::provide();
    // aborted together with everything in flight when the page unmounts
    let scope = RequestScope::new();
    provide_context(scope.clone());

    loader::load_trends(store, scope);

    view! {
        <Title text="AI Reel Generator" />
        <div class="min-h-screen bg-gradient-to-br from-purple-900 via-blue-900 to-indigo-900 p-4">
            <div class="max-w-6xl mx-auto">
                <div class="text-center mb-8">
                    <h1 class="text-5xl font-bold text-white mb-4">"🎬 AI Reel Generator"</h1>
                    <p class="text-xl text-gray-300">
                        "Create viral reels instantly with AI-powered content generation"
                    </p>
                </div>
                <div class="grid grid-cols-1 lg:grid-cols-2 gap-8">
                    <ReelForm />
                    <ReelPreview />
                </div>
                <TrendsPanel />
            </div>
        </div>
    }
}
