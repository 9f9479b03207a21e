use component::spinner::SpinnerRing;
use component::video_player::ReelPlayer;
use leptos::prelude::*;
use leptos_icons::*;
use state::reel_form::PreviewBranch;
use state::reel_store::ReelStore;
use utils::reel_api::GeneratedReel;

#[component]
fn ErrorBanner(message: String) -> impl IntoView {
    view! {
        <div class="bg-red-500/20 border border-red-500/50 rounded-xl p-4 mb-6">
            <p class="text-red-300">{message}</p>
        </div>
    }
}

#[component]
fn GeneratingView() -> impl IntoView {
    view! {
        <div class="text-center">
            <div class="flex justify-center mb-4">
                <SpinnerRing classes="w-16 h-16 border-4" />
            </div>
            <p class="text-white text-lg">"Creating your viral reel..."</p>
            <p class="text-gray-400 text-sm mt-2">
                "This may take 3-5 minutes for complex animations"
            </p>
        </div>
    }
}

#[component]
fn GeneratedView(reel: GeneratedReel) -> impl IntoView {
    let href = reel.video_url.to_string();
    view! {
        <div class="w-full">
            <ReelPlayer src=href.clone() />
            <a
                href=href
                download
                class="flex items-center justify-center space-x-2 w-full py-3 bg-gradient-to-r from-green-500 to-teal-500 rounded-xl text-white font-semibold hover:shadow-lg transition-all"
            >
                <Icon icon=icondata::AiDownloadOutlined attr:class="w-5 h-5" />
                <span>"Download Reel"</span>
            </a>
        </div>
    }
}

#[component]
fn Placeholder() -> impl IntoView {
    view! {
        <div class="text-center text-gray-400">
            <div class="w-24 h-24 mx-auto mb-4 rounded-full bg-white/10 flex items-center justify-center">
                <Icon icon=icondata::AiPlayCircleOutlined attr:class="w-12 h-12" />
            </div>
            <p>"Your generated reel will appear here"</p>
        </div>
    }
}

#[component]
pub fn ReelPreview() -> impl IntoView {
    let store = ReelStore::get();
    let error = store.select(|state| state.error().map(str::to_string));
    let branch = store.select(|state| state.preview());

    view! {
        <div class="bg-white/10 backdrop-blur-lg rounded-2xl p-6 border border-white/20">
            <h2 class="text-2xl font-bold text-white mb-6">"Preview"</h2>
            {move || error.get().map(|message| view! { <ErrorBanner message /> })}
            <div class="flex items-center justify-center min-h-96">
                {move || match branch.get() {
                    PreviewBranch::Generating => view! { <GeneratingView /> }.into_any(),
                    PreviewBranch::Video(reel) => view! { <GeneratedView reel /> }.into_any(),
                    PreviewBranch::Placeholder => view! { <Placeholder /> }.into_any(),
                }}
            </div>
        </div>
    }
}
