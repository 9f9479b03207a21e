use leptos::prelude::*;

/// Inline MP4 preview of a generated reel
#[component]
pub fn ReelPlayer(#[prop(into)] src: String) -> impl IntoView {
    view! {
        <video
            class="w-full max-w-md mx-auto rounded-xl shadow-2xl mb-4"
            controls=true
            autoplay=true
            muted=true
            playsinline
        >
            <source src=src type="video/mp4" />
            "Your browser does not support the video tag."
        </video>
    }
}
