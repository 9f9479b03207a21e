use leptos::prelude::*;

/// Spinning ring, sized and coloured through `classes`
#[component]
pub fn SpinnerRing(#[prop(into, default = "w-5 h-5 border-2".to_string())] classes: String) -> impl IntoView {
    view! {
        <div class=format!(
            "{classes} border-white/30 border-t-white rounded-full animate-spin",
        )></div>
    }
}
