use leptos::prelude::*;

/// Full-width form submit button painted with a gradient accent.
///
/// `accent` holds the gradient stops, `None` renders the greyed out
/// disabled look.
#[component]
pub fn GradientSubmitButton(
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] accent: Signal<Option<&'static str>>,
    children: Children,
) -> impl IntoView {
    let class = move || {
        let look = match accent.get() {
            Some(stops) if !disabled.get() => {
                format!("bg-gradient-to-r {stops} hover:shadow-lg hover:scale-105")
            }
            _ => "bg-gray-600 cursor-not-allowed".to_string(),
        };
        format!("w-full py-4 rounded-xl font-semibold text-lg transition-all {look} text-white")
    };

    view! {
        <button type="submit" disabled=move || disabled.get() class=class>
            {children()}
        </button>
    }
}
