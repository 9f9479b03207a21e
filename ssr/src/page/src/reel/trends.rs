use leptos::prelude::*;
use state::reel_store::ReelStore;

#[component]
fn TrendChips(title: &'static str, chips: Vec<String>, chip_class: &'static str) -> impl IntoView {
    view! {
        <div>
            <h4 class="text-sm font-medium text-gray-300 mb-2">{title}</h4>
            <div class="flex flex-wrap gap-2">
                {chips
                    .into_iter()
                    .map(|chip| {
                        view! {
                            <span class=format!("px-3 py-1 rounded-full text-sm {chip_class}")>
                                {chip}
                            </span>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// Hashtags and topics from `GET /trends`. Hidden until they arrive, and for
/// good if the request failed or came back empty.
#[component]
pub fn TrendsPanel() -> impl IntoView {
    let store = ReelStore::get();
    let shown = store.select(|state| {
        state.visible_trends().map(|trends| {
            let hashtags: Vec<String> = trends
                .shown_hashtags()
                .iter()
                .map(|tag| format!("#{tag}"))
                .collect();
            (hashtags, trends.shown_topics())
        })
    });

    move || {
        shown.get().map(|(hashtags, topics)| {
            view! {
                <div class="mt-8 bg-white/10 backdrop-blur-lg rounded-2xl p-6 border border-white/20">
                    <h3 class="text-xl font-bold text-white mb-4">"🔥 Currently Trending"</h3>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                        {(!hashtags.is_empty())
                            .then(|| {
                                view! {
                                    <TrendChips
                                        title="Trending Hashtags:"
                                        chips=hashtags
                                        chip_class="bg-purple-500/30 text-purple-200"
                                    />
                                }
                            })}
                        {(!topics.is_empty())
                            .then(|| {
                                view! {
                                    <TrendChips
                                        title="Hot Topics:"
                                        chips=topics
                                        chip_class="bg-blue-500/30 text-blue-200"
                                    />
                                }
                            })}
                    </div>
                </div>
            }
        })
    }
}
