use component::buttons::GradientSubmitButton;
use component::file_picker::FilePickerTile;
use component::spinner::SpinnerRing;
use consts::limits::REEL_DURATION_RANGE_SECS;
use leptos::prelude::*;
use leptos_icons::*;
use state::reel_form::{FieldValue, FormField, ReelAction, ReelStyle};
use state::reel_store::ReelStore;
use utils::web::{PickedFile, RequestScope};

use super::submit::use_generate_action;

// The audio slot holds one file. A cancelled picker clears it.
fn audio_selection(files: Vec<PickedFile>) -> ReelAction {
    ReelAction::SelectAudio(files.into_iter().next())
}

#[component]
fn StyleTile(style: ReelStyle) -> impl IntoView {
    let store = ReelStore::get();
    let selected = store.select(move |state| state.form.style == style);
    let class = move || {
        if selected.get() {
            format!(
                "p-3 rounded-xl text-left transition-all bg-gradient-to-r {} text-white shadow-lg",
                style.accent()
            )
        } else {
            "p-3 rounded-xl text-left transition-all bg-white/10 text-gray-300 hover:bg-white/20"
                .to_string()
        }
    };

    view! {
        <label class=class>
            <input
                type="radio"
                name=FormField::Style.input_name()
                value=style.id()
                class="sr-only"
                prop:checked=move || selected.get()
                on:change=move |ev| {
                    store
                        .dispatch(
                            ReelAction::UpdateField(
                                FormField::Style,
                                FieldValue::Text(event_target_value(&ev)),
                            ),
                        )
                }
            />
            <div class="font-semibold text-sm">{style.name()}</div>
            <div class="text-xs opacity-75">{style.description()}</div>
        </label>
    }
}

#[component]
pub fn ReelForm() -> impl IntoView {
    let store = ReelStore::get();
    let scope: RequestScope = expect_context();
    let generate = use_generate_action(store, scope);

    let prompt = store.select(|state| state.form.prompt.clone());
    let duration = store.select(|state| state.form.duration_secs);
    let include_trending = store.select(|state| state.form.include_trending);
    let images_caption = store.select(|state| state.files.images_caption());
    let audio_caption = store.select(|state| state.files.audio_caption());
    let generating = store.select(|state| state.is_generating());
    let disabled = store.select(|state| !state.can_submit());
    let accent = store.select(|state| state.submit_accent());

    let min_secs = *REEL_DURATION_RANGE_SECS.start();
    let max_secs = *REEL_DURATION_RANGE_SECS.end();

    view! {
        <div class="bg-white/10 backdrop-blur-lg rounded-2xl p-6 border border-white/20">
            <h2 class="text-2xl font-bold text-white mb-6">"Create Your Reel"</h2>
            <form
                class="space-y-6"
                on:submit=move |ev| {
                    ev.prevent_default();
                    generate.dispatch(());
                }
            >
                <div>
                    <label class="block text-sm font-medium text-gray-300 mb-2">
                        "What's your reel about?"
                    </label>
                    <textarea
                        name=FormField::Prompt.input_name()
                        required
                        rows="4"
                        class="w-full px-4 py-3 bg-white/10 border border-white/20 rounded-xl text-white placeholder-gray-400 focus:outline-none focus:ring-2 focus:ring-purple-500 resize-none"
                        placeholder="Describe what you want your reel to be about... (e.g., 'My top 3 stock picks that gained 500% this year')"
                        prop:value=move || prompt.get()
                        on:input=move |ev| {
                            store
                                .dispatch(
                                    ReelAction::UpdateField(
                                        FormField::Prompt,
                                        FieldValue::Text(event_target_value(&ev)),
                                    ),
                                )
                        }
                    ></textarea>
                </div>

                <div>
                    <label class="block text-sm font-medium text-gray-300 mb-3">"Style"</label>
                    <div class="grid grid-cols-2 gap-3">
                        {ReelStyle::ALL
                            .into_iter()
                            .map(|style| view! { <StyleTile style /> })
                            .collect_view()}
                    </div>
                </div>

                <div>
                    <label class="block text-sm font-medium text-gray-300 mb-2">
                        {move || format!("Duration: {} seconds", duration.get())}
                    </label>
                    <input
                        type="range"
                        name=FormField::Duration.input_name()
                        min=min_secs.to_string()
                        max=max_secs.to_string()
                        class="w-full h-2 bg-white/20 rounded-lg appearance-none cursor-pointer"
                        prop:value=move || duration.get().to_string()
                        on:input=move |ev| {
                            store
                                .dispatch(
                                    ReelAction::UpdateField(
                                        FormField::Duration,
                                        FieldValue::Text(event_target_value(&ev)),
                                    ),
                                )
                        }
                    />
                    <div class="flex justify-between text-xs text-gray-400 mt-1">
                        <span>{format!("{min_secs}s")}</span>
                        <span>{format!("{max_secs}s")}</span>
                    </div>
                </div>

                <div class="grid grid-cols-2 gap-4">
                    <FilePickerTile
                        label="Images (Optional)"
                        icon=icondata::AiPictureOutlined
                        accept="image/*"
                        multiple=true
                        caption=images_caption
                        on_pick=move |files| store.dispatch(ReelAction::SelectImages(files))
                    />
                    <FilePickerTile
                        label="Audio (Optional)"
                        icon=icondata::LuMusic
                        accept="audio/*"
                        caption=audio_caption
                        on_pick=move |files| store.dispatch(audio_selection(files))
                    />
                </div>

                <label class="flex items-center space-x-3 cursor-pointer">
                    <input
                        type="checkbox"
                        name=FormField::IncludeTrending.input_name()
                        class="w-5 h-5 rounded border-white/20 bg-white/10 text-purple-500 focus:ring-purple-500"
                        prop:checked=move || include_trending.get()
                        on:change=move |ev| {
                            store
                                .dispatch(
                                    ReelAction::UpdateField(
                                        FormField::IncludeTrending,
                                        FieldValue::Checked(event_target_checked(&ev)),
                                    ),
                                )
                        }
                    />
                    <span class="text-gray-300">"Include trending elements"</span>
                </label>

                <GradientSubmitButton disabled accent>
                    <div class="flex items-center justify-center space-x-2">
                        <Show
                            when=move || generating.get()
                            fallback=|| {
                                view! {
                                    <Icon icon=icondata::AiPlayCircleOutlined attr:class="w-5 h-5" />
                                    <span>"Generate Reel"</span>
                                }
                            }
                        >
                            <SpinnerRing />
                            <span>"Generating..."</span>
                        </Show>
                    </div>
                </GradientSubmitButton>
            </form>
        </div>
    }
}
