use leptos::prelude::*;
use leptos_icons::*;
use utils::web::{picked_files, PickedFile};

/// Dashed drop tile wrapping a hidden `<input type="file">`.
///
/// Every change hands the complete new selection to `on_pick`, an empty
/// list when the picker was cancelled.
#[component]
pub fn FilePickerTile(
    #[prop(into)] label: String,
    icon: icondata::Icon,
    accept: &'static str,
    #[prop(optional)] multiple: bool,
    #[prop(into)] caption: Signal<String>,
    on_pick: impl Fn(Vec<PickedFile>) + 'static,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm font-medium text-gray-300 mb-2">{label}</label>
            <label class="flex flex-col items-center justify-center w-full h-24 border-2 border-dashed border-white/20 rounded-xl cursor-pointer hover:bg-white/5 transition-colors">
                <Icon icon=icon attr:class="w-6 h-6 text-gray-400 mb-1" />
                <span class="text-sm text-gray-400">{move || caption.get()}</span>
                <input
                    type="file"
                    accept=accept
                    multiple=multiple
                    class="hidden"
                    on:change=move |ev| {
                        let files = picked_files(&ev);
                        let bytes: u64 = files.iter().map(|file| file.size).sum();
                        log::debug!("picked {} file(s), {bytes} bytes, for {accept}", files.len());
                        on_pick(files);
                    }
                />
            </label>
        </div>
    }
}
