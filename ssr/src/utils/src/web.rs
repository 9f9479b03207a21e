use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use leptos::prelude::*;

/// Raw contents of a picked file.
///
/// In the browser this is the `Blob` handed out by the file input, which is
/// only ever touched from the main thread. Natively (server render and tests)
/// the bytes are held in memory.
#[cfg(feature = "hydrate")]
pub type FileBlob = send_wrapper::SendWrapper<web_sys::Blob>;
#[cfg(not(feature = "hydrate"))]
pub type FileBlob = Arc<[u8]>;

/// A file chosen through an `<input type="file">`
#[derive(Clone)]
pub struct PickedFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub blob: FileBlob,
}

impl fmt::Debug for PickedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickedFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl PickedFile {
    #[cfg(feature = "hydrate")]
    pub fn from_web_file(file: web_sys::File) -> Self {
        Self {
            name: file.name(),
            mime: file.type_(),
            size: file.size() as u64,
            blob: send_wrapper::SendWrapper::new(file.into()),
        }
    }

    #[cfg(not(feature = "hydrate"))]
    pub fn from_bytes(
        name: impl Into<String>,
        mime: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let blob: Arc<[u8]> = bytes.into();
        Self {
            name: name.into(),
            mime: mime.into(),
            size: blob.len() as u64,
            blob,
        }
    }
}

/// Files currently selected on the input that fired `ev`, in picker order.
pub fn picked_files(ev: &leptos::ev::Event) -> Vec<PickedFile> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::HtmlInputElement;

        let Some(input) = ev
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        else {
            return Vec::new();
        };
        let Some(list) = input.files() else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|idx| list.get(idx))
            .map(PickedFile::from_web_file)
            .collect()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        _ = ev;
        Vec::new()
    }
}

/// Lifetime of the requests issued by a mounted view.
///
/// Created with [`RequestScope::new`] inside a component, the scope is
/// cancelled when the component's owner is cleaned up: pending browser
/// fetches are aborted and late results are reported as cancelled.
#[derive(Clone)]
pub struct RequestScope {
    alive: Arc<AtomicBool>,
    #[cfg(feature = "hydrate")]
    abort: Option<send_wrapper::SendWrapper<web_sys::AbortController>>,
}

impl RequestScope {
    pub fn new() -> Self {
        let scope = Self::detached();
        let on_teardown = scope.clone();
        on_cleanup(move || on_teardown.cancel());
        scope
    }

    /// A scope that is only cancelled explicitly
    pub fn detached() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
            #[cfg(feature = "hydrate")]
            abort: web_sys::AbortController::new()
                .ok()
                .map(send_wrapper::SendWrapper::new),
        }
    }

    pub fn cancel(&self) {
        if !self.alive.swap(false, Ordering::AcqRel) {
            return;
        }
        log::debug!("request scope cancelled");
        #[cfg(feature = "hydrate")]
        if let Some(controller) = &self.abort {
            controller.abort();
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    #[cfg(feature = "hydrate")]
    pub fn abort_signal(&self) -> Option<web_sys::AbortSignal> {
        self.abort.as_ref().map(|controller| controller.signal())
    }
}

impl Default for RequestScope {
    fn default() -> Self {
        Self::new()
    }
}
