//! File Viewer Component
//!
//! Full-size view of a chassis picture; PDFs are embedded instead.

use chassis_core::controller::Attachment;
use leptos::prelude::*;

use crate::commands;
use crate::components::TitleBar;

#[component]
pub fn FileViewer(file: Attachment) -> impl IntoView {
    let url = file.url.clone();
    let src = file.url.clone();
    let name = file.name.clone();
    let (failed, set_failed) = signal(false);

    let content = if file.is_pdf {
        view! { <iframe class="pdf-frame" src=file.url.clone() title=file.name.clone()></iframe> }.into_any()
    } else {
        view! {
            <Show
                when=move || !failed.get()
                fallback=|| view! { <p class="error-banner">"Failed to load image"</p> }
            >
                <img
                    class="file-image"
                    src=src.clone()
                    alt=name.clone()
                    on:error=move |_| {
                        log::warn!("Image failed to load");
                        set_failed.set(true);
                    }
                />
            </Show>
        }
        .into_any()
    };

    view! {
        <div class="detail-screen">
            <TitleBar title=file.name.clone() subtitle=file.stored_path.clone() />
            {content}
            <button class="secondary-btn" on:click=move |_| commands::open_in_new_tab(&url)>
                "Open in new tab"
            </button>
        </div>
    }
}
