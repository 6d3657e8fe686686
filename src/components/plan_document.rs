//! Plan Document Component
//!
//! Embeds the plan PDF resolved from its legacy `picloc` path.

use chassis_core::domain::paths::plan_document_path;
use chassis_core::Record;
use leptos::prelude::*;

use crate::commands;
use crate::components::TitleBar;

#[component]
pub fn PlanDocument(plan: Record) -> impl IntoView {
    let title = plan.text("plan_id").unwrap_or_else(|| "Document Viewer".to_string());
    let config = commands::config();
    let url = plan
        .text("picloc")
        .and_then(|picloc| plan_document_path(&picloc))
        .map(|path| config.asset_url(&path));

    let body = match url {
        Some(url) => {
            let target = url.clone();
            view! {
                <div class="document-viewer">
                    <iframe class="pdf-frame" src=url title="Plan document"></iframe>
                    <button class="primary-btn" on:click=move |_| commands::open_in_new_tab(&target)>
                        "Open PDF Document"
                    </button>
                </div>
            }
            .into_any()
        }
        None => view! { <p class="empty-state">"No document available"</p> }.into_any(),
    };

    view! {
        <div class="detail-screen">
            <TitleBar title=title />
            {body}
        </div>
    }
}
