//! Record Detail Component
//!
//! Every field of a record, humanized. Used for sales orders, chassis
//! items and file rows.

use chassis_core::Record;
use leptos::prelude::*;

use crate::components::{FieldTable, TitleBar};

#[component]
pub fn RecordDetail(title: String, record: Record) -> impl IntoView {
    let rows = record.display_entries();
    let empty = rows.is_empty();

    view! {
        <div class="detail-screen">
            <TitleBar title=title />
            <Show
                when=move || !empty
                fallback=|| view! { <p class="empty-state">"No data"</p> }
            >
                <FieldTable rows=rows.clone() />
            </Show>
        </div>
    }
}
