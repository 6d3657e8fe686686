//! Plan Detail Component

use chassis_core::controller::PLAN_FIELDS;
use chassis_core::Record;
use leptos::prelude::*;

use crate::components::{detail_rows, FieldTable, TitleBar};
use crate::context::use_app_context;
use crate::models::Screen;

#[component]
pub fn PlanDetail(plan: Record) -> impl IntoView {
    let ctx = use_app_context();
    let rows = detail_rows(&plan, &PLAN_FIELDS);
    let has_document = plan.has("picloc");

    view! {
        <div class="detail-screen">
            <TitleBar title="Plan Details" />
            <FieldTable rows=rows />
            <Show when=move || has_document>
                <button class="primary-btn" on:click={
                    let plan = plan.clone();
                    move |_| ctx.navigate(Screen::PlanDocument(plan.clone()))
                }>
                    "View Plan Document"
                </button>
            </Show>
        </div>
    }
}
