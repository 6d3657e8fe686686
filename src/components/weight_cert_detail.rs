//! Weight Certificate Detail Component

use chassis_core::controller::CertTab;
use chassis_core::Record;
use leptos::prelude::*;

use crate::components::{detail_rows, FieldTable, TabBar, TitleBar};

#[component]
pub fn WeightCertDetail(cert: Record) -> impl IntoView {
    let (active, set_active) = signal(0usize);
    let subtitle = format!("{} {}", cert.display("make"), cert.display("model_id"));
    let labels = CertTab::ALL.iter().map(CertTab::label).collect();

    view! {
        <div class="detail-screen">
            <TitleBar title="Weight Certificate" subtitle=subtitle />
            <TabBar labels=labels active=active set_active=set_active />
            {move || {
                let tab = CertTab::ALL[active.get()];
                view! { <FieldTable rows=detail_rows(&cert, tab.fields()) /> }
            }}
        </div>
    }
}
