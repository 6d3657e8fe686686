//! Document Commands
//!
//! Report generation plus the browser calls used to show documents.

use chassis_core::domain::{PDF_FAILED, PDF_NOT_AVAILABLE};
use chassis_core::repository::DocumentKind;

use super::client;

/// Render a sales order or quotation; returns the URL of the PDF
pub async fn generate_document(kind: DocumentKind, id: &str) -> Result<String, String> {
    let api = client();
    match api.generate_document(kind, id).await {
        Ok(Some(path)) => Ok(api.config().asset_url(&path)),
        Ok(None) => {
            log::warn!("{} returned no pdf_path for {}", kind.endpoint(), id);
            Err(PDF_NOT_AVAILABLE.to_string())
        }
        Err(e) => {
            log::error!("{} failed for {}: {}", kind.endpoint(), id, e);
            Err(PDF_FAILED.to_string())
        }
    }
}

pub fn open_in_new_tab(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.open_with_url_and_target(url, "_blank") {
        log::error!("Could not open {}: {:?}", url, e);
    }
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
