//! Blocking browser dialogs, routed through the webview on every platform.

use dioxus::prelude::*;

fn js_string(message: &str) -> String {
    serde_json::to_string(message).unwrap_or_else(|_| "\"\"".to_string())
}

pub fn show_alert(message: &str) {
    let _ = document::eval(&format!("alert({});", js_string(message)));
}

/// Ask the user to confirm a destructive action.
pub async fn confirm_action(message: &str) -> bool {
    document::eval(&format!("return confirm({});", js_string(message)))
        .join::<bool>()
        .await
        .unwrap_or(false)
}
