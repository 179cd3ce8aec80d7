use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Error page body for any status.
pub fn error_page(status: u16, message: &str) -> Markup {
    desktop_layout(
        &format!("Error {status}"),
        html! {
            p { (message) }
            p { a href="/" { "← Back to home" } }
        },
    )
}
