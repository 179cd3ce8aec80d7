use maud::{html, Markup};

pub mod error;

pub use error::error_page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// A one-line message shown above the page content.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}

pub fn notice(n: &Notice) -> Markup {
    let class = match n.kind {
        NoticeKind::Success => "notice success",
        NoticeKind::Warning => "notice warning",
        NoticeKind::Error => "notice error",
    };
    html! {
        div class=(class) role="status" { (n.message) }
    }
}

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

pub fn metric(label: &str, value: &str) -> Markup {
    html! {
        div class="metric" {
            div class="label" { (label) }
            div class="value" { (value) }
        }
    }
}
