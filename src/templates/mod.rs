pub mod components;
pub mod layouts;
pub mod pages;

pub use components::{card, notice, Notice};
pub use layouts::desktop::desktop_layout;
