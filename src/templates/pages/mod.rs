pub mod form;
pub mod home;
pub mod list;
pub mod map;
pub mod stats;

pub use form::{property_form_page, FormMode, FormVm};
pub use home::home_page;
pub use list::list_page;
pub use map::map_page;
pub use stats::stats_page;
