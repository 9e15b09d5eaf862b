mod drop_zone;
mod error_banner;
mod header;
mod result_panel;

pub use drop_zone::{DROP_ZONE_LABEL, drop_zone};
pub use error_banner::error_banner;
pub use header::header;
pub use result_panel::{ResultAction, result_panel};
