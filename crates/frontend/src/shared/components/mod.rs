pub mod copy_button;
pub mod date_input;
pub mod date_range_picker;
pub mod error_banner;
pub mod page_header;
pub mod pagination_controls;
