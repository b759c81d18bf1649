pub mod api_utils;
pub mod clipboard;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod icons;
pub mod list_utils;
pub mod query;
pub mod timer;
pub mod transient;
