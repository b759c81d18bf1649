pub mod chart;
pub mod filters;
