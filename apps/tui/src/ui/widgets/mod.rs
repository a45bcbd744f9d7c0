pub mod chart;
pub mod dropdown;
pub mod popup;
