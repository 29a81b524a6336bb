pub mod dashboard;
pub mod form;
pub mod menu;
pub mod progress_bar;
pub mod stats_sidebar;
pub mod typing_area;
