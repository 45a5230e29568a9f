pub mod app;
pub mod header;
pub mod main_app;
pub mod paned;
pub mod text_pane;
