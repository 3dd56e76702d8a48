pub mod snake_selection_view_model;
pub mod snake_view_model;
