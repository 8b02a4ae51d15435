pub mod hazard_scheduler;
pub mod snake_view_model;
