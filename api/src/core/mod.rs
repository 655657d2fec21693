pub mod app_state;
pub mod json_body;
