pub mod reset_memory_request;
pub mod reset_memory_route;
