pub mod status_route;
