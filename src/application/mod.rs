// Application layer - Use cases and the seams they depend on
pub mod dashboard_controller;
pub mod dashboard_source;
pub mod dashboard_state;
pub mod inventory_upstream;
pub mod proxy_service;
