// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_response;
pub mod http_upstream;
pub mod proxy_source;
