// Infrastructure layer - External dependencies and adapters
pub mod codec;
pub mod config;
pub mod feed_client;
pub mod rest_gateway;
pub mod synthetic;
