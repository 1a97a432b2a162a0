// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod thingspeak_client;
pub mod viewport;
