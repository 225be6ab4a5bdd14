pub mod directory_api;
pub mod errors;
pub mod relay_api;
pub mod stats_api;
pub mod stats_objects;
