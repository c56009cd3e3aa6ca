pub mod client;
pub mod image;
pub mod mapper;
pub mod queries;
pub mod types;
