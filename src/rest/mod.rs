/// REST client for the vSphere tagging service.
pub mod client;
pub mod errors;

pub use client::{ClientConfig, RestClient};
pub use errors::RestError;
