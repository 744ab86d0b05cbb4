pub mod client;

pub use client::{AwsJsonClient, parse_api_error};
