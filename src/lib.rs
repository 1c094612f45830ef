pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod login;
pub mod model;
pub mod server;
pub mod service;
pub mod sign;
pub mod transform;

#[cfg(test)]
mod testing;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
