pub mod cluster;
pub mod driver;
pub mod engine;
pub mod errors;
pub mod extensions;
pub mod metrics;
pub mod registry;

#[cfg(test)]
mod testutil;
