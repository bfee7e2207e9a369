pub mod config;
pub mod credentials;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

#[cfg(test)]
pub mod tests;

// Test utilities - publicly exposed with test feature
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
