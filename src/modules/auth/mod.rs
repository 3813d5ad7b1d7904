pub mod middleware;
pub mod provider;
