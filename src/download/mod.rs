pub mod cache;
pub mod client;

pub use cache::CacheManager;
pub use client::{SdeClient, SdeInfo};
