pub mod compare_client;

pub use compare_client::{CompareApi, CompareClient};
