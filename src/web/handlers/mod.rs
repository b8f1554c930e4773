pub mod posts;
pub mod welcome;
