pub mod plan;
pub mod score;
