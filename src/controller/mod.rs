//! API controllers, mounted under `/api`.

pub mod credit_score;
pub mod misc;
pub mod results;
