pub mod credit_score;
