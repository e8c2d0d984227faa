pub use self::{
    applicant::{ApplicantInput, MAX_AMOUNT},
    score_result::{SaveResult, ScoreResult},
};

mod applicant;
mod score_result;
