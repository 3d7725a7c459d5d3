use async_trait::async_trait;

use super::models::{Answers, CourseMatch, Recommendation};

/// Shown as the winner when the scoring service could not be used.
pub const FALLBACK_WINNER: &str = "เชื่อมต่อ Server ไม่ได้";
/// Sole course of the fallback, telling the operator to start the backend.
pub const FALLBACK_COURSE: &str = "กรุณารันไฟล์ server.py";
pub const FALLBACK_RUNNER_UP: &str = "-";

/// Source of recommendations for a set of answers.
///
/// The return type is total: implementations absorb their own failures and
/// answer with [`fallback_recommendation`] rather than an error.
#[async_trait]
pub trait ScoringClient: Send + Sync {
    async fn fetch_recommendation(&self, answers: &Answers) -> Recommendation;
}

/// The degraded but well-formed result rendered when scoring fails.
pub fn fallback_recommendation() -> Recommendation {
    Recommendation {
        winner: FALLBACK_WINNER.to_string(),
        score: 0.0,
        courses: vec![CourseMatch {
            name: FALLBACK_COURSE.to_string(),
            match_score: 0.0,
        }],
        runner_up: FALLBACK_RUNNER_UP.to_string(),
    }
}

pub fn is_fallback(recommendation: &Recommendation) -> bool {
    *recommendation == fallback_recommendation()
}
