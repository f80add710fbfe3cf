#[derive(Debug, Clone, PartialEq)]
pub struct GradeOutcome {
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
}

pub struct GradingService;

impl GradingService {
    /// Position-wise, case-insensitive comparison of submitted answers
    /// against the correct letters. Answers beyond the question count are
    /// ignored; unanswered questions count as wrong.
    pub fn grade(correct: &[String], submitted: &[String]) -> GradeOutcome {
        let total = correct.len() as u32;

        let score = submitted
            .iter()
            .zip(correct.iter())
            .filter(|(answer, expected)| {
                answer.trim().eq_ignore_ascii_case(expected.trim())
            })
            .count() as u32;

        let percentage = if total > 0 {
            f64::from(score) / f64::from(total) * 100.0
        } else {
            0.0
        };

        GradeOutcome {
            score,
            total,
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(letters: &[&str]) -> Vec<String> {
        letters.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_grade_mixed_case_and_wrong_answers() {
        let correct = answers(&["A", "B", "C", "D"]);
        let submitted = answers(&["a", "B", "x", "D"]);

        let outcome = GradingService::grade(&correct, &submitted);

        assert_eq!(outcome.score, 3);
        assert_eq!(outcome.total, 4);
        assert_eq!(outcome.percentage, 75.0);
    }

    #[test]
    fn test_grade_empty_quiz() {
        let outcome = GradingService::grade(&[], &answers(&["A"]));

        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.total, 0);
        assert_eq!(outcome.percentage, 0.0);
    }

    #[test]
    fn test_grade_short_submission_counts_missing_as_wrong() {
        let correct = answers(&["A", "B", "C"]);
        let submitted = answers(&["A"]);

        let outcome = GradingService::grade(&correct, &submitted);

        assert_eq!(outcome.score, 1);
        assert_eq!(outcome.total, 3);
    }

    #[test]
    fn test_grade_extra_answers_ignored() {
        let correct = answers(&["A"]);
        let submitted = answers(&["A", "B", "C"]);

        let outcome = GradingService::grade(&correct, &submitted);

        assert_eq!(outcome.score, 1);
        assert_eq!(outcome.total, 1);
        assert_eq!(outcome.percentage, 100.0);
    }

    #[test]
    fn test_grade_whitespace_tolerant() {
        let correct = answers(&["A "]);
        let submitted = answers(&[" a"]);

        assert_eq!(GradingService::grade(&correct, &submitted).score, 1);
    }
}
