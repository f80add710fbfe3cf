use crate::content::ParsedQuestion;
use crate::models::domain::Profile;
use uuid::Uuid;

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a standard test profile
    pub fn test_profile(id: Uuid) -> Profile {
        Profile::new(id, "Test", "User")
    }

    /// Creates a parsed question with the given correct letter
    pub fn test_parsed_question(correct: &str) -> ParsedQuestion {
        ParsedQuestion {
            text: "What color is the sky?".to_string(),
            options: ["Red", "Blue", "Green", "Yellow"].map(String::from),
            correct: correct.to_string(),
        }
    }

    /// A completion in the exact format the parser expects
    pub fn test_completion(question_count: usize) -> String {
        let block = "Q: What color is the sky?\n\
                     A: Red\n\
                     B: Blue\n\
                     C: Green\n\
                     D: Yellow\n\
                     Correct: B\n";
        block.repeat(question_count)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::content::parse_questions;
    use uuid::Uuid;

    #[test]
    fn test_fixture_profile() {
        let id = Uuid::new_v4();
        let profile = test_profile(id);
        assert_eq!(profile.id, id);
        assert_eq!(profile.first_name, "Test");
    }

    #[test]
    fn test_fixture_completion_parses() {
        let completion = test_completion(3);
        assert_eq!(parse_questions(&completion).len(), 3);
    }

    #[test]
    fn test_fixture_parsed_question() {
        let question = test_parsed_question("C");
        assert_eq!(question.correct, "C");
        assert_eq!(question.options.len(), 4);
    }
}
