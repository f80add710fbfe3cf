/// One multiple-choice question recovered from a model completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestion {
    pub text: String,
    /// Options A through D, in order.
    pub options: [String; 4],
    /// The correct option letter, one of "A".."D".
    pub correct: String,
}

const QUESTION_DELIMITER: &str = "Q:";
const OPTION_PREFIXES: [&str; 4] = ["A:", "B:", "C:", "D:"];
const CORRECT_PREFIX: &str = "Correct:";

/// Minimum non-empty lines for a usable block: one question, four options,
/// one correct-answer line.
const MIN_BLOCK_LINES: usize = 6;

/// Splits a free-text model completion into question records.
///
/// The completion is split on the literal `Q:` delimiter; anything before the
/// first question is discarded. Malformed blocks (too few lines, or a correct
/// letter outside A-D) are silently skipped rather than failing the whole
/// completion. Block order is preserved and duplicates are kept.
pub fn parse_questions(raw: &str) -> Vec<ParsedQuestion> {
    let mut questions = Vec::new();

    for block in raw.trim().split(QUESTION_DELIMITER).skip(1) {
        if let Some(question) = parse_block(block) {
            questions.push(question);
        } else {
            log::debug!("skipping malformed question block: {:?}", block.trim());
        }
    }

    questions
}

fn parse_block(block: &str) -> Option<ParsedQuestion> {
    let lines: Vec<&str> = block
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < MIN_BLOCK_LINES {
        return None;
    }

    let text = lines[0].to_string();
    let options = [
        strip_prefix(lines[1], OPTION_PREFIXES[0]),
        strip_prefix(lines[2], OPTION_PREFIXES[1]),
        strip_prefix(lines[3], OPTION_PREFIXES[2]),
        strip_prefix(lines[4], OPTION_PREFIXES[3]),
    ];

    let correct = strip_prefix(lines[5], CORRECT_PREFIX).to_uppercase();
    if !matches!(correct.as_str(), "A" | "B" | "C" | "D") {
        return None;
    }

    Some(ParsedQuestion {
        text,
        options,
        correct,
    })
}

fn strip_prefix(line: &str, prefix: &str) -> String {
    line.strip_prefix(prefix).unwrap_or(line).trim().to_string()
}
