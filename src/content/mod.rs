pub mod extract;
pub mod parser;

pub use extract::{extract, truncate_for_prompt, ExtractionError, ALLOWED_EXTENSIONS};
pub use parser::{parse_questions, ParsedQuestion};
