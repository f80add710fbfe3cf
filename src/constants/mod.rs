pub mod quiz_prompt;

pub use quiz_prompt::quiz_prompt;
