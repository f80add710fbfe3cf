pub mod account_service;
pub mod classroom_service;
pub mod grading;
pub mod quiz_service;

pub use account_service::AccountService;
pub use classroom_service::ClassroomService;
pub use grading::{GradeOutcome, GradingService};
pub use quiz_service::{GenerateQuizInput, QuizService};
