pub mod classroom_repository;
pub mod profile_repository;
pub mod quiz_repository;

pub use classroom_repository::{ClassroomRepository, RestClassroomRepository};
pub use profile_repository::{ProfileRepository, RestProfileRepository};
pub use quiz_repository::{QuizRepository, RestQuizRepository};
