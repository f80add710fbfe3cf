pub mod auth_handler;
pub mod classroom_handler;
pub mod quiz_handler;

pub use auth_handler::{get_user, health_check, login, logout, signup};
pub use classroom_handler::{
    create_classroom, get_classroom_details, get_classroom_students, get_my_classrooms,
    join_classroom,
};
pub use quiz_handler::{fetch_quiz, generate_quiz, submit_quiz_results};
