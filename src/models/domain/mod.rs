pub mod classroom;
pub mod profile;
pub mod question;
pub mod quiz;
pub mod submission;

pub use classroom::{Classroom, MemberRecord, MemberRole, Membership, MembershipWithClassroom};
pub use profile::Profile;
pub use question::Question;
pub use quiz::Quiz;
pub use submission::Submission;
