use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quizroom_server::{
    clients::CompletionClient,
    errors::{AppError, AppResult},
    models::domain::{
        Classroom, MemberRecord, MemberRole, Membership, MembershipWithClassroom, Profile,
        Question, Quiz, Submission,
    },
    repositories::{ClassroomRepository, ProfileRepository, QuizRepository},
    services::{ClassroomService, GenerateQuizInput, QuizService},
};

struct InMemoryClassroomRepository {
    classrooms: Arc<RwLock<HashMap<Uuid, Classroom>>>,
    members: Arc<RwLock<Vec<Membership>>>,
}

impl InMemoryClassroomRepository {
    fn new() -> Self {
        Self {
            classrooms: Arc::new(RwLock::new(HashMap::new())),
            members: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ClassroomRepository for InMemoryClassroomRepository {
    async fn insert_classroom(&self, name: &str, teacher_id: Uuid) -> AppResult<Classroom> {
        let classroom = Classroom {
            id: Uuid::new_v4(),
            name: name.to_string(),
            teacher_id,
            created_at: Some(Utc::now()),
        };
        let mut classrooms = self.classrooms.write().await;
        classrooms.insert(classroom.id, classroom.clone());
        Ok(classroom)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Classroom>> {
        let classrooms = self.classrooms.read().await;
        Ok(classrooms.get(&id).cloned())
    }

    async fn insert_member(
        &self,
        classroom_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> AppResult<()> {
        let mut members = self.members.write().await;
        members.push(Membership {
            classroom_id,
            user_id,
            role,
            joined_at: Some(Utc::now()),
        });
        Ok(())
    }

    async fn find_membership(
        &self,
        classroom_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Membership>> {
        let members = self.members.read().await;
        Ok(members
            .iter()
            .find(|m| m.classroom_id == classroom_id && m.user_id == user_id)
            .cloned())
    }

    async fn list_memberships_for_user(
        &self,
        user_id: Uuid,
    ) -> AppResult<Vec<MembershipWithClassroom>> {
        let members = self.members.read().await;
        let classrooms = self.classrooms.read().await;

        Ok(members
            .iter()
            .filter(|m| m.user_id == user_id)
            .filter_map(|m| {
                classrooms
                    .get(&m.classroom_id)
                    .map(|c| MembershipWithClassroom {
                        role: m.role,
                        joined_at: m.joined_at,
                        classroom: c.clone(),
                    })
            })
            .collect())
    }

    async fn list_members(&self, classroom_id: Uuid) -> AppResult<Vec<MemberRecord>> {
        let members = self.members.read().await;
        Ok(members
            .iter()
            .filter(|m| m.classroom_id == classroom_id)
            .map(|m| MemberRecord {
                user_id: m.user_id,
                role: m.role,
                joined_at: m.joined_at,
                profile: None,
            })
            .collect())
    }
}

struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<Uuid, Quiz>>>,
    questions: Arc<RwLock<Vec<Question>>>,
    submissions: Arc<RwLock<Vec<Submission>>>,
}

impl InMemoryQuizRepository {
    fn new() -> Self {
        Self {
            quizzes: Arc::new(RwLock::new(HashMap::new())),
            questions: Arc::new(RwLock::new(Vec::new())),
            submissions: Arc::new(RwLock::new(Vec::new())),
        }
    }

    async fn seed_quiz(&self, quiz: Quiz, questions: Vec<Question>) {
        self.quizzes.write().await.insert(quiz.id, quiz);
        self.questions.write().await.extend(questions);
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn insert_quiz(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        quizzes.insert(quiz.id, quiz.clone());
        Ok(quiz)
    }

    async fn find_in_classroom(
        &self,
        quiz_id: Uuid,
        classroom_id: Uuid,
    ) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes
            .get(&quiz_id)
            .filter(|q| q.classroom_id == classroom_id)
            .cloned())
    }

    async fn list_by_classroom(&self, classroom_id: Uuid) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes
            .values()
            .filter(|q| q.classroom_id == classroom_id)
            .cloned()
            .collect())
    }

    async fn insert_questions(&self, new: Vec<Question>) -> AppResult<()> {
        let mut questions = self.questions.write().await;
        questions.extend(new);
        Ok(())
    }

    async fn questions_for_quiz(&self, quiz_id: Uuid) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        Ok(questions
            .iter()
            .filter(|q| q.quiz_id == quiz_id)
            .cloned()
            .collect())
    }

    async fn insert_submission(&self, submission: Submission) -> AppResult<()> {
        let mut submissions = self.submissions.write().await;
        submissions.push(submission);
        Ok(())
    }

    async fn mark_completed(&self, quiz_id: Uuid) -> AppResult<()> {
        let mut quizzes = self.quizzes.write().await;
        if let Some(quiz) = quizzes.get_mut(&quiz_id) {
            quiz.is_completed = true;
        }
        Ok(())
    }
}

struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<Uuid, Profile>>>,
}

impl InMemoryProfileRepository {
    fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn insert(&self, profile: Profile) -> AppResult<()> {
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.id, profile);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&id).cloned())
    }
}

/// Completion client that always returns a canned reply.
struct StubCompletionClient {
    reply: String,
}

#[async_trait]
impl CompletionClient for StubCompletionClient {
    async fn complete(&self, _prompt: &str) -> AppResult<String> {
        Ok(self.reply.clone())
    }
}

fn classroom_service() -> (ClassroomService, Arc<InMemoryClassroomRepository>) {
    let classrooms = Arc::new(InMemoryClassroomRepository::new());
    let profiles = Arc::new(InMemoryProfileRepository::new());
    let quizzes = Arc::new(InMemoryQuizRepository::new());
    let service = ClassroomService::new(classrooms.clone(), profiles, quizzes);
    (service, classrooms)
}

fn quiz_service(reply: &str) -> (QuizService, Arc<InMemoryQuizRepository>, Arc<InMemoryClassroomRepository>) {
    let quizzes = Arc::new(InMemoryQuizRepository::new());
    let classrooms = Arc::new(InMemoryClassroomRepository::new());
    let llm = Arc::new(StubCompletionClient {
        reply: reply.to_string(),
    });
    let service = QuizService::new(quizzes.clone(), classrooms.clone(), llm);
    (service, quizzes, classrooms)
}

fn three_question_completion() -> String {
    "Here are your questions.\n\
     Q: What is the powerhouse of the cell?\n\
     A: Nucleus\n\
     B: Mitochondria\n\
     C: Ribosome\n\
     D: Golgi body\n\
     Correct: B\n\
     Q: Which base pairs with adenine in DNA?\n\
     A: Guanine\n\
     B: Cytosine\n\
     C: Thymine\n\
     D: Uracil\n\
     Correct: C\n\
     Q: What process produces two identical daughter cells?\n\
     A: Mitosis\n\
     B: Meiosis\n\
     C: Fission\n\
     D: Budding\n\
     Correct: A\n"
        .to_string()
}

fn generate_input(classroom_id: Uuid) -> GenerateQuizInput {
    GenerateQuizInput {
        file_name: "notes.txt".to_string(),
        file_bytes: b"The mitochondria is the powerhouse of the cell.".to_vec(),
        name: "Cell Biology".to_string(),
        num_questions: 3,
        mcq: 3,
        frq: 0,
        classroom_id,
    }
}

#[tokio::test]
async fn test_join_after_create_then_conflict_on_rejoin() {
    let (service, _) = classroom_service();
    let teacher_id = Uuid::new_v4();
    let student_id = Uuid::new_v4();

    let classroom = service.create("Biology 101", teacher_id).await.unwrap();

    let joined = service.join(classroom.id, student_id).await.unwrap();
    assert_eq!(joined.id, classroom.id);

    let err = service.join(classroom.id, student_id).await.unwrap_err();
    assert!(matches!(err, AppError::AlreadyExists(_)));
}

#[tokio::test]
async fn test_join_unknown_classroom_is_not_found() {
    let (service, _) = classroom_service();

    let err = service.join(Uuid::new_v4(), Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_list_for_user_reports_role_per_classroom() {
    let (service, _) = classroom_service();
    let teacher_id = Uuid::new_v4();
    let student_id = Uuid::new_v4();

    let classroom = service.create("Chemistry", teacher_id).await.unwrap();
    service.join(classroom.id, student_id).await.unwrap();

    let teacher_list = service.list_for_user(teacher_id).await.unwrap();
    assert_eq!(teacher_list.len(), 1);
    assert_eq!(teacher_list[0].role, MemberRole::Teacher);

    let student_list = service.list_for_user(student_id).await.unwrap();
    assert_eq!(student_list.len(), 1);
    assert_eq!(student_list[0].role, MemberRole::Student);
    assert_eq!(student_list[0].name, "Chemistry");
}

#[tokio::test]
async fn test_detail_requires_membership() {
    let (service, _) = classroom_service();
    let teacher_id = Uuid::new_v4();
    let outsider_id = Uuid::new_v4();

    let classroom = service.create("Physics", teacher_id).await.unwrap();

    let detail = service.detail(classroom.id, teacher_id).await.unwrap();
    assert_eq!(detail.your_role, MemberRole::Teacher);
    assert_eq!(detail.members.len(), 1);

    let err = service.detail(classroom.id, outsider_id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_students_roster_is_teacher_only() {
    let (service, _) = classroom_service();
    let teacher_id = Uuid::new_v4();
    let student_id = Uuid::new_v4();

    let classroom = service.create("History", teacher_id).await.unwrap();
    service.join(classroom.id, student_id).await.unwrap();

    let roster = service.students(classroom.id, teacher_id).await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].user_id, student_id);

    let err = service.students(classroom.id, student_id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_generate_quiz_persists_parsed_questions() {
    let (service, quizzes, _) = quiz_service(&three_question_completion());
    let classroom_id = Uuid::new_v4();
    let teacher_id = Uuid::new_v4();

    let response = service
        .generate(teacher_id, generate_input(classroom_id))
        .await
        .unwrap();

    assert_eq!(response.status, "success");
    assert_eq!(response.classroom_id, classroom_id);
    assert_eq!(response.questions_generated, 3);

    let stored = quizzes.questions_for_quiz(response.quiz_id).await.unwrap();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0].correct_answer, "B");

    let quiz = quizzes
        .find_in_classroom(response.quiz_id, classroom_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(quiz.name, "Cell Biology");
    assert!(!quiz.is_completed);
}

#[tokio::test]
async fn test_generate_quiz_rejects_unsupported_file_type() {
    let (service, _, _) = quiz_service(&three_question_completion());

    let mut input = generate_input(Uuid::new_v4());
    input.file_name = "slides.pptx".to_string();

    let err = service.generate(Uuid::new_v4(), input).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test]
async fn test_generate_quiz_rejects_zero_question_count() {
    let (service, quizzes, _) = quiz_service(&three_question_completion());

    let mut input = generate_input(Uuid::new_v4());
    input.num_questions = 0;
    input.mcq = 0;

    let err = service.generate(Uuid::new_v4(), input).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    assert!(quizzes.quizzes.read().await.is_empty());
}

#[tokio::test]
async fn test_generate_quiz_rejects_mcq_above_total() {
    let (service, quizzes, _) = quiz_service(&three_question_completion());

    let mut input = generate_input(Uuid::new_v4());
    input.num_questions = 3;
    input.mcq = 5;

    let err = service.generate(Uuid::new_v4(), input).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    assert!(quizzes.quizzes.read().await.is_empty());
}

#[tokio::test]
async fn test_generate_quiz_rejects_unparseable_completion() {
    let (service, quizzes, _) = quiz_service("I cannot answer that.");

    let err = service
        .generate(Uuid::new_v4(), generate_input(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    // Nothing should have been persisted.
    assert!(quizzes.quizzes.read().await.is_empty());
}

#[tokio::test]
async fn test_fetch_hides_answers_from_students_until_completed() {
    let (service, quizzes, classrooms) = quiz_service("");
    let classroom_id = Uuid::new_v4();
    let teacher_id = Uuid::new_v4();
    let student_id = Uuid::new_v4();

    classrooms
        .insert_member(classroom_id, teacher_id, MemberRole::Teacher)
        .await
        .unwrap();
    classrooms
        .insert_member(classroom_id, student_id, MemberRole::Student)
        .await
        .unwrap();

    let quiz = Quiz::new("Midterm", classroom_id, teacher_id);
    let quiz_id = quiz.id;
    let question = Question {
        id: Uuid::new_v4(),
        quiz_id,
        question_text: "What is 2 + 2?".to_string(),
        options: ["3", "4", "5", "6"].map(String::from).to_vec(),
        correct_answer: "B".to_string(),
    };
    quizzes.seed_quiz(quiz, vec![question]).await;

    let student_view = service.fetch(classroom_id, quiz_id, student_id).await.unwrap();
    assert_eq!(student_view[0].correct_answer, None);

    let teacher_view = service.fetch(classroom_id, quiz_id, teacher_id).await.unwrap();
    assert_eq!(teacher_view[0].correct_answer.as_deref(), Some("B"));

    quizzes.mark_completed(quiz_id).await.unwrap();

    let after_completion = service.fetch(classroom_id, quiz_id, student_id).await.unwrap();
    assert_eq!(after_completion[0].correct_answer.as_deref(), Some("B"));
}

#[tokio::test]
async fn test_fetch_rejects_non_members_and_unknown_quizzes() {
    let (service, quizzes, classrooms) = quiz_service("");
    let classroom_id = Uuid::new_v4();
    let member_id = Uuid::new_v4();

    let err = service
        .fetch(classroom_id, Uuid::new_v4(), member_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    classrooms
        .insert_member(classroom_id, member_id, MemberRole::Student)
        .await
        .unwrap();

    let err = service
        .fetch(classroom_id, Uuid::new_v4(), member_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // A quiz from another classroom is not reachable through this one.
    let foreign = Quiz::new("Other", Uuid::new_v4(), Uuid::new_v4());
    let foreign_id = foreign.id;
    quizzes.seed_quiz(foreign, vec![]).await;

    let err = service
        .fetch(classroom_id, foreign_id, member_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_submit_grades_and_marks_quiz_completed() {
    let (service, quizzes, _) = quiz_service("");
    let classroom_id = Uuid::new_v4();
    let student_id = Uuid::new_v4();

    let quiz = Quiz::new("Final", classroom_id, Uuid::new_v4());
    let quiz_id = quiz.id;
    let questions: Vec<Question> = ["A", "B", "C", "D"]
        .iter()
        .map(|letter| Question {
            id: Uuid::new_v4(),
            quiz_id,
            question_text: format!("Pick {}", letter),
            options: ["one", "two", "three", "four"].map(String::from).to_vec(),
            correct_answer: letter.to_string(),
        })
        .collect();
    quizzes.seed_quiz(quiz, questions).await;

    let answers: Vec<String> = ["a", "B", "x", "D"].map(String::from).to_vec();
    let response = service.submit(quiz_id, student_id, answers).await.unwrap();

    assert_eq!(response.score, 3);
    assert_eq!(response.percentage, 75.0);
    assert_eq!(response.correct_answers, vec!["A", "B", "C", "D"]);

    let quiz = quizzes
        .find_in_classroom(quiz_id, classroom_id)
        .await
        .unwrap()
        .unwrap();
    assert!(quiz.is_completed);

    let submissions = quizzes.submissions.read().await;
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].student_id, student_id);
    assert_eq!(submissions[0].score, 3);
}

#[tokio::test]
async fn test_resubmission_records_fresh_row_and_stays_completed() {
    let (service, quizzes, _) = quiz_service("");
    let classroom_id = Uuid::new_v4();
    let student_id = Uuid::new_v4();

    let quiz = Quiz::new("Retake", classroom_id, Uuid::new_v4());
    let quiz_id = quiz.id;
    let questions: Vec<Question> = ["A", "B"]
        .iter()
        .map(|letter| Question {
            id: Uuid::new_v4(),
            quiz_id,
            question_text: format!("Pick {}", letter),
            options: ["one", "two", "three", "four"].map(String::from).to_vec(),
            correct_answer: letter.to_string(),
        })
        .collect();
    quizzes.seed_quiz(quiz, questions).await;

    let first = service
        .submit(quiz_id, student_id, ["A", "C"].map(String::from).to_vec())
        .await
        .unwrap();
    assert_eq!(first.score, 1);

    let second = service
        .submit(quiz_id, student_id, ["A", "B"].map(String::from).to_vec())
        .await
        .unwrap();
    assert_eq!(second.score, 2);

    // Each submission is a fresh row; the completion flag stays set.
    let submissions = quizzes.submissions.read().await;
    assert_eq!(submissions.len(), 2);
    assert_eq!(submissions[0].score, 1);
    assert_eq!(submissions[1].score, 2);

    let quiz = quizzes
        .find_in_classroom(quiz_id, classroom_id)
        .await
        .unwrap()
        .unwrap();
    assert!(quiz.is_completed);
}
