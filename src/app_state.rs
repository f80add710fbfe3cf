use std::sync::Arc;

use chrono::Duration;

use crate::{
    auth::CookieSigner,
    clients::{OpenAiCompletionClient, SupabaseAuthClient},
    config::Config,
    db::Postgrest,
    repositories::{RestClassroomRepository, RestProfileRepository, RestQuizRepository},
    services::{AccountService, ClassroomService, QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub classroom_service: Arc<ClassroomService>,
    pub quiz_service: Arc<QuizService>,
    pub cookie_signer: CookieSigner,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let db = Postgrest::new(&config);

        let profiles = Arc::new(RestProfileRepository::new(db.clone()));
        let classrooms = Arc::new(RestClassroomRepository::new(db.clone()));
        let quizzes = Arc::new(RestQuizRepository::new(db));

        let auth_client = Arc::new(SupabaseAuthClient::new(&config));
        let llm_client = Arc::new(OpenAiCompletionClient::new(&config));

        let account_service = Arc::new(AccountService::new(auth_client, profiles.clone()));
        let classroom_service = Arc::new(ClassroomService::new(
            classrooms.clone(),
            profiles,
            quizzes.clone(),
        ));
        let quiz_service = Arc::new(QuizService::new(quizzes, classrooms, llm_client));

        let cookie_signer = CookieSigner::new(
            &config.cookie_secret,
            Duration::seconds(config.cookie_max_age_secs),
        );

        Self {
            account_service,
            classroom_service,
            quiz_service,
            cookie_signer,
            config: Arc::new(config),
        }
    }
}
