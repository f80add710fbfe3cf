pub mod auth_client;
pub mod llm;

pub use auth_client::{AuthClient, AuthSession, AuthUser, SupabaseAuthClient};
pub use llm::{CompletionClient, OpenAiCompletionClient};

#[cfg(test)]
pub use auth_client::MockAuthClient;
#[cfg(test)]
pub use llm::MockCompletionClient;
