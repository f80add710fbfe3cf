use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::{eq, Postgrest},
    errors::AppResult,
    models::domain::Profile,
};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn insert(&self, profile: Profile) -> AppResult<()>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>>;
}

pub struct RestProfileRepository {
    db: Postgrest,
}

impl RestProfileRepository {
    pub fn new(db: Postgrest) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for RestProfileRepository {
    async fn insert(&self, profile: Profile) -> AppResult<()> {
        self.db.insert_only("profiles", &profile).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>> {
        let mut rows: Vec<Profile> = self
            .db
            .select("profiles", &[("id", eq(id)), ("limit", "1".to_string())])
            .await?;
        Ok(rows.pop())
    }
}
