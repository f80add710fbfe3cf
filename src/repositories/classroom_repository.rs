use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::{eq, Postgrest},
    errors::{AppError, AppResult},
    models::domain::{Classroom, MemberRecord, MemberRole, Membership, MembershipWithClassroom},
};

#[async_trait]
pub trait ClassroomRepository: Send + Sync {
    async fn insert_classroom(&self, name: &str, teacher_id: Uuid) -> AppResult<Classroom>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Classroom>>;
    async fn insert_member(
        &self,
        classroom_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> AppResult<()>;
    async fn find_membership(
        &self,
        classroom_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Membership>>;
    async fn list_memberships_for_user(
        &self,
        user_id: Uuid,
    ) -> AppResult<Vec<MembershipWithClassroom>>;
    async fn list_members(&self, classroom_id: Uuid) -> AppResult<Vec<MemberRecord>>;
}

pub struct RestClassroomRepository {
    db: Postgrest,
}

impl RestClassroomRepository {
    pub fn new(db: Postgrest) -> Self {
        Self { db }
    }
}

#[derive(Serialize)]
struct NewClassroom<'a> {
    name: &'a str,
    teacher_id: Uuid,
}

#[derive(Serialize)]
struct NewMembership {
    classroom_id: Uuid,
    user_id: Uuid,
    role: MemberRole,
}

#[async_trait]
impl ClassroomRepository for RestClassroomRepository {
    async fn insert_classroom(&self, name: &str, teacher_id: Uuid) -> AppResult<Classroom> {
        let mut rows: Vec<Classroom> = self
            .db
            .insert("classrooms", &NewClassroom { name, teacher_id })
            .await?;

        rows.pop()
            .ok_or_else(|| AppError::Upstream("classroom insert returned no row".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Classroom>> {
        let mut rows: Vec<Classroom> = self
            .db
            .select("classrooms", &[("id", eq(id)), ("limit", "1".to_string())])
            .await?;
        Ok(rows.pop())
    }

    async fn insert_member(
        &self,
        classroom_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> AppResult<()> {
        self.db
            .insert_only(
                "classroom_members",
                &NewMembership {
                    classroom_id,
                    user_id,
                    role,
                },
            )
            .await
    }

    async fn find_membership(
        &self,
        classroom_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Membership>> {
        let mut rows: Vec<Membership> = self
            .db
            .select(
                "classroom_members",
                &[
                    ("classroom_id", eq(classroom_id)),
                    ("user_id", eq(user_id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.pop())
    }

    async fn list_memberships_for_user(
        &self,
        user_id: Uuid,
    ) -> AppResult<Vec<MembershipWithClassroom>> {
        // Embedded select: membership row joined with its classroom.
        self.db
            .select(
                "classroom_members",
                &[
                    ("user_id", eq(user_id)),
                    (
                        "select",
                        "role,joined_at,classroom:classroom_id(id,name,teacher_id,created_at)"
                            .to_string(),
                    ),
                ],
            )
            .await
    }

    async fn list_members(&self, classroom_id: Uuid) -> AppResult<Vec<MemberRecord>> {
        self.db
            .select(
                "classroom_members",
                &[
                    ("classroom_id", eq(classroom_id)),
                    (
                        "select",
                        "user_id,role,joined_at,profile:user_id(id,first_name,last_name,image_url,pronouns)"
                            .to_string(),
                    ),
                ],
            )
            .await
    }
}
