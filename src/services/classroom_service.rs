use std::sync::Arc;

use futures::future::try_join_all;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Classroom, MemberRecord, MemberRole},
        dto::response::{
            ClassroomDetailResponse, ClassroomListEntry, ClassroomView, MemberView, TeacherInfo,
        },
    },
    repositories::{ClassroomRepository, ProfileRepository, QuizRepository},
};

pub struct ClassroomService {
    classrooms: Arc<dyn ClassroomRepository>,
    profiles: Arc<dyn ProfileRepository>,
    quizzes: Arc<dyn QuizRepository>,
}

impl ClassroomService {
    pub fn new(
        classrooms: Arc<dyn ClassroomRepository>,
        profiles: Arc<dyn ProfileRepository>,
        quizzes: Arc<dyn QuizRepository>,
    ) -> Self {
        Self {
            classrooms,
            profiles,
            quizzes,
        }
    }

    async fn classroom_view(&self, classroom: Classroom) -> AppResult<ClassroomView> {
        let teacher_profile = self.profiles.find_by_id(classroom.teacher_id).await?;
        Ok(ClassroomView {
            id: classroom.id,
            name: classroom.name,
            created_at: classroom.created_at,
            teacher: TeacherInfo::from_profile(classroom.teacher_id, teacher_profile),
        })
    }

    /// The creator becomes the classroom's single teacher member.
    pub async fn create(&self, name: &str, teacher_id: Uuid) -> AppResult<ClassroomView> {
        let classroom = self.classrooms.insert_classroom(name, teacher_id).await?;
        self.classrooms
            .insert_member(classroom.id, teacher_id, MemberRole::Teacher)
            .await?;

        log::info!("classroom {} created by {}", classroom.id, teacher_id);
        self.classroom_view(classroom).await
    }

    /// Joining twice is a conflict. Two racing joins can both pass this
    /// check; the external store's uniqueness constraint is the backstop.
    pub async fn join(&self, classroom_id: Uuid, user_id: Uuid) -> AppResult<ClassroomView> {
        let classroom = self
            .classrooms
            .find_by_id(classroom_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Classroom not found".to_string()))?;

        if self
            .classrooms
            .find_membership(classroom_id, user_id)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(
                "You are already a member of this classroom".to_string(),
            ));
        }

        self.classrooms
            .insert_member(classroom_id, user_id, MemberRole::Student)
            .await?;

        log::info!("user {} joined classroom {}", user_id, classroom_id);
        self.classroom_view(classroom).await
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<ClassroomListEntry>> {
        let memberships = self.classrooms.list_memberships_for_user(user_id).await?;

        // Teacher profile lookups are independent, fetch them concurrently.
        try_join_all(memberships.into_iter().map(|membership| async move {
            let classroom = membership.classroom;
            let teacher_profile = self.profiles.find_by_id(classroom.teacher_id).await?;

            Ok::<_, AppError>(ClassroomListEntry {
                id: classroom.id,
                name: classroom.name,
                role: membership.role,
                joined_at: membership.joined_at,
                teacher: TeacherInfo::from_profile(classroom.teacher_id, teacher_profile),
            })
        }))
        .await
    }

    pub async fn detail(
        &self,
        classroom_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<ClassroomDetailResponse> {
        let membership = self
            .classrooms
            .find_membership(classroom_id, user_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("Not a member of this classroom".to_string()))?;

        let classroom = self
            .classrooms
            .find_by_id(classroom_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Classroom not found".to_string()))?;

        let quizzes = self.quizzes.list_by_classroom(classroom_id).await?;
        let members = self.classrooms.list_members(classroom_id).await?;

        Ok(ClassroomDetailResponse {
            status: "success",
            classroom: self.classroom_view(classroom).await?,
            quizzes,
            members: members.into_iter().map(member_view).collect(),
            your_role: membership.role,
        })
    }

    /// Student roster, teacher only.
    pub async fn students(&self, classroom_id: Uuid, user_id: Uuid) -> AppResult<Vec<MemberView>> {
        let membership = self
            .classrooms
            .find_membership(classroom_id, user_id)
            .await?;

        match membership {
            Some(m) if m.role == MemberRole::Teacher => {}
            _ => {
                return Err(AppError::Forbidden(
                    "Only teachers can view student list".to_string(),
                ))
            }
        }

        let members = self.classrooms.list_members(classroom_id).await?;
        Ok(members
            .into_iter()
            .filter(|m| m.role == MemberRole::Student)
            .map(member_view)
            .collect())
    }
}

fn member_view(record: MemberRecord) -> MemberView {
    let (first_name, last_name, image_url, pronouns) = match record.profile {
        Some(p) => (Some(p.first_name), Some(p.last_name), p.image_url, p.pronouns),
        None => (None, None, None, None),
    };

    MemberView {
        user_id: record.user_id,
        role: record.role,
        joined_at: record.joined_at,
        first_name,
        last_name,
        image_url,
        pronouns,
    }
}
