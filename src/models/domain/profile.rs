use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile row keyed by the auth service's user id.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronouns: Option<String>,
}

impl Profile {
    pub fn new(id: Uuid, first_name: &str, last_name: &str) -> Self {
        Profile {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            image_url: None,
            pronouns: None,
        }
    }
}
