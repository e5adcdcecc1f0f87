use crate::modules::gateway::domain::UserProfile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserResponse {
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: u64,
    pub username: String,
}

impl From<UserDto> for UserProfile {
    fn from(dto: UserDto) -> Self {
        UserProfile {
            id: dto.id,
            username: dto.username,
        }
    }
}
