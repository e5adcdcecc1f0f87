use crate::modules::gateway::domain::ReviewRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetByUserResponse {
    #[serde(default)]
    pub reviews: Vec<ReviewDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDto {
    pub id: u64,
    pub user_id: u64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub rating: i32,
    pub media_id: u64,
}

impl From<ReviewDto> for ReviewRecord {
    fn from(dto: ReviewDto) -> Self {
        ReviewRecord {
            id: dto.id,
            user_id: dto.user_id,
            content: dto.content,
            rating: dto.rating,
            media_id: dto.media_id,
        }
    }
}
