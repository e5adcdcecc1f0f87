use crate::modules::gateway::domain::MediaRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaDto {
    pub id: u64,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub year: i32,
}

impl From<MediaDto> for MediaRecord {
    fn from(dto: MediaDto) -> Self {
        MediaRecord {
            id: dto.id,
            name_en: dto.name_en,
            description: dto.description,
            year: dto.year,
        }
    }
}
