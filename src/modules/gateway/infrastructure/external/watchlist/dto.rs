use crate::modules::gateway::domain::WatchlistEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetWatchlistResponse {
    #[serde(default)]
    pub watchlists: Vec<WatchlistEntryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistEntryDto {
    pub media_id: u64,
    pub user_id: u64,
}

impl From<WatchlistEntryDto> for WatchlistEntry {
    fn from(dto: WatchlistEntryDto) -> Self {
        WatchlistEntry {
            media_id: dto.media_id,
            user_id: dto.user_id,
        }
    }
}
