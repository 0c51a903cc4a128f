use serde::{Deserialize, Serialize};

/// Sentinel owner for items created before any cloud identity exists.
pub const LOCAL_USER_ID: &str = "local";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningItem {
    pub id: String,
    pub content: String,
    pub translation: String,
    pub item_type: ItemType,
    pub context: Option<String>,
    pub created_at: i64,       // ms since epoch
    pub last_reviewed_at: i64, // ms since epoch, 0 = never reviewed
    pub next_review_at: i64,   // ms since epoch
    pub interval: i64,         // days
    pub ease_factor: f64,      // SM-2 ease factor
    pub user_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Word,
    Sentence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ReviewQuality {
    Blackout = 0,          // Total blackout
    Incorrect = 1,         // Incorrect, recognized on seeing the answer
    IncorrectWithHint = 2, // Incorrect, but remembered with a hint
    Difficult = 3,         // Correct, with serious difficulty
    Hesitant = 4,          // Correct, after hesitation
    Perfect = 5,           // Correct, perfect recall
}

impl ReviewQuality {
    pub fn from_u8(value: u8) -> Result<Self, String> {
        match value {
            0 => Ok(ReviewQuality::Blackout),
            1 => Ok(ReviewQuality::Incorrect),
            2 => Ok(ReviewQuality::IncorrectWithHint),
            3 => Ok(ReviewQuality::Difficult),
            4 => Ok(ReviewQuality::Hesitant),
            5 => Ok(ReviewQuality::Perfect),
            _ => Err(format!("Invalid quality value: {}", value)),
        }
    }

    pub fn grade(&self) -> u8 {
        *self as u8
    }

    /// Grades of 3 and above count as a successful recall.
    pub fn is_passing(&self) -> bool {
        self.grade() >= 3
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewStats {
    pub today_reviews: usize,
    pub pending_reviews: usize,
    pub total_items: usize,
    pub upcoming_reviews: usize,
    pub study_streak: usize,
    pub progress: u8, // percent of items reviewed at least once
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub content: String,
    pub translation: String,
    pub item_type: ItemType,
    pub context: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    pub translation: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub item_type: Option<ItemType>,
    pub user_id: Option<String>,
}
