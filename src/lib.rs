pub mod item_service;
pub mod models;
pub mod spaced_repetition;
pub mod storage;

pub use item_service::ItemService;
pub use models::{CreateItemRequest, ItemType, LearningItem, ReviewQuality, ReviewStats, SearchRequest, UpdateItemRequest};
pub use spaced_repetition::SpacedRepetition;
pub use storage::Storage;
