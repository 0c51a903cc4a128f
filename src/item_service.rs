use crate::models::{CreateItemRequest, LearningItem, ReviewQuality, ReviewStats, SearchRequest, UpdateItemRequest};
use crate::spaced_repetition::SpacedRepetition;
use crate::storage::Storage;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

/// Owns the in-memory item collection and serializes every
/// read-modify-persist cycle under one lock. Scheduling itself is
/// delegated to [`SpacedRepetition`]; this layer supplies the clock and
/// the persistence.
pub struct ItemService {
    items: Mutex<HashMap<String, LearningItem>>,
    storage: Storage,
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

impl ItemService {
    pub fn new(storage: Storage) -> Result<Self, Box<dyn std::error::Error>> {
        let items = storage.load_items()?;
        log::info!("Loaded {} learning items", items.len());
        Ok(ItemService {
            items: Mutex::new(items),
            storage,
        })
    }

    pub fn create_item(&self, request: CreateItemRequest) -> Result<LearningItem, String> {
        let mut items = self.items.lock().map_err(|_| "Failed to lock items")?;

        let item = SpacedRepetition::create_item(request, now_ms())?;
        log::debug!("Created item {}", item.id);

        items.insert(item.id.clone(), item.clone());
        self.save_items(&items)?;
        Ok(item)
    }

    pub fn get_items(&self) -> Result<Vec<LearningItem>, String> {
        let items = self.items.lock().map_err(|_| "Failed to lock items")?;
        Ok(items.values().cloned().collect())
    }

    pub fn get_item(&self, id: String) -> Result<Option<LearningItem>, String> {
        let items = self.items.lock().map_err(|_| "Failed to lock items")?;
        Ok(items.get(&id).cloned())
    }

    /// Update the translation once it arrives from the translation layer.
    /// Content, context and the schedule are not editable here.
    pub fn update_item(&self, id: String, request: UpdateItemRequest) -> Result<LearningItem, String> {
        let mut items = self.items.lock().map_err(|_| "Failed to lock items")?;

        if let Some(item) = items.get_mut(&id) {
            item.translation = request.translation;

            let updated_item = item.clone();
            self.save_items(&items)?;
            Ok(updated_item)
        } else {
            Err("Item not found".to_string())
        }
    }

    pub fn delete_item(&self, id: String) -> Result<(), String> {
        let mut items = self.items.lock().map_err(|_| "Failed to lock items")?;

        if items.remove(&id).is_some() {
            log::debug!("Deleted item {}", id);
            self.save_items(&items)?;
            Ok(())
        } else {
            Err("Item not found".to_string())
        }
    }

    pub fn delete_multiple_items(&self, item_ids: Vec<String>) -> Result<(), String> {
        let mut items = self.items.lock().map_err(|_| "Failed to lock items")?;
        let mut deleted_count = 0;

        for item_id in item_ids {
            if items.remove(&item_id).is_some() {
                deleted_count += 1;
            }
        }

        if deleted_count > 0 {
            self.save_items(&items)?;
        }

        Ok(())
    }

    pub fn get_due_items(&self) -> Result<Vec<LearningItem>, String> {
        let items = self.items.lock().map_err(|_| "Failed to lock items")?;
        Ok(SpacedRepetition::due_items(&items, now_ms()))
    }

    pub fn review_item(&self, id: String, quality: u8) -> Result<LearningItem, String> {
        let quality = ReviewQuality::from_u8(quality)?;
        let mut items = self.items.lock().map_err(|_| "Failed to lock items")?;

        if let Some(item) = items.get(&id) {
            let updated_item = SpacedRepetition::update_after_review(item, &quality, now_ms());
            log::debug!(
                "Reviewed item {} (grade {}): next review in {} days",
                updated_item.id,
                quality.grade(),
                updated_item.interval
            );

            items.insert(id, updated_item.clone());
            self.save_items(&items)?;
            Ok(updated_item)
        } else {
            Err("Item not found".to_string())
        }
    }

    pub fn get_review_stats(&self) -> Result<ReviewStats, String> {
        let items = self.items.lock().map_err(|_| "Failed to lock items")?;
        Ok(SpacedRepetition::review_statistics(&items, now_ms()))
    }

    pub fn search_items(&self, request: SearchRequest) -> Result<Vec<LearningItem>, String> {
        let items = self.items.lock().map_err(|_| "Failed to lock items")?;
        let mut filtered_items: Vec<LearningItem> = items.values().cloned().collect();

        // Filter by query (searches content and translation)
        if let Some(query) = &request.query {
            let query_lower = query.to_lowercase();
            filtered_items.retain(|item| {
                item.content.to_lowercase().contains(&query_lower) || item.translation.to_lowercase().contains(&query_lower)
            });
        }

        if let Some(item_type) = request.item_type {
            filtered_items.retain(|item| item.item_type == item_type);
        }

        if let Some(user_id) = &request.user_id {
            filtered_items.retain(|item| &item.user_id == user_id);
        }

        Ok(filtered_items)
    }

    // Helper method to save items
    fn save_items(&self, items: &HashMap<String, LearningItem>) -> Result<(), String> {
        self.storage.save_items(items).map_err(|e| format!("Failed to save items: {}", e))
    }
}
