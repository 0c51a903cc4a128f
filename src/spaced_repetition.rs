use crate::models::{CreateItemRequest, LearningItem, ReviewQuality, ReviewStats, LOCAL_USER_ID};
use chrono::{DateTime, Local, NaiveDate};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

pub const INITIAL_INTERVAL_DAYS: i64 = 1;
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const DAY_MS: i64 = 86_400_000;

/// SM-2 spaced repetition algorithm implementation
///
/// Every function is a pure computation over the values passed in; the
/// reference time is always an explicit `now_ms` argument, never the
/// system clock.
pub struct SpacedRepetition;

impl SpacedRepetition {
    /// Build a fresh item scheduled for its first review 24 hours out.
    pub fn create_item(request: CreateItemRequest, now_ms: i64) -> Result<LearningItem, String> {
        if request.content.trim().is_empty() {
            return Err("Item content must not be empty".to_string());
        }

        Ok(LearningItem {
            id: Uuid::new_v4().to_string(),
            content: request.content,
            translation: request.translation,
            item_type: request.item_type,
            context: request.context,
            created_at: now_ms,
            last_reviewed_at: 0,
            next_review_at: now_ms + INITIAL_INTERVAL_DAYS * DAY_MS,
            interval: INITIAL_INTERVAL_DAYS,
            ease_factor: DEFAULT_EASE_FACTOR,
            user_id: request.user_id.unwrap_or_else(|| LOCAL_USER_ID.to_string()),
        })
    }

    /// Calculate the next schedule after a review.
    ///
    /// The ease factor is adjusted on every review, pass or fail, and is
    /// applied to the interval only on the passing branch. The interval
    /// product is rounded to the nearest whole day, half away from zero.
    pub fn update_after_review(item: &LearningItem, quality: &ReviewQuality, now_ms: i64) -> LearningItem {
        // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored at 1.3
        let q = quality.grade() as f64;
        let mut new_ease_factor = item.ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));
        if new_ease_factor < MIN_EASE_FACTOR {
            new_ease_factor = MIN_EASE_FACTOR;
        }

        let new_interval = if quality.is_passing() {
            match item.interval {
                0 => 1, // only reachable if a reset path ever zeroes the interval
                1 => 6,
                _ => ((item.interval as f64) * new_ease_factor).round() as i64,
            }
        } else {
            // Failed recall restarts the schedule from the first step
            1
        };

        LearningItem {
            id: item.id.clone(),
            content: item.content.clone(),
            translation: item.translation.clone(),
            item_type: item.item_type,
            context: item.context.clone(),
            created_at: item.created_at,
            last_reviewed_at: now_ms,
            next_review_at: now_ms + new_interval * DAY_MS,
            interval: new_interval,
            ease_factor: new_ease_factor,
            user_id: item.user_id.clone(),
        }
    }

    /// Check if an item is due for review
    pub fn is_due(item: &LearningItem, now_ms: i64) -> bool {
        item.next_review_at <= now_ms
    }

    /// Get items that are due for review
    pub fn due_items(items: &HashMap<String, LearningItem>, now_ms: i64) -> Vec<LearningItem> {
        items.values().filter(|item| Self::is_due(item, now_ms)).cloned().collect()
    }

    /// Get items that are due for review from a slice
    pub fn due_items_from_vec(items: &[LearningItem], now_ms: i64) -> Vec<LearningItem> {
        items.iter().filter(|item| Self::is_due(item, now_ms)).cloned().collect()
    }

    /// Calculate review statistics.
    ///
    /// Day-based counts (today, tomorrow, streak) use the machine's local
    /// calendar day boundary.
    pub fn review_statistics(items: &HashMap<String, LearningItem>, now_ms: i64) -> ReviewStats {
        let total_items = items.len();
        let today = local_day(now_ms);
        let tomorrow = today.succ_opt();

        let today_reviews = items
            .values()
            .filter(|item| item.last_reviewed_at > 0 && local_day(item.last_reviewed_at) == today)
            .count();
        let pending_reviews = items.values().filter(|item| Self::is_due(item, now_ms)).count();
        let upcoming_reviews = items
            .values()
            .filter(|item| tomorrow.map_or(false, |day| local_day(item.next_review_at) == day))
            .count();

        let reviewed = items.values().filter(|item| item.last_reviewed_at > 0).count();
        let progress = if total_items == 0 {
            0
        } else {
            ((reviewed as f64 / total_items as f64) * 100.0).round() as u8
        };

        ReviewStats {
            today_reviews,
            pending_reviews,
            total_items,
            upcoming_reviews,
            study_streak: Self::study_streak(items, today),
            progress,
        }
    }

    // Consecutive review days ending today; a day without reviews resets
    // the streak to zero rather than freezing it.
    fn study_streak(items: &HashMap<String, LearningItem>, today: NaiveDate) -> usize {
        let review_days: BTreeSet<NaiveDate> = items
            .values()
            .filter(|item| item.last_reviewed_at > 0)
            .map(|item| local_day(item.last_reviewed_at))
            .collect();

        let mut streak = 0;
        let mut expected = today;
        for day in review_days.iter().rev() {
            if *day != expected {
                break;
            }
            streak += 1;
            match expected.pred_opt() {
                Some(previous) => expected = previous,
                None => break,
            }
        }
        streak
    }
}

fn local_day(ts_ms: i64) -> NaiveDate {
    DateTime::from_timestamp_millis(ts_ms)
        .map(|dt| dt.with_timezone(&Local).date_naive())
        .unwrap_or_default()
}
