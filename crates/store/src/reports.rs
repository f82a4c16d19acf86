//! Reporting aggregates computed on demand from the stored facets.

use feedback_core::{
    average_rating, limits::RECENT_ITEMS, AdminDashboard, Category, CategoryStats, EnumField,
    Feedback, Priority, Result, Status, Suggestion,
};
use futures::future::try_join_all;
use serde::Deserialize;
use tracing::debug;

use crate::document::{Collection, DocumentStore, Filter, FindOptions, SortOrder};
use crate::records::{count_records, find_records};

#[derive(Deserialize)]
struct Rated {
    rating: i64,
}

async fn ratings(
    store: &dyn DocumentStore,
    collection: Collection,
    category: Category,
) -> Result<Vec<i64>> {
    let filter = Filter::new()
        .eq("category", category.as_str())
        .not_null("rating");
    let rated: Vec<Rated> = find_records(store, collection, &filter, &FindOptions::new()).await?;
    Ok(rated.into_iter().map(|r| r.rating).collect())
}

async fn stats_for(store: &dyn DocumentStore, category: Category) -> Result<CategoryStats> {
    let by_category = Filter::new().eq("category", category.as_str());

    let (feedback_count, suggestion_count, mut rated, suggestion_rated) = tokio::try_join!(
        count_records(store, Collection::Feedback, &by_category),
        count_records(store, Collection::Suggestions, &by_category),
        ratings(store, Collection::Feedback, category),
        ratings(store, Collection::Suggestions, category),
    )?;
    rated.extend(suggestion_rated);

    Ok(CategoryStats {
        category,
        feedback_count,
        suggestion_count,
        average_rating: average_rating(&rated),
    })
}

/// One entry per category, in the fixed category order, including
/// categories with nothing in them.
pub async fn category_stats(store: &dyn DocumentStore) -> Result<Vec<CategoryStats>> {
    let stats = try_join_all(Category::ALL.iter().map(|c| stats_for(store, *c))).await?;
    debug!(categories = stats.len(), "Computed category stats");
    Ok(stats)
}

/// Dashboard summary. All reads run concurrently and the first failure
/// fails the whole summary.
pub async fn admin_dashboard(store: &dyn DocumentStore) -> Result<AdminDashboard> {
    let all = Filter::new();
    let pending = Filter::new().eq("status", Status::Pending.as_str());
    let high = Filter::new().eq("priority", Priority::High.as_str());
    let recent = FindOptions::new()
        .sort("created_at", SortOrder::Descending)
        .limit(RECENT_ITEMS);

    let (
        total_feedback,
        total_suggestions,
        pending_feedback,
        pending_suggestions,
        high_feedback,
        high_suggestions,
        recent_feedback,
        recent_suggestions,
    ) = tokio::try_join!(
        count_records(store, Collection::Feedback, &all),
        count_records(store, Collection::Suggestions, &all),
        count_records(store, Collection::Feedback, &pending),
        count_records(store, Collection::Suggestions, &pending),
        count_records(store, Collection::Feedback, &high),
        count_records(store, Collection::Suggestions, &high),
        find_records::<Feedback>(store, Collection::Feedback, &all, &recent),
        find_records::<Suggestion>(store, Collection::Suggestions, &all, &recent),
    )?;

    Ok(AdminDashboard {
        total_feedback,
        total_suggestions,
        pending_feedback,
        pending_suggestions,
        high_priority_items: high_feedback + high_suggestions,
        recent_feedback,
        recent_suggestions,
    })
}
