use chrono::{Days, NaiveDate, Utc};
use shared_types::{AppError, TodoDraft};

use crate::repo::TodoRepository;

fn days_from(today: NaiveDate, days: u64) -> Option<NaiveDate> {
    today.checked_add_days(Days::new(days))
}

/// Demo items relative to `today`.
fn demo_drafts(today: NaiveDate) -> Vec<TodoDraft> {
    let mut review = TodoDraft::new(
        "Review PRs",
        Some("Review pending pull requests and provide feedback".to_string()),
        days_from(today, 1),
    );
    review.completed = true;

    vec![
        TodoDraft::new(
            "Write docs",
            Some("Draft initial API documentation and README".to_string()),
            days_from(today, 3),
        ),
        review,
        TodoDraft::new(
            "Plan next sprint",
            Some("Prepare backlog and priorities for next sprint".to_string()),
            days_from(today, 7),
        ),
    ]
}

/// Insert the demo items when the store is empty. Returns how many were
/// inserted.
pub async fn seed_if_empty(repo: &dyn TodoRepository) -> Result<usize, AppError> {
    let existing = repo.count().await?;
    if existing > 0 {
        tracing::info!(existing, "store not empty, skipping demo data");
        return Ok(0);
    }

    let drafts = demo_drafts(Utc::now().date_naive());
    let inserted = drafts.len();
    for draft in drafts {
        repo.insert(draft).await?;
    }
    tracing::info!(inserted, "seeded demo data");
    Ok(inserted)
}
