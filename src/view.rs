//! Derived-view computation for idea listings
//!
//! Pure functions over a snapshot of the idea collection; the view layer
//! recomputes whenever any input changes. The inputs themselves (search
//! term, sort key, category filter) are transient view state and are never
//! persisted.

use crate::ideas::{Category, Idea};

/// Available orderings for the idea listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recently posted first
    #[default]
    Recent,

    /// Highest like count first
    Liked,

    /// Highest engagement score first, see [`engagement_score`]
    Viewed,
}

/// Category selection for the idea listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Keep every idea
    #[default]
    All,

    /// Keep only ideas in one category
    Only(Category),
}

/// Placeholder ranking for the "most viewed" sort.
///
/// No view counter exists anywhere in the data model, so this blends like
/// count with recency instead. It is an approximation, not a real metric.
fn engagement_score(idea: &Idea) -> f64 {
    let likes = idea.like_count() as f64;
    let recency = idea.created_at.timestamp() as f64 / 1_000_000.0;
    0.7 * likes + 0.3 * recency
}

/// Compute the sequence of ideas to display.
///
/// Stages run in order: category filter, search filter, sort. The input
/// collection is never mutated; ties keep the incoming (server) order.
pub fn derive_view(
    ideas: &[Idea],
    search_term: &str,
    sort_key: SortKey,
    filter: &CategoryFilter,
) -> Vec<Idea> {
    let term = search_term.trim().to_lowercase();

    let mut selected: Vec<Idea> = ideas
        .iter()
        .filter(|idea| match filter {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => idea.category == *category,
        })
        .filter(|idea| term.is_empty() || matches_search(idea, &term))
        .cloned()
        .collect();

    match sort_key {
        SortKey::Recent => selected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Liked => selected.sort_by(|a, b| b.like_count().cmp(&a.like_count())),
        SortKey::Viewed => {
            selected.sort_by(|a, b| engagement_score(b).total_cmp(&engagement_score(a)))
        }
    }

    selected
}

/// Case-insensitive substring match over heading, details, and each
/// technology entry. `term` must already be trimmed and lowercased.
fn matches_search(idea: &Idea, term: &str) -> bool {
    idea.heading.to_lowercase().contains(term)
        || idea.details.to_lowercase().contains(term)
        || idea
            .technologies
            .iter()
            .any(|tech| tech.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn idea(id: &str, category: Category, likes: usize, created_at: &str) -> Idea {
        Idea {
            id: id.to_string(),
            heading: format!("Idea {}", id),
            details: "Some details for the idea.".to_string(),
            category,
            technologies: vec![],
            likes: (0..likes).map(|n| format!("user-{}", n)).collect(),
            posted_by: None,
            created_at: created_at.parse().unwrap(),
        }
    }

    #[test]
    fn liked_sort_orders_by_descending_like_count() {
        let ideas = vec![
            idea("a", Category::Technology, 3, "2024-01-01T00:00:00Z"),
            idea("b", Category::Technology, 1, "2024-01-02T00:00:00Z"),
            idea("c", Category::Technology, 5, "2024-01-03T00:00:00Z"),
        ];

        let view = derive_view(&ideas, "", SortKey::Liked, &CategoryFilter::All);
        let counts: Vec<usize> = view.iter().map(Idea::like_count).collect();
        assert_eq!(counts, vec![5, 3, 1]);
    }

    #[test]
    fn recent_sort_orders_by_descending_created_at() {
        let ideas = vec![
            idea("a", Category::Business, 0, "2024-01-01T00:00:00Z"),
            idea("b", Category::Business, 0, "2024-06-01T00:00:00Z"),
            idea("c", Category::Business, 0, "2023-12-01T00:00:00Z"),
        ];

        let view = derive_view(&ideas, "", SortKey::Recent, &CategoryFilter::All);
        let ids: Vec<&str> = view.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn search_matches_technologies_case_insensitively() {
        let mut target = idea("a", Category::Technology, 0, "2024-01-01T00:00:00Z");
        target.technologies = vec!["React".to_string(), "Node".to_string()];
        let other = idea("b", Category::Technology, 0, "2024-01-01T00:00:00Z");

        let view = derive_view(
            &[target, other],
            "react",
            SortKey::Recent,
            &CategoryFilter::All,
        );
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "a");
    }

    #[test]
    fn whitespace_only_search_keeps_everything() {
        let ideas = vec![
            idea("a", Category::Health, 0, "2024-01-01T00:00:00Z"),
            idea("b", Category::Health, 0, "2024-01-02T00:00:00Z"),
        ];

        let view = derive_view(&ideas, "   ", SortKey::Recent, &CategoryFilter::All);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn category_filter_is_exact() {
        let ideas = vec![
            idea("a", Category::SocialImpact, 0, "2024-01-01T00:00:00Z"),
            idea("b", Category::Education, 0, "2024-01-02T00:00:00Z"),
        ];

        let view = derive_view(
            &ideas,
            "",
            SortKey::Recent,
            &CategoryFilter::Only(Category::SocialImpact),
        );
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "a");
    }

    #[test]
    fn viewed_sort_prefers_likes_when_dates_are_equal() {
        let ideas = vec![
            idea("a", Category::Technology, 1, "2024-01-01T00:00:00Z"),
            idea("b", Category::Technology, 8, "2024-01-01T00:00:00Z"),
        ];

        let view = derive_view(&ideas, "", SortKey::Viewed, &CategoryFilter::All);
        let ids: Vec<&str> = view.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn viewed_sort_lets_recency_outweigh_a_handful_of_likes() {
        // A year of recency is worth ~9.5 points; five likes only 3.5.
        let ideas = vec![
            idea("old", Category::Technology, 5, "2023-01-01T00:00:00Z"),
            idea("new", Category::Technology, 0, "2024-01-01T00:00:00Z"),
        ];

        let view = derive_view(&ideas, "", SortKey::Viewed, &CategoryFilter::All);
        assert_eq!(view[0].id, "new");
    }

    #[test]
    fn ties_keep_server_order() {
        let ideas = vec![
            idea("first", Category::Technology, 2, "2024-01-01T00:00:00Z"),
            idea("second", Category::Technology, 2, "2024-01-01T00:00:00Z"),
        ];

        let view = derive_view(&ideas, "", SortKey::Liked, &CategoryFilter::All);
        let ids: Vec<&str> = view.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn input_collection_is_untouched() {
        let ideas = vec![
            idea("a", Category::Technology, 0, "2024-01-01T00:00:00Z"),
            idea("b", Category::Technology, 3, "2024-02-01T00:00:00Z"),
        ];

        let _ = derive_view(&ideas, "", SortKey::Liked, &CategoryFilter::All);
        let ids: Vec<&str> = ideas.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn stages_compose_filter_then_search_then_sort() {
        let mut a = idea("a", Category::Technology, 4, "2024-01-01T00:00:00Z");
        a.technologies = vec!["Rust".to_string()];
        let mut b = idea("b", Category::Technology, 9, "2024-01-02T00:00:00Z");
        b.technologies = vec!["Rust".to_string()];
        let mut c = idea("c", Category::Business, 20, "2024-01-03T00:00:00Z");
        c.technologies = vec!["Rust".to_string()];
        let d = idea("d", Category::Technology, 50, "2024-01-04T00:00:00Z");

        let view = derive_view(
            &[a, b, c, d],
            "rust",
            SortKey::Liked,
            &CategoryFilter::Only(Category::Technology),
        );
        let ids: Vec<&str> = view.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
