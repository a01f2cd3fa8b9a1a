//! Related-post ranking

use crate::content::PostSummary;

/// Similarity of `candidate` to `reference`: +3 same category, +2 per
/// shared tag, +1 same author
pub fn relatedness_score(candidate: &PostSummary, reference: &PostSummary) -> usize {
    let mut score = 0;

    if candidate.category == reference.category {
        score += 3;
    }

    let shared_tags = candidate
        .tags
        .iter()
        .filter(|tag| reference.tags.contains(tag))
        .count();
    score += shared_tags * 2;

    if candidate.author == reference.author {
        score += 1;
    }

    score
}

/// Up to `limit` posts most similar to `reference`, excluding it.
///
/// Equal scores keep their collection order.
pub fn related(posts: &[PostSummary], reference: &PostSummary, limit: usize) -> Vec<PostSummary> {
    let mut scored: Vec<(usize, &PostSummary)> = posts
        .iter()
        .filter(|p| p.slug != reference.slug)
        .map(|p| (relatedness_score(p, reference), p))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, p)| p.clone())
        .collect()
}
