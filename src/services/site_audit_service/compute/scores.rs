use crate::error::UpstreamFailure;
use crate::models::{Category, CategoryScore, CategoryScoreSet, PageSpeedResponse};

/// Maps one strategy's report onto the fixed score shape. A report without
/// `lighthouseResult.categories` is rejected whole; individual categories that
/// are missing become "N/A".
pub fn score_set(
    report: &PageSpeedResponse,
    include_pwa: bool,
) -> Result<CategoryScoreSet, UpstreamFailure> {
    let categories = report
        .lighthouse_result
        .as_ref()
        .and_then(|result| result.categories.as_ref())
        .ok_or(UpstreamFailure::InvalidResponse)?;

    let score = |category: &Option<Category>| {
        CategoryScore::from_fraction(category.as_ref().and_then(|c| c.score))
    };

    Ok(CategoryScoreSet {
        performance: score(&categories.performance),
        accessibility: score(&categories.accessibility),
        best_practices: score(&categories.best_practices),
        seo: score(&categories.seo),
        pwa: include_pwa.then(|| score(&categories.pwa)),
    })
}
