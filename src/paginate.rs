pub const QUESTIONS_PER_PAGE: usize = 10;

/// Reads the `page` query value. Absent or non-numeric values select page 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(1)
}

/// Returns the 1-based `page` of `items`.
///
/// Pages past the end, and pages below 1, are empty.
pub fn paginate<T>(items: &[T], page: i64) -> &[T] {
    if page < 1 {
        return &[];
    }
    let start = (page as u64 - 1).saturating_mul(QUESTIONS_PER_PAGE as u64);
    if start >= items.len() as u64 {
        return &[];
    }
    let start = start as usize;
    let end = (start + QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}
