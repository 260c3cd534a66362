/// Cut a task title to `limit` characters. The flag reports whether it was
/// cut.
#[must_use]
pub fn fit_title(title: &str, limit: usize) -> (String, bool) {
    let title = title.trim();
    if title.chars().count() <= limit {
        return (title.to_string(), false);
    }
    (title.chars().take(limit).collect(), true)
}
