//! Fixed-size, 1-based pagination over an in-memory result set.

/// Items per page for every paginated endpoint.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// A requested page number. Missing or non-numeric input is page 1; a numeric value below 1
/// is kept as-is and selects nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page(i64);

impl Page {
    pub fn new(number: i64) -> Self {
        Self(number)
    }

    /// Parse the raw `page` query value.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<i64>().ok())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn number(&self) -> i64 {
        self.0
    }

    /// Index of the first item on this page; `None` for pages below 1.
    pub fn begin(&self) -> Option<usize> {
        let zero_based = usize::try_from(self.0.checked_sub(1)?).ok()?;
        Some(zero_based.saturating_mul(QUESTIONS_PER_PAGE))
    }

    /// Items `[begin, min(begin + 10, len))`, or nothing when `begin >= len` or the page is below 1.
    pub fn take<T>(&self, mut items: Vec<T>) -> Vec<T> {
        let begin = match self.begin() {
            Some(begin) if begin < items.len() => begin,
            _ => return Vec::new(),
        };
        items.truncate(begin.saturating_add(QUESTIONS_PER_PAGE));
        items.split_off(begin)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}
