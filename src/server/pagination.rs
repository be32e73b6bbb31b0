use serde::Deserialize;

use super::deserializers::deserialize_lenient_i64;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// `?page=N`. Missing or unparsable values mean the first page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    page: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }
}

/// Slice `[(page - 1) * 10, page * 10)` out of `items`. Pages below 1 and pages
/// past the end are empty.
pub fn paginate<T>(items: Vec<T>, page: i64) -> Vec<T> {
    let Ok(index) = usize::try_from(page.saturating_sub(1)) else {
        return Vec::new();
    };
    items
        .into_iter()
        .skip(index.saturating_mul(QUESTIONS_PER_PAGE))
        .take(QUESTIONS_PER_PAGE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_ten_wide() {
        let items: Vec<_> = (1..=25).collect();
        assert_eq!(paginate(items.clone(), 1), (1..=10).collect::<Vec<_>>());
        assert_eq!(paginate(items.clone(), 2), (11..=20).collect::<Vec<_>>());
        assert_eq!(paginate(items, 3), (21..=25).collect::<Vec<_>>());
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<_> = (1..=25).collect();
        assert!(paginate(items.clone(), 4).is_empty());
        assert!(paginate(items.clone(), 0).is_empty());
        assert!(paginate(items.clone(), -3).is_empty());
        assert!(paginate(items.clone(), i64::MIN).is_empty());
        assert!(paginate(items, i64::MAX).is_empty());
        assert!(paginate(Vec::<i32>::new(), 1).is_empty());
    }

    #[test]
    fn page_defaults_to_first() {
        assert_eq!(PageQuery::default().page(), 1);
        assert_eq!(PageQuery { page: Some(3) }.page(), 3);
    }
}
