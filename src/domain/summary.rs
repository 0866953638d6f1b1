use indexmap::IndexMap;
use serde::Serialize;

/// Occurrence counts per category name, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    entries: IndexMap<String, usize>,
}

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, name: &str) {
        *self.entries.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(label, count)| (label.as_str(), *count))
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn values(&self) -> Vec<usize> {
        self.entries.values().copied().collect()
    }

    /// Position of `name` in first-seen order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.get_index_of(name)
    }

    pub fn category_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
impl CategoryCounts {
    pub fn get(&self, name: &str) -> usize {
        self.entries.get(name).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.entries.values().sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub by_status: CategoryCounts,
    pub by_priority: CategoryCounts,
    pub by_tracker: CategoryCounts,
}

/// Header figures of a dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub total_issues: usize,
    pub high_priority: usize,
    pub normal_priority: usize,
    pub unique_assignees: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_counts_keep_first_seen_order() {
        let mut counts = CategoryCounts::new();
        for name in ["New", "Closed", "New", "In Progress", "Closed", "New"] {
            counts.increment(name);
        }

        assert_eq!(counts.labels(), vec!["New", "Closed", "In Progress"]);
        assert_eq!(counts.values(), vec![3, 2, 1]);
        assert_eq!(counts.get("Closed"), 2);
        assert_eq!(counts.get("Rejected"), 0);
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.category_count(), 3);
        assert_eq!(counts.position("In Progress"), Some(2));
        assert_eq!(counts.position("Rejected"), None);
    }
}
