use std::collections::HashMap;

use crate::domain::issue::{is_high_priority_name, Issue, DEFAULT_PRIORITY, UNASSIGNED};
use crate::domain::summary::{CategoryCounts, Overview, Summary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeGroup {
    pub assignee: String,
    pub issues: Vec<Issue>,
}

impl AssigneeGroup {
    pub fn is_unassigned(&self) -> bool {
        self.assignee == UNASSIGNED
    }
}

/// Partitions issues by assignee name. Groups and the issues inside them keep
/// the order in which they were first seen.
pub fn group_by_assignee(issues: Vec<Issue>) -> Vec<AssigneeGroup> {
    let mut groups: Vec<AssigneeGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for issue in issues {
        let assignee = issue.assignee_name().to_string();
        match index.get(&assignee) {
            Some(position) => groups[*position].issues.push(issue),
            None => {
                index.insert(assignee.clone(), groups.len());
                groups.push(AssigneeGroup {
                    assignee,
                    issues: vec![issue],
                });
            }
        }
    }

    groups
}

pub fn summarize(issues: &[Issue]) -> Summary {
    let mut by_status = CategoryCounts::new();
    let mut by_priority = CategoryCounts::new();
    let mut by_tracker = CategoryCounts::new();

    for issue in issues {
        by_status.increment(issue.status_name());
        by_priority.increment(issue.priority_name());
        by_tracker.increment(issue.tracker_name());
    }

    Summary {
        total: issues.len(),
        by_status,
        by_priority,
        by_tracker,
    }
}

/// Header figures for a whole project. `Unassigned` is not counted as an
/// assignee.
pub fn overview(summary: &Summary, groups: &[AssigneeGroup]) -> Overview {
    let priorities = summary.by_priority.iter();
    let (high_priority, normal_priority) =
        priorities.fold((0, 0), |(high, normal), (label, count)| {
            if is_high_priority_name(label) {
                (high + count, normal)
            } else if label.eq_ignore_ascii_case(DEFAULT_PRIORITY) {
                (high, normal + count)
            } else {
                (high, normal)
            }
        });

    Overview {
        total_issues: summary.total,
        high_priority,
        normal_priority,
        unique_assignees: groups.iter().filter(|group| !group.is_unassigned()).count(),
    }
}
