//! Task filters
//!
//! A filter key names a derived view over the task collection. The
//! built-in keys cover date buckets and priorities; every other token is
//! treated as a project name, so project views need no dedicated syntax.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use super::task::{Priority, Task};

/// A named view over the task collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKey {
    /// Every task
    All,
    /// Tasks due exactly today
    Today,
    /// Tasks due strictly after today
    Upcoming,
    /// Incomplete tasks due strictly before today
    Overdue,
    /// Tasks in a priority bucket
    Priority(Priority),
    /// Tasks belonging to the named project
    Project(String),
}

impl FilterKey {
    /// Interprets a filter token
    ///
    /// The exact tokens `all`, `today`, `upcoming` and `overdue` select
    /// the date views, and `High`, `Medium` and `Low` select priorities.
    /// Any other string names a project, so parsing never fails.
    pub fn parse(token: &str) -> Self {
        match token {
            "all" => FilterKey::All,
            "today" => FilterKey::Today,
            "upcoming" => FilterKey::Upcoming,
            "overdue" => FilterKey::Overdue,
            "High" => FilterKey::Priority(Priority::High),
            "Medium" => FilterKey::Priority(Priority::Medium),
            "Low" => FilterKey::Priority(Priority::Low),
            other => FilterKey::Project(other.to_string()),
        }
    }

    /// Returns true if the task belongs to this view on the given day
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            FilterKey::All => true,
            FilterKey::Today => task.due == today,
            FilterKey::Upcoming => task.due > today,
            FilterKey::Overdue => task.due < today && !task.complete,
            FilterKey::Priority(priority) => task.priority == *priority,
            FilterKey::Project(name) => task.project == *name,
        }
    }

    /// The fixed filters offered by the interface, in display order
    pub fn builtins() -> [FilterKey; 7] {
        [
            FilterKey::All,
            FilterKey::Today,
            FilterKey::Upcoming,
            FilterKey::Overdue,
            FilterKey::Priority(Priority::High),
            FilterKey::Priority(Priority::Medium),
            FilterKey::Priority(Priority::Low),
        ]
    }
}

impl FromStr for FilterKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKey::All => f.write_str("all"),
            FilterKey::Today => f.write_str("today"),
            FilterKey::Upcoming => f.write_str("upcoming"),
            FilterKey::Overdue => f.write_str("overdue"),
            FilterKey::Priority(priority) => write!(f, "{}", priority),
            FilterKey::Project(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(due: &str, priority: Priority, project: &str, complete: bool) -> Task {
        Task {
            id: 1,
            title: "A task".to_string(),
            description: "No description".to_string(),
            due: due.parse().unwrap(),
            priority,
            project: project.to_string(),
            complete,
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn parses_builtin_tokens() {
        assert_eq!(FilterKey::parse("all"), FilterKey::All);
        assert_eq!(FilterKey::parse("today"), FilterKey::Today);
        assert_eq!(FilterKey::parse("upcoming"), FilterKey::Upcoming);
        assert_eq!(FilterKey::parse("overdue"), FilterKey::Overdue);
    }

    #[test]
    fn parses_priority_tokens() {
        assert_eq!(
            FilterKey::parse("High"),
            FilterKey::Priority(Priority::High)
        );
        assert_eq!(
            FilterKey::parse("Medium"),
            FilterKey::Priority(Priority::Medium)
        );
        assert_eq!(FilterKey::parse("Low"), FilterKey::Priority(Priority::Low));
    }

    #[test]
    fn other_tokens_name_projects() {
        assert_eq!(
            FilterKey::parse("Work"),
            FilterKey::Project("Work".to_string())
        );
        // Tokens only count as built-ins with their exact casing
        assert_eq!(
            FilterKey::parse("All"),
            FilterKey::Project("All".to_string())
        );
        assert_eq!(
            FilterKey::parse("high"),
            FilterKey::Project("high".to_string())
        );
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for key in FilterKey::builtins() {
            assert_eq!(FilterKey::parse(&key.to_string()), key);
        }
        let project = FilterKey::Project("Work".to_string());
        assert_eq!(FilterKey::parse(&project.to_string()), project);
    }

    #[test]
    fn all_matches_everything() {
        let today = day("2024-06-15");
        let done = task("2024-01-01", Priority::Low, "Work", true);
        let open = task("2099-01-01", Priority::High, "Home", false);

        assert!(FilterKey::All.matches(&done, today));
        assert!(FilterKey::All.matches(&open, today));
    }

    #[test]
    fn today_matches_exact_date_only() {
        let today = day("2024-06-15");

        assert!(FilterKey::Today.matches(&task("2024-06-15", Priority::Low, "Work", false), today));
        assert!(!FilterKey::Today.matches(&task("2024-06-14", Priority::Low, "Work", false), today));
        assert!(!FilterKey::Today.matches(&task("2024-06-16", Priority::Low, "Work", false), today));
    }

    #[test]
    fn upcoming_is_strictly_after_today() {
        let today = day("2024-06-15");

        assert!(
            FilterKey::Upcoming.matches(&task("2024-06-16", Priority::Low, "Work", false), today)
        );
        assert!(
            !FilterKey::Upcoming.matches(&task("2024-06-15", Priority::Low, "Work", false), today)
        );
    }

    #[test]
    fn overdue_excludes_completed_tasks() {
        let today = day("2024-06-15");

        assert!(
            FilterKey::Overdue.matches(&task("2024-06-01", Priority::Low, "Work", false), today)
        );
        assert!(
            !FilterKey::Overdue.matches(&task("2024-06-01", Priority::Low, "Work", true), today)
        );
        assert!(
            !FilterKey::Overdue.matches(&task("2024-06-15", Priority::Low, "Work", false), today)
        );
    }

    #[test]
    fn priority_matches_bucket() {
        let today = day("2024-06-15");
        let high = task("2099-01-01", Priority::High, "Work", false);

        assert!(FilterKey::Priority(Priority::High).matches(&high, today));
        assert!(!FilterKey::Priority(Priority::Low).matches(&high, today));
    }

    #[test]
    fn project_matches_name_exactly() {
        let today = day("2024-06-15");
        let work = task("2099-01-01", Priority::Low, "Work", false);

        assert!(FilterKey::Project("Work".to_string()).matches(&work, today));
        assert!(!FilterKey::Project("work".to_string()).matches(&work, today));
        assert!(!FilterKey::Project("Home".to_string()).matches(&work, today));
    }
}
