//! Project domain model

use serde::{Deserialize, Serialize};

/// Name of the built-in project that always exists
pub const DEFAULT_PROJECT_NAME: &str = "uncategorised";

/// A named bucket that groups tasks
///
/// Tasks reference their project by name, not id, so renames are not
/// supported and deletion reassigns by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier within the project collection
    pub id: u64,

    /// Display name
    pub name: String,
}

impl Project {
    /// The default project every fresh workspace starts with
    pub fn uncategorised() -> Self {
        Self {
            id: 1,
            name: DEFAULT_PROJECT_NAME.to_string(),
        }
    }
}
