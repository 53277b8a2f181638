//! Company referenced by computers.

use serde::Deserialize;
use serde::Serialize;

/// A company as exposed by `/api/companies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
}

impl std::fmt::Display for Company {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>6}  {}", self.id, self.name)
    }
}
