//! Stable diagnostic codes, grouped by category.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The broad category a diagnostic code belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// A design-modeling error (spec §7 "Design error").
    Design,
    /// A placement precondition violation or sanity-check failure.
    Place,
    /// A routing congestion or convergence issue.
    Route,
    /// A generator write-consistency or gadget issue.
    Generate,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Category::Design => 'D',
            Category::Place => 'P',
            Category::Route => 'R',
            Category::Generate => 'G',
        };
        write!(f, "{letter}")
    }
}

/// A stable, human-citable diagnostic code such as `R20`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category this code belongs to.
    pub category: Category,
    /// The numeric code within the category.
    pub number: u32,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub fn new(category: Category, number: u32) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.category, self.number)
    }
}
