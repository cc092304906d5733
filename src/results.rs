//! # Result Aggregation
//!
//! Per-case outcomes and the caller-owned aggregation tree.
//!
//! An [`Aggregate`] node carries its own counts, a per-function table and a
//! table of nested test nodes:
//!
//! ```text
//! root
//! └── tests
//!     └── <test name>: count, success, failures, errors
//!         ├── functions
//!         │   └── <function name>: count, success, failures, errors
//!         └── tests
//! ```
//!
//! Nodes are only ever created and incremented by the runners, never reset,
//! so `count == success + failures + errors` holds on every node.

use std::fmt;
use std::ops::AddAssign;

use im::OrdMap;
use serde::{Deserialize, Serialize};

/// Classification of a single case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Pass,
    Fail,
    Error,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Pass => "[PASS]",
            Outcome::Fail => "[FAIL]",
            Outcome::Error => "[ERROR]",
        }
    }

    /// A diagnostic line for this outcome is printed when the verbosity is
    /// strictly greater than this threshold.
    pub fn verbosity_threshold(self) -> u8 {
        match self {
            Outcome::Error => 0,
            Outcome::Fail => 1,
            Outcome::Pass => 2,
        }
    }

    pub fn counts(self) -> Counts {
        Counts {
            count: 1,
            success: usize::from(self == Outcome::Pass),
            failures: usize::from(self == Outcome::Fail),
            errors: usize::from(self == Outcome::Error),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub count: usize,
    pub success: usize,
    pub failures: usize,
    pub errors: usize,
}

impl Counts {
    pub fn is_consistent(&self) -> bool {
        self.count == self.success + self.failures + self.errors
    }

    pub fn all_passed(&self) -> bool {
        self.count == self.success
    }
}

impl AddAssign for Counts {
    fn add_assign(&mut self, other: Counts) {
        self.count += other.count;
        self.success += other.success;
        self.failures += other.failures;
        self.errors += other.errors;
    }
}

/// One node of the aggregation tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    #[serde(flatten)]
    pub counts: Counts,
    #[serde(default)]
    pub functions: OrdMap<String, Counts>,
    #[serde(default)]
    pub tests: OrdMap<String, Aggregate>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `counts` to this node and to its entry for `function`, creating
    /// the entry with zero counts first if needed.
    pub fn record(&mut self, function: &str, counts: Counts) {
        self.counts += counts;
        *self
            .functions
            .entry(function.to_string())
            .or_insert_with(Counts::default) += counts;
    }

    /// The nested node for `test_name`, created empty if absent.
    pub fn test_node(&mut self, test_name: &str) -> &mut Aggregate {
        self.tests
            .entry(test_name.to_string())
            .or_insert_with(Aggregate::default)
    }

    pub fn test(&self, test_name: &str) -> Option<&Aggregate> {
        self.tests.get(test_name)
    }

    pub fn function(&self, function: &str) -> Option<&Counts> {
        self.functions.get(function)
    }

    /// True if this node and every node below it satisfies
    /// `count == success + failures + errors`.
    pub fn is_consistent(&self) -> bool {
        self.counts.is_consistent()
            && self.functions.values().all(Counts::is_consistent)
            && self.tests.values().all(Aggregate::is_consistent)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_counts_are_one_hot() {
        assert_eq!(
            Outcome::Fail.counts(),
            Counts {
                count: 1,
                success: 0,
                failures: 1,
                errors: 0
            }
        );
        assert!(Outcome::Error.counts().is_consistent());
    }

    #[test]
    fn record_creates_and_increments_function_entries() {
        let mut node = Aggregate::new();
        node.record("add", Outcome::Pass.counts());
        node.record("add", Outcome::Error.counts());
        node.record("sub", Outcome::Fail.counts());

        assert_eq!(node.counts.count, 3);
        let add = node.function("add").unwrap();
        assert_eq!((add.count, add.success, add.errors), (2, 1, 1));
        assert_eq!(node.function("sub").unwrap().failures, 1);
        assert!(node.is_consistent());
    }

    #[test]
    fn test_nodes_are_created_once() {
        let mut root = Aggregate::new();
        root.test_node("t").record("f", Outcome::Pass.counts());
        root.test_node("t").record("f", Outcome::Pass.counts());
        assert_eq!(root.tests.len(), 1);
        assert_eq!(root.test("t").unwrap().counts.success, 2);
        assert_eq!(root.counts, Counts::default());
    }

    #[test]
    fn serializes_flat_counts() {
        let mut root = Aggregate::new();
        root.test_node("t").record("f", Outcome::Pass.counts());
        let json: serde_json::Value = serde_json::from_str(&root.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["tests"]["t"]["count"], 1);
        assert_eq!(json["tests"]["t"]["functions"]["f"]["success"], 1);
    }
}
