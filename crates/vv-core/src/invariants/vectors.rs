//! Vector set invariants.
//!
//! | Property | Description |
//! |----------|-------------|
//! | AspectListSorted | Aspect list is strictly ascending |
//! | TerminalAspectDeclared | Every vector ends in `_<aspect>` of a declared aspect |
//! | ClusterSnapshotsNonEmpty | No registered cluster holds an empty snapshot |
//!
//! Repeated vectors are legal: values are never deduplicated, so a value
//! listed twice yields the same vector twice.

use crate::property::{PropertyChecker, PropertyResult};
use crate::vector_set::VectorSet;
use crate::TOKEN_SEPARATOR;

/// State a vector set exposes for property checking.
pub trait VectorSetProperties {
    /// Current vectors in set order.
    fn vector_set(&self) -> &[String];

    /// Aspect list as reported to callers.
    fn aspect_list(&self) -> &[String];

    /// Registered cluster snapshots, by name.
    fn cluster_snapshots(&self) -> Vec<(&str, &[String])> {
        Vec::new()
    }
}

impl VectorSetProperties for VectorSet {
    fn vector_set(&self) -> &[String] {
        self.vectors()
    }

    fn aspect_list(&self) -> &[String] {
        VectorSet::aspect_list(self)
    }
}

/// Property checker for vector sets.
pub struct VectorSetPropertyChecker<'a, T: VectorSetProperties> {
    state: &'a T,
}

impl<'a, T: VectorSetProperties> VectorSetPropertyChecker<'a, T> {
    /// Create a new checker for the given state.
    #[must_use]
    pub fn new(state: &'a T) -> Self {
        Self { state }
    }

    fn check_aspect_list_sorted(&self) -> PropertyResult {
        let aspects = self.state.aspect_list();

        for pair in aspects.windows(2) {
            if pair[0] >= pair[1] {
                return PropertyResult::fail(
                    "AspectListSorted",
                    format!("Aspect {} is not before {}", pair[0], pair[1]),
                );
            }
        }

        PropertyResult::pass("AspectListSorted")
    }

    /// Every vector's last token names a declared aspect.
    fn check_terminal_aspect_declared(&self) -> PropertyResult {
        let aspects = self.state.aspect_list();

        for vector in self.state.vector_set() {
            let declared = aspects.iter().any(|aspect| {
                vector
                    .strip_suffix(aspect.as_str())
                    .map_or(false, |rest| rest.ends_with(TOKEN_SEPARATOR))
            });

            if !declared {
                return PropertyResult::fail(
                    "TerminalAspectDeclared",
                    format!("Vector {} does not end with a declared aspect", vector),
                );
            }
        }

        PropertyResult::pass("TerminalAspectDeclared")
    }

    fn check_cluster_snapshots_non_empty(&self) -> PropertyResult {
        for (name, snapshot) in self.state.cluster_snapshots() {
            if snapshot.is_empty() {
                return PropertyResult::fail(
                    "ClusterSnapshotsNonEmpty",
                    format!("Cluster {} has an empty snapshot", name),
                );
            }
        }

        PropertyResult::pass("ClusterSnapshotsNonEmpty")
    }
}

impl<'a, T: VectorSetProperties> PropertyChecker for VectorSetPropertyChecker<'a, T> {
    fn check_all(&self) -> Vec<PropertyResult> {
        vec![
            self.check_aspect_list_sorted(),
            self.check_terminal_aspect_declared(),
            self.check_cluster_snapshots_non_empty(),
        ]
    }
}
