//! Property checks over a finished vector set.
//!
//! A checker runs a fixed list of named checks (sorted aspect list, declared
//! terminal aspects, non-empty cluster snapshots) and reports one
//! [`PropertyResult`] per check. The generator exposes the collected
//! [`PropertySummary`] and the CLI's `check` command prints it.

/// Outcome of one named check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyResult {
    /// Check name, e.g. `AspectListSorted`
    pub name: &'static str,
    pub holds: bool,
    /// First offending vector, aspect or cluster, when the check fails
    pub violation: Option<String>,
}

impl PropertyResult {
    #[must_use]
    pub fn pass(name: &'static str) -> Self {
        debug_assert!(!name.is_empty());

        Self {
            name,
            holds: true,
            violation: None,
        }
    }

    /// A failed check, naming what broke it.
    #[must_use]
    pub fn fail(name: &'static str, violation: String) -> Self {
        debug_assert!(!name.is_empty());

        Self {
            name,
            holds: false,
            violation: Some(violation),
        }
    }

    /// One line: `[PASS] Name` or `[FAIL] Name: offender`.
    #[must_use]
    pub fn format_status(&self) -> String {
        match (&self.violation, self.holds) {
            (_, true) => format!("[PASS] {}", self.name),
            (Some(violation), false) => format!("[FAIL] {}: {}", self.name, violation),
            (None, false) => format!("[FAIL] {}", self.name),
        }
    }
}

/// Runs named checks against some vector-set state.
pub trait PropertyChecker {
    /// Every check, passing ones included, in a stable order.
    fn check_all(&self) -> Vec<PropertyResult>;

    /// First failing check, if any.
    fn verify_all(&self) -> Result<(), PropertyResult> {
        match self.check_all().into_iter().find(|r| !r.holds) {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    fn all_hold(&self) -> bool {
        self.check_all().iter().all(|r| r.holds)
    }

    fn summary(&self) -> PropertySummary {
        PropertySummary::from_results(self.check_all())
    }
}

/// Collected results of one checker run.
#[derive(Debug, Clone, Default)]
pub struct PropertySummary {
    pub passed: u64,
    pub failed: u64,
    pub total: u64,
    pub results: Vec<PropertyResult>,
}

impl PropertySummary {
    /// Tally `results`.
    #[must_use]
    pub fn from_results(results: Vec<PropertyResult>) -> Self {
        let passed = results.iter().filter(|r| r.holds).count() as u64;
        let total = results.len() as u64;

        Self {
            passed,
            failed: total - passed,
            total,
            results,
        }
    }

    /// Failed checks, in check order.
    pub fn failures(&self) -> impl Iterator<Item = &PropertyResult> {
        self.results.iter().filter(|r| !r.holds)
    }

    /// Report for the `check` command.
    #[must_use]
    pub fn format_report(&self) -> String {
        let mut report = String::from("Vector Set Properties\n");
        report.push_str("=====================\n\n");

        for result in &self.results {
            report.push_str(&result.format_status());
            report.push('\n');
        }

        report.push_str(&format!(
            "\nSummary: {} of {} properties hold\n",
            self.passed, self.total
        ));
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<PropertyResult>);

    impl PropertyChecker for Fixed {
        fn check_all(&self) -> Vec<PropertyResult> {
            self.0.clone()
        }
    }

    #[test]
    fn test_format_status() {
        assert_eq!(
            PropertyResult::pass("AspectListSorted").format_status(),
            "[PASS] AspectListSorted"
        );

        let fail = PropertyResult::fail(
            "TerminalAspectDeclared",
            "Vector active_voicemood does not end with a declared aspect".to_string(),
        );
        assert!(!fail.holds);
        assert_eq!(
            fail.format_status(),
            "[FAIL] TerminalAspectDeclared: Vector active_voicemood does not end with a declared aspect"
        );
    }

    #[test]
    fn test_verify_all_returns_first_failure() {
        let checker = Fixed(vec![
            PropertyResult::pass("AspectListSorted"),
            PropertyResult::fail("TerminalAspectDeclared", "x_voicemood".to_string()),
            PropertyResult::fail("ClusterSnapshotsNonEmpty", "tense_list".to_string()),
        ]);

        assert!(!checker.all_hold());
        assert_eq!(checker.verify_all().unwrap_err().name, "TerminalAspectDeclared");

        let summary = checker.summary();
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.failures().count(), 2);

        let report = summary.format_report();
        assert!(report.starts_with("Vector Set Properties"));
        assert!(report.contains("Summary: 1 of 3 properties hold"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = PropertySummary::from_results(Vec::new());
        assert_eq!(summary.total, 0);
        assert!(summary.format_report().contains("0 of 0"));
    }
}
