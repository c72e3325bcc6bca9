//! Preflight reporter — formats PASS/FAIL output and prints a summary.

use appenv_settings::loader::FieldOutcome;

pub struct Reporter {
    passed: usize,
    failed: usize,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter {
    pub fn new() -> Self {
        Self {
            passed: 0,
            failed: 0,
        }
    }

    pub fn record(&mut self, outcome: &FieldOutcome) {
        println!("{}", self.tally(outcome));
    }

    /// Count `outcome` as passed or failed and return its report line.
    pub fn tally(&mut self, outcome: &FieldOutcome) -> String {
        let spec = outcome.spec;
        match &outcome.result {
            Ok(value) => {
                self.passed += 1;
                format!("PASS  {} = {}", spec.name, spec.display(value))
            }
            Err(failure) => {
                self.failed += 1;
                format!("FAIL  {}: {}", spec.name, failure.message)
            }
        }
    }

    pub fn print_summary(&self) {
        println!();
        println!("────────────────────────────────────────────────────");
        println!("Results: {} passed, {} failed", self.passed, self.failed);
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
