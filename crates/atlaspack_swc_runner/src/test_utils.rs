use swc_core::ecma::visit::VisitMut;

use crate::runner::run_visit;
pub use crate::runner::{RunContext, RunVisitResult};

pub type RunTestContext = RunContext;

/// Helper to test SWC visitors.
///
/// * Parse `code` with SWC, JSX enabled
/// * Run the resolver and then the visitor over it
/// * Return the printed module and the visitor
///
/// Panics when `code` does not parse.
pub fn run_test_visit<V: VisitMut>(
  code: &str,
  make_visit: impl FnOnce(RunTestContext) -> V,
) -> RunVisitResult<V> {
  run_visit(code, make_visit).unwrap()
}

struct Unchanged;

impl VisitMut for Unchanged {}

/// Prints `code` through the same parse/emit cycle a visitor's output goes
/// through, so expected code can be compared without caring about the code
/// generator's formatting.
pub fn normalize_code(code: &str) -> String {
  run_test_visit(code, |_| Unchanged).output_code
}
