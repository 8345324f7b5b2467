//! Parse and print helpers for the tests of this crate.
//!
//! Everything goes through the SWC runner, so expected output is normalised
//! by the same parse/emit cycle as the actual output and assertions do not
//! depend on the code generator's formatting.

use atlaspack_swc_runner::test_utils::{normalize_code, run_test_visit};
use swc_core::ecma::ast::{Expr, VarDeclarator};
use swc_core::ecma::visit::VisitMut;

use crate::config::StylePropsConfig;
use crate::errors::StylePropsError;
use crate::visitor::{style_props_visitor, SurfacedProps};

const EXPR_BINDING: &str = "__expr";

fn wrap(code: &str) -> String {
  format!("const {EXPR_BINDING} = {code};")
}

/// Takes the initialiser of the first declarator, `__expr` in wrapped code.
#[derive(Default)]
struct TakeInit {
  expr: Option<Expr>,
}

impl VisitMut for TakeInit {
  fn visit_mut_var_declarator(&mut self, decl: &mut VarDeclarator) {
    if self.expr.is_none() {
      self.expr = decl.init.take().map(|init| *init);
    }
  }
}

/// Replaces the initialiser of the first declarator.
struct ReplaceInit {
  expr: Option<Expr>,
}

impl VisitMut for ReplaceInit {
  fn visit_mut_var_declarator(&mut self, decl: &mut VarDeclarator) {
    if let Some(expr) = self.expr.take() {
      decl.init = Some(Box::new(expr));
    }
  }
}

/// Parses a single JSX-enabled expression. The resolver has run over it, so
/// bindings carry their syntax context.
pub fn parse_expr(code: &str) -> Expr {
  run_test_visit(&wrap(code), |_| TakeInit::default())
    .visitor
    .expr
    .expect("expected an initialiser")
}

/// Prints `expr` the way [`print_expr`] prints source code.
pub fn emit_expr(expr: &Expr) -> String {
  run_test_visit(&wrap("null"), |_| ReplaceInit {
    expr: Some(expr.clone()),
  })
  .output_code
}

/// Normalises an expected expression.
pub fn print_expr(code: &str) -> String {
  normalize_code(&wrap(code))
}

/// Normalises expected module code.
pub fn print(code: &str) -> String {
  normalize_code(code)
}

/// What a run of the style props pass reported besides the rewritten code.
#[derive(Debug, Default)]
pub struct Reported {
  pub errors: Vec<StylePropsError>,
  pub surfaced_props: Vec<SurfacedProps>,
}

/// Runs the style props pass over `code` and prints the result.
pub fn transform(code: &str, config: StylePropsConfig) -> (String, Reported) {
  let mut reported = Reported::default();
  let errors = &mut reported.errors;
  let surfaced_props = &mut reported.surfaced_props;

  let output_code = run_test_visit(code, move |_| {
    style_props_visitor(config, errors, surfaced_props)
  })
  .output_code;

  (output_code, reported)
}
