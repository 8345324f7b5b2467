use swc_core::ecma::ast::{Expr, Lit};

use crate::context::Context;
use crate::responsive::Declaration;
use crate::utils::{dot_member, key_member};
use crate::value::{is_null, literal_string, string_expr, unwrap_parens};

/// Outcome of reading a variant attribute.
#[derive(Debug, PartialEq)]
pub enum VariantSpread {
  /// `...theme.<namespace>.<value>`
  Spread(Declaration),
  /// Explicit null, nothing to emit.
  Skip,
  /// The value is not a literal key.
  Malformed,
}

/// Spreads the theme sub-object a variant value selects.
///
/// Variants always land in the base bucket and never take part in fallback,
/// negation or scale expansion.
pub fn spread_variant(ctx: &Context<'_>, namespace: &str, value: &Expr) -> VariantSpread {
  if is_null(value) {
    return VariantSpread::Skip;
  }

  let key = match unwrap_parens(value) {
    Expr::Lit(Lit::Num(_)) => unwrap_parens(value).clone(),
    value => match literal_string(value) {
      Some(key) => string_expr(&key),
      None => return VariantSpread::Malformed,
    },
  };

  VariantSpread::Spread(Declaration::Spread(key_member(
    dot_member(ctx.theme(), namespace),
    &key,
  )))
}
