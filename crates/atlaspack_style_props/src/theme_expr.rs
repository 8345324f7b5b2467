use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{CondExpr, Expr};
use swc_core::quote;

use crate::context::Context;
use crate::tables::PropertyMode;
use crate::utils::{dot_member, index_member, key_member, paren};
use crate::value::{classify_scalar, is_zero, normalize_sign, null_expr, StyleValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildOptions {
  /// Fall back to the raw value when the theme has no such key.
  pub with_fallback: bool,
  /// Re-apply a stripped `-` sign to the resolved value.
  pub with_negation: bool,
  pub breakpoint: usize,
  pub mode: PropertyMode,
}

impl BuildOptions {
  pub fn style(breakpoint: usize) -> Self {
    BuildOptions {
      with_fallback: true,
      with_negation: true,
      breakpoint,
      mode: PropertyMode::Style,
    }
  }

  pub fn scale(breakpoint: usize) -> Self {
    BuildOptions {
      with_fallback: false,
      with_negation: false,
      breakpoint,
      mode: PropertyMode::Scale,
    }
  }
}

/// Builds the value of a single declaration, `None` for null values.
pub fn build_value(
  ctx: &mut Context<'_>,
  property: &str,
  value: &StyleValue<'_>,
  namespace: Option<&str>,
  options: BuildOptions,
) -> Option<Expr> {
  match value {
    StyleValue::Null => None,
    StyleValue::Literal(expr) => Some(build_theme_expr(
      ctx, property, expr, true, namespace, options,
    )),
    StyleValue::Computed(expr) => Some(build_theme_expr(
      ctx, property, expr, false, namespace, options,
    )),
    StyleValue::Conditional(cond) if ctx.closes_over_scope() => {
      Some(Expr::Cond(CondExpr {
        span: DUMMY_SP,
        test: cond.test.clone(),
        cons: Box::new(build_branch(ctx, property, &cond.cons, namespace, options)),
        alt: Box::new(build_branch(ctx, property, &cond.alt, namespace, options)),
      }))
    }
    StyleValue::Conditional(cond) => Some(build_theme_expr(
      ctx,
      property,
      &Expr::Cond((*cond).clone()),
      false,
      namespace,
      options,
    )),
    // Expanded position by position by the responsive aggregator
    StyleValue::Array(_) => None,
  }
}

fn build_branch(
  ctx: &mut Context<'_>,
  property: &str,
  branch: &Expr,
  namespace: Option<&str>,
  options: BuildOptions,
) -> Expr {
  build_value(ctx, property, &classify_scalar(branch), namespace, options)
    .unwrap_or_else(null_expr)
}

/// Builds the theme accessor of one resolved property.
///
/// * without a namespace the value is used raw
/// * in scale mode the value indexes the scale, which is then indexed by the
///   breakpoint: `theme.fontScales.body[1]`
/// * otherwise the value is looked up in the namespace, falling back to the
///   value itself: `theme.colors.primary ?? "primary"`, with a stripped sign
///   re-applied around the whole lookup
pub fn build_theme_expr(
  ctx: &mut Context<'_>,
  property: &str,
  value: &Expr,
  is_literal: bool,
  namespace: Option<&str>,
  options: BuildOptions,
) -> Expr {
  let BuildOptions {
    with_fallback,
    with_negation,
    breakpoint,
    mode,
  } = options;

  let Some(namespace) = namespace else {
    return access_key(ctx, property, value, is_literal, breakpoint);
  };

  if mode == PropertyMode::Scale {
    let key = access_key(ctx, property, value, is_literal, breakpoint);
    return index_member(key_member(dot_member(ctx.theme(), namespace), &key), breakpoint);
  }

  if is_literal && is_zero(value) {
    return value.clone();
  }

  let (base, is_negative) = if is_literal {
    normalize_sign(value)
  } else {
    (value.clone(), false)
  };

  let key = access_key(ctx, property, &base, is_literal, breakpoint);
  let accessor = key_member(dot_member(ctx.theme(), namespace), &key);

  let resolved = if with_fallback {
    quote!(
      "$accessor ?? $fallback" as Expr,
      accessor: Expr = accessor,
      fallback: Expr = fallback_operand(key),
    )
  } else {
    accessor
  };

  if with_negation && is_negative {
    quote!("\"-\" + ($resolved)" as Expr, resolved: Expr = resolved)
  } else {
    resolved
  }
}

fn access_key(
  ctx: &mut Context<'_>,
  property: &str,
  value: &Expr,
  is_literal: bool,
  breakpoint: usize,
) -> Expr {
  if is_literal {
    value.clone()
  } else {
    ctx.access_key(property, value, breakpoint)
  }
}

/// `??` cannot be mixed with `||`/`&&` without parentheses and binds looser
/// than most operators, so anything but a primary expression is wrapped.
fn fallback_operand(expr: Expr) -> Expr {
  match expr {
    Expr::Ident(_)
    | Expr::Lit(_)
    | Expr::Member(_)
    | Expr::Call(_)
    | Expr::Paren(_)
    | Expr::Tpl(_)
    | Expr::Array(_)
    | Expr::Object(_)
    | Expr::This(_) => expr,
    expr => paren(expr),
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::config::{StylePropsConfig, StylingBackend};
  use crate::test_utils::{emit_expr, parse_expr, print_expr};
  use crate::value::classify_value;

  fn build(
    config: &StylePropsConfig,
    property: &str,
    code: &str,
    namespace: Option<&str>,
    options: BuildOptions,
  ) -> String {
    let mut ctx = Context::new(config);
    let expr = parse_expr(code);
    let value = build_value(&mut ctx, property, &classify_value(&expr), namespace, options)
      .expect("value should not be null");

    emit_expr(&value)
  }

  fn build_style(code: &str, namespace: Option<&str>) -> String {
    build(
      &StylePropsConfig::default(),
      "marginRight",
      code,
      namespace,
      BuildOptions::style(0),
    )
  }

  #[test]
  fn test_literal_with_fallback() {
    assert_eq!(
      build_style(r#""primary""#, Some("colors")),
      print_expr(r#"theme.colors.primary ?? "primary""#)
    );
  }

  #[test]
  fn test_non_identifier_and_numeric_keys_are_computed() {
    assert_eq!(
      build_style(r#""1/2""#, Some("sizes")),
      print_expr(r#"theme.sizes["1/2"] ?? "1/2""#)
    );
    assert_eq!(
      build_style("3", Some("space")),
      print_expr("theme.space[3] ?? 3")
    );
  }

  #[test]
  fn test_negative_string_wraps_fallback() {
    assert_eq!(
      build_style(r#""-large""#, Some("space")),
      print_expr(r#""-" + (theme.space.large ?? "large")"#)
    );
  }

  #[test]
  fn test_negative_number_wraps_fallback() {
    assert_eq!(
      build_style("-3", Some("space")),
      print_expr(r#""-" + (theme.space[3] ?? 3)"#)
    );
  }

  #[test]
  fn test_negation_disabled_keeps_positive_lookup() {
    let options = BuildOptions {
      with_negation: false,
      ..BuildOptions::style(0)
    };

    assert_eq!(
      build(
        &StylePropsConfig::default(),
        "marginRight",
        r#""-large""#,
        Some("space"),
        options
      ),
      print_expr(r#"theme.space.large ?? "large""#)
    );
  }

  #[test]
  fn test_without_fallback() {
    let options = BuildOptions {
      with_fallback: false,
      ..BuildOptions::style(0)
    };

    assert_eq!(
      build(
        &StylePropsConfig::default(),
        "marginRight",
        r#""-large""#,
        Some("space"),
        options
      ),
      print_expr(r#""-" + (theme.space.large)"#)
    );
  }

  #[test]
  fn test_zero_is_raw() {
    assert_eq!(build_style("0", Some("space")), print_expr("0"));
  }

  #[test]
  fn test_no_namespace_is_raw_and_keeps_sign() {
    assert_eq!(build_style(r#""-1px""#, None), print_expr(r#""-1px""#));
    assert_eq!(build_style("gutter", None), print_expr("gutter"));
  }

  #[test]
  fn test_computed_value() {
    assert_eq!(
      build_style("gap", Some("space")),
      print_expr("theme.space[gap] ?? gap")
    );
    assert_eq!(
      build_style("a || b", Some("space")),
      print_expr("theme.space[a || b] ?? (a || b)")
    );
  }

  #[test]
  fn test_conditional_is_distributed() {
    assert_eq!(
      build_style(r#"active ? "-large" : null"#, Some("space")),
      print_expr(r#"active ? "-" + (theme.space.large ?? "large") : null"#)
    );
  }

  #[test]
  fn test_scale_mode_indexes_breakpoint() {
    assert_eq!(
      build(
        &StylePropsConfig::default(),
        "fontSize",
        r#""body""#,
        Some("fontScales"),
        BuildOptions::scale(2)
      ),
      print_expr("theme.fontScales.body[2]")
    );
  }

  #[test]
  fn test_surfaced_props_computed_value() {
    let config = StylePropsConfig {
      styling_backend: StylingBackend::SurfacedProps,
      ..Default::default()
    };

    assert_eq!(
      build(
        &config,
        "color",
        "brand",
        Some("colors"),
        BuildOptions::style(0)
      ),
      print_expr("theme.colors[__styleProps.color[0]] ?? __styleProps.color[0]")
    );
    assert_eq!(
      build(
        &config,
        "color",
        r#"active ? "primary" : "muted""#,
        Some("colors"),
        BuildOptions::style(0)
      ),
      print_expr("theme.colors[__styleProps.color[0]] ?? __styleProps.color[0]")
    );
  }

  #[test]
  fn test_surfaced_props_literal_is_embedded() {
    let config = StylePropsConfig {
      styling_backend: StylingBackend::SurfacedProps,
      ..Default::default()
    };
    let mut ctx = Context::new(&config);
    let expr = parse_expr(r#""primary""#);
    let value = build_value(
      &mut ctx,
      "color",
      &classify_value(&expr),
      Some("colors"),
      BuildOptions::style(0),
    );

    assert_eq!(
      value.as_ref().map(emit_expr),
      Some(print_expr(r#"theme.colors.primary ?? "primary""#))
    );
    assert!(ctx.into_registry().is_empty());
  }
}
