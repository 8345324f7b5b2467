use swc_core::atoms::Atom;
use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{
  CondExpr, Expr, JSXAttrValue, JSXExpr, Lit, Null, Number, Str, Tpl, UnaryExpr, UnaryOp,
};

/// Shape of a style attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue<'a> {
  /// `null`, `undefined` or an empty expression container. Never produces a
  /// declaration.
  Null,
  Literal(&'a Expr),
  /// Any value only known at runtime.
  Computed(&'a Expr),
  /// One entry per breakpoint position, `None` for null positions.
  Array(Vec<Option<&'a Expr>>),
  /// A conditional whose branches are both literals or null.
  Conditional(&'a CondExpr),
}

/// Reads the value of a JSX attribute as an expression.
///
/// Returns `None` for a valueless attribute (`<Box hidden />`), which is not
/// a style value.
pub fn attribute_value_expr(value: &Option<JSXAttrValue>) -> Option<Expr> {
  match value.as_ref()? {
    JSXAttrValue::Lit(lit) => Some(Expr::Lit(lit.clone())),
    JSXAttrValue::JSXExprContainer(container) => match &container.expr {
      JSXExpr::JSXEmptyExpr(_) => Some(null_expr()),
      JSXExpr::Expr(expr) => Some((**expr).clone()),
    },
    JSXAttrValue::JSXElement(element) => Some(Expr::JSXElement(element.clone())),
    JSXAttrValue::JSXFragment(fragment) => Some(Expr::JSXFragment(fragment.clone())),
  }
}

pub fn classify_value(expr: &Expr) -> StyleValue<'_> {
  let expr = unwrap_parens(expr);

  if let Expr::Array(array) = expr {
    if array.elems.iter().flatten().all(|elem| elem.spread.is_none()) {
      return StyleValue::Array(
        array
          .elems
          .iter()
          .map(|elem| {
            elem
              .as_ref()
              .map(|elem| unwrap_parens(&elem.expr))
              .filter(|expr| !is_null(expr))
          })
          .collect(),
      );
    }
  }

  classify_scalar(expr)
}

/// Same as [`classify_value`] but treats arrays as opaque computed values.
/// Used for the individual positions of a responsive array.
pub fn classify_scalar(expr: &Expr) -> StyleValue<'_> {
  let expr = unwrap_parens(expr);

  if is_null(expr) {
    return StyleValue::Null;
  }

  if is_literal(expr) {
    return StyleValue::Literal(expr);
  }

  if let Expr::Cond(cond) = expr {
    let static_branch = |branch: &Expr| {
      let branch = unwrap_parens(branch);
      is_null(branch) || is_literal(branch)
    };

    if static_branch(&cond.cons) && static_branch(&cond.alt) {
      return StyleValue::Conditional(cond);
    }
  }

  StyleValue::Computed(expr)
}

/// Splits the sign off a literal value.
///
/// Returns the positive base value and whether the input was negative. Only
/// unary negations of numbers, negative numbers and strings starting with
/// `-` are negative; every other value is returned unchanged.
pub fn normalize_sign(expr: &Expr) -> (Expr, bool) {
  match unwrap_parens(expr) {
    Expr::Unary(UnaryExpr {
      op: UnaryOp::Minus,
      arg,
      ..
    }) if matches!(unwrap_parens(arg), Expr::Lit(Lit::Num(_))) => {
      (unwrap_parens(arg).clone(), true)
    }
    Expr::Lit(Lit::Num(num)) if num.value < 0.0 => (number_expr(-num.value), true),
    Expr::Lit(Lit::Str(str)) => match str.value.strip_prefix('-') {
      Some(rest) if !rest.is_empty() => (string_expr(rest), true),
      _ => (expr.clone(), false),
    },
    Expr::Tpl(tpl) => match static_template(tpl).and_then(|raw| raw.strip_prefix('-')) {
      Some(rest) if !rest.is_empty() => (string_expr(rest), true),
      _ => (expr.clone(), false),
    },
    other => (other.clone(), false),
  }
}

/// Text of a literal that can be used as a theme key.
pub fn literal_string(expr: &Expr) -> Option<Atom> {
  match unwrap_parens(expr) {
    Expr::Lit(Lit::Str(str)) => Some(str.value.clone()),
    Expr::Tpl(tpl) => static_template(tpl).map(Atom::from),
    _ => None,
  }
}

pub fn is_zero(expr: &Expr) -> bool {
  matches!(unwrap_parens(expr), Expr::Lit(Lit::Num(num)) if num.value == 0.0)
}

pub fn is_null(expr: &Expr) -> bool {
  match unwrap_parens(expr) {
    Expr::Lit(Lit::Null(_)) => true,
    Expr::Ident(ident) => &*ident.sym == "undefined",
    Expr::Unary(UnaryExpr {
      op: UnaryOp::Void,
      arg,
      ..
    }) => matches!(&**arg, Expr::Lit(_)),
    _ => false,
  }
}

fn is_literal(expr: &Expr) -> bool {
  match expr {
    Expr::Lit(Lit::Str(_) | Lit::Num(_) | Lit::Bool(_)) => true,
    Expr::Tpl(tpl) => static_template(tpl).is_some(),
    Expr::Unary(UnaryExpr {
      op: UnaryOp::Minus,
      arg,
      ..
    }) => matches!(unwrap_parens(arg), Expr::Lit(Lit::Num(_))),
    _ => false,
  }
}

fn static_template(tpl: &Tpl) -> Option<&str> {
  match (tpl.exprs.is_empty(), tpl.quasis.as_slice()) {
    (true, [quasi]) => Some(match &quasi.cooked {
      Some(cooked) => &**cooked,
      None => &*quasi.raw,
    }),
    _ => None,
  }
}

pub fn unwrap_parens(mut expr: &Expr) -> &Expr {
  while let Expr::Paren(paren) = expr {
    expr = &paren.expr;
  }
  expr
}

pub fn null_expr() -> Expr {
  Expr::Lit(Lit::Null(Null { span: DUMMY_SP }))
}

pub fn string_expr(value: &str) -> Expr {
  Expr::Lit(Lit::Str(Str {
    span: DUMMY_SP,
    value: value.into(),
    raw: None,
  }))
}

pub fn number_expr(value: f64) -> Expr {
  Expr::Lit(Lit::Num(Number {
    span: DUMMY_SP,
    value,
    raw: None,
  }))
}
