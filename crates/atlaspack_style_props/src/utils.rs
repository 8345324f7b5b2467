use swc_core::common::{SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::{
  ComputedPropName, Expr, Ident, IdentName, JSXElementName, JSXObject, KeyValueProp, Lit,
  MemberExpr, MemberProp, ParenExpr, Prop, PropName, PropOrSpread, SpreadElement, Str,
};

use crate::value::{number_expr, unwrap_parens};

pub fn ident(name: &str) -> Ident {
  Ident::new(name.into(), DUMMY_SP, SyntaxContext::empty())
}

/// `obj.name`, or `obj["name"]` when `name` is not a valid identifier.
pub fn dot_member(obj: Expr, name: &str) -> Expr {
  let prop = if is_valid_identifier(name) {
    MemberProp::Ident(IdentName::new(name.into(), DUMMY_SP))
  } else {
    MemberProp::Computed(ComputedPropName {
      span: DUMMY_SP,
      expr: Box::new(Expr::Lit(Lit::Str(Str::from(name)))),
    })
  };

  Expr::Member(MemberExpr {
    span: DUMMY_SP,
    obj: Box::new(obj),
    prop,
  })
}

/// `obj[index]`
pub fn index_member(obj: Expr, index: usize) -> Expr {
  computed_member(obj, number_expr(index as f64))
}

/// Accesses `obj` by a key expression, using dot access for string keys
/// that are valid identifiers.
pub fn key_member(obj: Expr, key: &Expr) -> Expr {
  match unwrap_parens(key) {
    Expr::Lit(Lit::Str(str)) => dot_member(obj, &str.value),
    key => computed_member(obj, key.clone()),
  }
}

fn computed_member(obj: Expr, key: Expr) -> Expr {
  Expr::Member(MemberExpr {
    span: DUMMY_SP,
    obj: Box::new(obj),
    prop: MemberProp::Computed(ComputedPropName {
      span: DUMMY_SP,
      expr: Box::new(key),
    }),
  })
}

pub fn paren(expr: Expr) -> Expr {
  Expr::Paren(ParenExpr {
    span: DUMMY_SP,
    expr: Box::new(expr),
  })
}

pub fn key_value(key: &str, value: Expr) -> PropOrSpread {
  let key = if is_valid_identifier(key) {
    PropName::Ident(IdentName::new(key.into(), DUMMY_SP))
  } else {
    PropName::Str(Str::from(key))
  };

  PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
    key,
    value: Box::new(value),
  })))
}

pub fn spread(expr: Expr) -> PropOrSpread {
  PropOrSpread::Spread(SpreadElement {
    dot3_token: DUMMY_SP,
    expr: Box::new(expr),
  })
}

pub fn is_valid_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
      chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    }
    _ => false,
  }
}

/// Printable name of a JSX element, used to locate diagnostics.
pub fn element_name(name: &JSXElementName) -> String {
  match name {
    JSXElementName::Ident(ident) => ident.sym.to_string(),
    JSXElementName::JSXMemberExpr(member) => {
      format!("{}.{}", jsx_object_name(&member.obj), member.prop.sym)
    }
    JSXElementName::JSXNamespacedName(name) => format!("{}:{}", name.ns.sym, name.name.sym),
  }
}

fn jsx_object_name(obj: &JSXObject) -> String {
  match obj {
    JSXObject::Ident(ident) => ident.sym.to_string(),
    JSXObject::JSXMemberExpr(member) => {
      format!("{}.{}", jsx_object_name(&member.obj), member.prop.sym)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_is_valid_identifier() {
    assert!(is_valid_identifier("primary"));
    assert!(is_valid_identifier("$brand_2"));
    assert!(!is_valid_identifier("100%"));
    assert!(!is_valid_identifier("2xl"));
    assert!(!is_valid_identifier("brand-primary"));
    assert!(!is_valid_identifier(""));
  }
}
