//! Access protocols of the supported css-in-js backends.
//!
//! A computed style value (`color={brand}`) has to reach the generated style
//! function somehow. Libraries that evaluate the style function in the
//! render scope can reference it directly, others run it in a generated
//! wrapper component and need the value handed over as a prop.

use indexmap::IndexMap;
use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{ArrayLit, Expr, ExprOrSpread, ObjectLit};

use crate::config::StylingBackend;
use crate::utils::{dot_member, ident, index_member, key_value};
use crate::value::null_expr;

/// Prop bag the wrapper component of a surfaced-props backend exposes the
/// registered values through.
pub const SURFACED_PROPS_IDENTIFIER_NAME: &str = "__styleProps";

/// Computed values collected while transforming one element, keyed by
/// output property and indexed by breakpoint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PassThroughRegistry {
  values: IndexMap<String, Vec<Option<Expr>>>,
}

impl PassThroughRegistry {
  pub fn record(&mut self, property: &str, breakpoint: usize, value: Expr) {
    let positions = self.values.entry(property.to_string()).or_default();
    if positions.len() <= breakpoint {
      positions.resize(breakpoint + 1, None);
    }
    positions[breakpoint] = Some(value);
  }

  pub fn get(&self, property: &str) -> Option<&[Option<Expr>]> {
    self
      .values
      .get(property)
      .map(|positions| positions.as_slice())
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn properties(&self) -> impl Iterator<Item = &str> {
    self.values.keys().map(String::as_str)
  }

  /// Renders the registry as `{ property: [v0, v1, ...] }`, the prop value
  /// a wrapper component has to receive as `__styleProps`. Unfilled
  /// positions become `null`.
  pub fn to_object_lit(&self) -> ObjectLit {
    let props = self
      .values
      .iter()
      .map(|(property, positions)| {
        let elems = positions
          .iter()
          .map(|value| {
            Some(ExprOrSpread {
              spread: None,
              expr: Box::new(value.clone().unwrap_or_else(null_expr)),
            })
          })
          .collect();

        key_value(property, Expr::Array(ArrayLit { span: DUMMY_SP, elems }))
      })
      .collect();

    ObjectLit {
      span: DUMMY_SP,
      props,
    }
  }
}

/// Strategy deciding how a computed value is accessed from inside the
/// generated style function.
pub trait AccessProtocol {
  /// Whether the style function can reference the render scope, which
  /// allows static conditionals to be resolved branch by branch.
  fn closes_over_scope(&self) -> bool;

  fn resolve_access_key(
    &self,
    property: &str,
    value: &Expr,
    breakpoint: usize,
    registry: &mut PassThroughRegistry,
  ) -> Expr;
}

/// The style function closes over the render scope.
pub struct DirectClosure;

impl AccessProtocol for DirectClosure {
  fn closes_over_scope(&self) -> bool {
    true
  }

  fn resolve_access_key(
    &self,
    _property: &str,
    value: &Expr,
    _breakpoint: usize,
    _registry: &mut PassThroughRegistry,
  ) -> Expr {
    value.clone()
  }
}

/// The style function only sees props of a generated wrapper component.
pub struct SurfacedProps;

impl AccessProtocol for SurfacedProps {
  fn closes_over_scope(&self) -> bool {
    false
  }

  fn resolve_access_key(
    &self,
    property: &str,
    value: &Expr,
    breakpoint: usize,
    registry: &mut PassThroughRegistry,
  ) -> Expr {
    registry.record(property, breakpoint, value.clone());

    index_member(
      dot_member(Expr::Ident(ident(SURFACED_PROPS_IDENTIFIER_NAME)), property),
      breakpoint,
    )
  }
}

pub fn access_protocol(backend: StylingBackend) -> &'static dyn AccessProtocol {
  match backend {
    StylingBackend::DirectClosure => &DirectClosure,
    StylingBackend::SurfacedProps => &SurfacedProps,
  }
}
