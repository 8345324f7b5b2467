use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{Expr, ObjectLit, PropOrSpread};

use crate::context::Context;
use crate::tables::{resolve_namespace, PropertyMode};
use crate::theme_expr::{build_value, BuildOptions};
use crate::utils::{key_value, spread};
use crate::value::{classify_scalar, StyleValue};

/// One entry of the generated style object.
#[derive(Clone, Debug, PartialEq)]
pub enum Declaration {
  Property { key: String, value: Expr },
  /// Spread of a whole theme sub-object, produced by variants.
  Spread(Expr),
}

impl Declaration {
  pub fn into_prop(self) -> PropOrSpread {
    match self {
      Declaration::Property { key, value } => key_value(&key, value),
      Declaration::Spread(expr) => spread(expr),
    }
  }
}

/// Declarations grouped by breakpoint. Bucket 0 is unconditional, bucket `i`
/// applies from `breakpoints[i - 1]` upwards.
#[derive(Debug)]
pub struct ResponsiveBuckets {
  buckets: Vec<Vec<Declaration>>,
}

impl ResponsiveBuckets {
  pub fn new(bucket_count: usize) -> Self {
    ResponsiveBuckets {
      buckets: (0..bucket_count.max(1)).map(|_| Vec::new()).collect(),
    }
  }

  /// Adds a declaration, ignoring breakpoints past the configured ones.
  pub fn push(&mut self, breakpoint: usize, declaration: Declaration) {
    if let Some(bucket) = self.buckets.get_mut(breakpoint) {
      bucket.push(declaration);
    }
  }

  pub fn bucket(&self, breakpoint: usize) -> &[Declaration] {
    self
      .buckets
      .get(breakpoint)
      .map(Vec::as_slice)
      .unwrap_or_default()
  }

  pub fn is_empty(&self) -> bool {
    self.buckets.iter().all(Vec::is_empty)
  }

  /// Flattens the buckets into style object entries: base declarations first,
  /// then one `@media` rule per non-empty responsive bucket in breakpoint
  /// order.
  pub fn flatten(self, breakpoints: &[String]) -> Vec<PropOrSpread> {
    let mut buckets = self.buckets.into_iter();
    let mut props: Vec<PropOrSpread> = buckets
      .next()
      .unwrap_or_default()
      .into_iter()
      .map(Declaration::into_prop)
      .collect();

    for (bucket, breakpoint) in buckets.zip(breakpoints) {
      if bucket.is_empty() {
        continue;
      }

      let rule = ObjectLit {
        span: DUMMY_SP,
        props: bucket.into_iter().map(Declaration::into_prop).collect(),
      };
      props.push(key_value(&media_query(breakpoint), Expr::Object(rule)));
    }

    props
  }
}

pub fn media_query(breakpoint: &str) -> String {
  format!("@media (min-width: {breakpoint})")
}

/// Fills null positions of a responsive array with the closest preceding
/// value and drops positions past the last bucket. A leading null stays
/// null.
pub fn carry_forward<'a>(
  positions: &[Option<&'a Expr>],
  bucket_count: usize,
) -> Vec<Option<&'a Expr>> {
  let mut last = None;

  positions
    .iter()
    .take(bucket_count)
    .map(|position| {
      if position.is_some() {
        last = *position;
      }
      last
    })
    .collect()
}

/// Builds the declarations of a style or scale attribute into `buckets`.
///
/// Arrays contribute one position per breakpoint. Scalars only populate the
/// base bucket, unless they are scale values, which are resolved for every
/// breakpoint.
pub fn expand_attribute(
  ctx: &mut Context<'_>,
  buckets: &mut ResponsiveBuckets,
  properties: &[&str],
  mode: PropertyMode,
  value: &StyleValue<'_>,
) {
  let bucket_count = ctx.config.bucket_count();

  let positions: Vec<(usize, StyleValue<'_>)> = match value {
    StyleValue::Array(positions) => carry_forward(positions, bucket_count)
      .into_iter()
      .map(|position| position.map(classify_scalar).unwrap_or(StyleValue::Null))
      .enumerate()
      .collect(),
    scalar if mode == PropertyMode::Scale => (0..bucket_count)
      .map(|breakpoint| (breakpoint, scalar.clone()))
      .collect(),
    scalar => vec![(0, scalar.clone())],
  };

  for (breakpoint, value) in positions {
    for property in properties {
      let namespace = resolve_namespace(property, mode);
      if mode == PropertyMode::Scale && namespace.is_none() {
        tracing::trace!("Dropping {} without a theme scale", property);
        continue;
      }

      let options = match mode {
        PropertyMode::Style => BuildOptions::style(breakpoint),
        PropertyMode::Scale => BuildOptions::scale(breakpoint),
      };

      if let Some(value) = build_value(ctx, property, &value, namespace, options) {
        buckets.push(
          breakpoint,
          Declaration::Property {
            key: property.to_string(),
            value,
          },
        );
      }
    }
  }
}
