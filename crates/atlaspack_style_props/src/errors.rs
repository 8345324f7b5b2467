use swc_core::common::Span;

/// Problems found while transforming the style props of an element.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StylePropsError {
  /// The attribute is left on the element and the rest of it is transformed.
  #[error("<{element}>: the value of variant `{attribute}` must be a string literal")]
  MalformedVariantValue {
    element: String,
    attribute: String,
    span: Span,
  },
  /// The element is left untouched.
  #[error("<{element}>: the existing `{attribute}` function has no return statement")]
  MissingReturnInMergeTarget {
    element: String,
    attribute: String,
    span: Span,
  },
}

impl StylePropsError {
  /// Whether the error aborted the transformation of its element.
  pub fn is_fatal(&self) -> bool {
    matches!(self, StylePropsError::MissingReturnInMergeTarget { .. })
  }

  pub fn span(&self) -> Span {
    match self {
      StylePropsError::MalformedVariantValue { span, .. }
      | StylePropsError::MissingReturnInMergeTarget { span, .. } => *span,
    }
  }
}
