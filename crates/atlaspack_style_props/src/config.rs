use indexmap::IndexMap;
use serde::Deserialize;

/// Identifier of the theme parameter of generated style functions.
pub const DEFAULT_THEME_IDENTIFIER: &str = "theme";

/// Attribute holding the style declaration consumed by the css-in-js runtime.
pub const DEFAULT_STYLE_ATTRIBUTE: &str = "css";

/// How computed (non-literal) values reach the generated style function.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum StylingBackend {
  /// The style function closes over the render scope, so computed values can
  /// be referenced as they are (emotion's `css` prop).
  #[default]
  #[serde(alias = "emotion")]
  DirectClosure,
  /// The style function runs inside a generated wrapper component and only
  /// sees values passed to it as props (styled-components' `css` prop).
  #[serde(alias = "styledComponents")]
  SurfacedProps,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StylePropsConfig {
  ///
  /// Ordered CSS lengths used as `min-width` boundaries for responsive
  /// array values.
  ///
  /// Defaults to no breakpoints, meaning arrays only contribute their first
  /// element.
  ///
  #[serde(default)]
  pub breakpoints: Vec<String>,
  ///
  /// Attribute names that select a whole theme sub-object, mapped to the
  /// theme namespace they read from, eg. `{ "boxStyle": "boxStyles" }`.
  ///
  #[serde(default)]
  pub variants: IndexMap<String, String>,
  ///
  /// Access protocol of the css-in-js library consuming the output.
  ///
  /// Defaults to `directClosure`
  ///
  #[serde(default)]
  pub styling_backend: StylingBackend,
  ///
  /// Name of the parameter the generated style function receives the theme
  /// through.
  ///
  /// Defaults to `theme`
  ///
  #[serde(default = "default_theme_identifier")]
  pub theme_identifier: String,
  ///
  /// Attribute the final declaration is written to and merged with.
  ///
  /// Defaults to `css`
  ///
  #[serde(default = "default_style_attribute")]
  pub style_attribute: String,
}

fn default_theme_identifier() -> String {
  DEFAULT_THEME_IDENTIFIER.to_string()
}

fn default_style_attribute() -> String {
  DEFAULT_STYLE_ATTRIBUTE.to_string()
}

impl Default for StylePropsConfig {
  fn default() -> Self {
    Self {
      breakpoints: Vec::new(),
      variants: IndexMap::new(),
      styling_backend: StylingBackend::default(),
      theme_identifier: default_theme_identifier(),
      style_attribute: default_style_attribute(),
    }
  }
}

impl StylePropsConfig {
  /// Number of breakpoint buckets, the base bucket included.
  pub fn bucket_count(&self) -> usize {
    self.breakpoints.len() + 1
  }
}
