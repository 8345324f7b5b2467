//! Built-in lookup tables for style props.
//!
//! Attribute names resolve to one or more CSS properties (in camelCase, the
//! way css-in-js objects spell them), and each property resolves to the theme
//! namespace its values are looked up in.

use indexmap::IndexMap;

/// Which table family an attribute is resolved through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyMode {
  /// Values are theme keys or raw CSS values.
  Style,
  /// Values only ever index a per-breakpoint theme scale.
  Scale,
}

/// Result of dispatching an attribute name against the tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind<'a> {
  Style(&'static [&'static str]),
  Scale(&'static [&'static str]),
  /// Theme namespace the variant value selects a sub-object from.
  Variant(&'a str),
  PassThrough,
}

/// Classifies an attribute.
///
/// Style props are consulted first, then scale props, then the configured
/// variants. A variant can therefore never shadow a built-in prop.
pub fn classify_attribute<'a>(
  name: &str,
  variants: &'a IndexMap<String, String>,
) -> AttributeKind<'a> {
  if let Some(properties) = resolve_properties(name, PropertyMode::Style) {
    return AttributeKind::Style(properties);
  }

  if let Some(properties) = resolve_properties(name, PropertyMode::Scale) {
    return AttributeKind::Scale(properties);
  }

  match variants.get(name) {
    Some(namespace) => AttributeKind::Variant(namespace.as_str()),
    None => AttributeKind::PassThrough,
  }
}

pub fn resolve_properties(name: &str, mode: PropertyMode) -> Option<&'static [&'static str]> {
  match mode {
    PropertyMode::Style => style_properties(name),
    PropertyMode::Scale => scale_properties(name),
  }
}

pub fn resolve_namespace(property: &str, mode: PropertyMode) -> Option<&'static str> {
  match mode {
    PropertyMode::Style => theme_namespace(property),
    PropertyMode::Scale => scale_namespace(property),
  }
}

fn style_properties(name: &str) -> Option<&'static [&'static str]> {
  let properties: &'static [&'static str] = match name {
    // Space shorthands
    "m" | "margin" => &["margin"],
    "mt" | "marginTop" => &["marginTop"],
    "mr" | "marginRight" => &["marginRight"],
    "mb" | "marginBottom" => &["marginBottom"],
    "ml" | "marginLeft" => &["marginLeft"],
    "mx" | "marginX" => &["marginLeft", "marginRight"],
    "my" | "marginY" => &["marginTop", "marginBottom"],
    "p" | "padding" => &["padding"],
    "pt" | "paddingTop" => &["paddingTop"],
    "pr" | "paddingRight" => &["paddingRight"],
    "pb" | "paddingBottom" => &["paddingBottom"],
    "pl" | "paddingLeft" => &["paddingLeft"],
    "px" | "paddingX" => &["paddingLeft", "paddingRight"],
    "py" | "paddingY" => &["paddingTop", "paddingBottom"],
    "gap" => &["gap"],
    "rowGap" => &["rowGap"],
    "columnGap" => &["columnGap"],

    // Colors
    "color" => &["color"],
    "bg" | "backgroundColor" => &["backgroundColor"],
    "borderColor" => &["borderColor"],
    "outlineColor" => &["outlineColor"],
    "opacity" => &["opacity"],

    // Typography
    "fontFamily" => &["fontFamily"],
    "fontSize" => &["fontSize"],
    "fontWeight" => &["fontWeight"],
    "fontStyle" => &["fontStyle"],
    "lineHeight" => &["lineHeight"],
    "letterSpacing" => &["letterSpacing"],
    "textAlign" => &["textAlign"],
    "textTransform" => &["textTransform"],

    // Layout
    "width" => &["width"],
    "height" => &["height"],
    "minWidth" => &["minWidth"],
    "maxWidth" => &["maxWidth"],
    "minHeight" => &["minHeight"],
    "maxHeight" => &["maxHeight"],
    "size" => &["width", "height"],
    "display" => &["display"],
    "verticalAlign" => &["verticalAlign"],
    "overflow" => &["overflow"],
    "overflowX" => &["overflowX"],
    "overflowY" => &["overflowY"],

    // Flexbox and grid
    "alignItems" => &["alignItems"],
    "alignContent" => &["alignContent"],
    "alignSelf" => &["alignSelf"],
    "justifyItems" => &["justifyItems"],
    "justifyContent" => &["justifyContent"],
    "justifySelf" => &["justifySelf"],
    "flexWrap" => &["flexWrap"],
    "flexDirection" => &["flexDirection"],
    "flex" => &["flex"],
    "flexGrow" => &["flexGrow"],
    "flexShrink" => &["flexShrink"],
    "flexBasis" => &["flexBasis"],
    "order" => &["order"],
    "gridArea" => &["gridArea"],
    "gridColumn" => &["gridColumn"],
    "gridRow" => &["gridRow"],
    "gridAutoFlow" => &["gridAutoFlow"],
    "gridTemplateColumns" => &["gridTemplateColumns"],
    "gridTemplateRows" => &["gridTemplateRows"],

    // Borders and shadows
    "border" => &["border"],
    "borderTop" => &["borderTop"],
    "borderRight" => &["borderRight"],
    "borderBottom" => &["borderBottom"],
    "borderLeft" => &["borderLeft"],
    "borderX" => &["borderLeft", "borderRight"],
    "borderY" => &["borderTop", "borderBottom"],
    "borderWidth" => &["borderWidth"],
    "borderStyle" => &["borderStyle"],
    "borderRadius" => &["borderRadius"],
    "boxShadow" => &["boxShadow"],
    "textShadow" => &["textShadow"],

    // Position
    "position" => &["position"],
    "zIndex" => &["zIndex"],
    "top" => &["top"],
    "right" => &["right"],
    "bottom" => &["bottom"],
    "left" => &["left"],
    _ => return None,
  };

  Some(properties)
}

fn scale_properties(name: &str) -> Option<&'static [&'static str]> {
  let properties: &'static [&'static str] = match name {
    "fontScale" => &["fontSize"],
    "lineScale" => &["lineHeight"],
    "textScale" => &["fontSize", "lineHeight"],
    "mScale" => &["margin"],
    "mxScale" => &["marginLeft", "marginRight"],
    "myScale" => &["marginTop", "marginBottom"],
    "pScale" => &["padding"],
    "pxScale" => &["paddingLeft", "paddingRight"],
    "pyScale" => &["paddingTop", "paddingBottom"],
    "gapScale" => &["gap"],
    "widthScale" => &["width"],
    "heightScale" => &["height"],
    _ => return None,
  };

  Some(properties)
}

fn theme_namespace(property: &str) -> Option<&'static str> {
  let namespace = match property {
    "margin" | "marginTop" | "marginRight" | "marginBottom" | "marginLeft" | "padding"
    | "paddingTop" | "paddingRight" | "paddingBottom" | "paddingLeft" | "gap" | "rowGap"
    | "columnGap" | "top" | "right" | "bottom" | "left" => "space",
    "color" | "backgroundColor" | "borderColor" | "outlineColor" => "colors",
    "fontFamily" => "fonts",
    "fontSize" => "fontSizes",
    "fontWeight" => "fontWeights",
    "lineHeight" => "lineHeights",
    "letterSpacing" => "letterSpacings",
    "border" | "borderTop" | "borderRight" | "borderBottom" | "borderLeft" => "borders",
    "borderWidth" => "borderWidths",
    "borderStyle" => "borderStyles",
    "borderRadius" => "radii",
    "boxShadow" | "textShadow" => "shadows",
    "zIndex" => "zIndices",
    _ => return None,
  };

  Some(namespace)
}

fn scale_namespace(property: &str) -> Option<&'static str> {
  let namespace = match property {
    "fontSize" => "fontScales",
    "lineHeight" => "lineScales",
    "margin" | "marginTop" | "marginRight" | "marginBottom" | "marginLeft" | "padding"
    | "paddingTop" | "paddingRight" | "paddingBottom" | "paddingLeft" | "gap" => "spaceScales",
    "width" | "height" => "sizeScales",
    _ => return None,
  };

  Some(namespace)
}
