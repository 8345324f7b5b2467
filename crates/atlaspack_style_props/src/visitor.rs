use std::collections::HashSet;

use swc_core::common::{Span, DUMMY_SP};
use swc_core::ecma::ast::{
  Expr, Ident, IdentName, JSXAttr, JSXAttrName, JSXAttrOrSpread, JSXAttrValue, JSXExpr,
  JSXExprContainer, JSXOpeningElement, Pass,
};
use swc_core::ecma::visit::{visit_mut_pass, VisitMut, VisitMutWith, VisitWith};

use crate::backend::PassThroughRegistry;
use crate::config::StylePropsConfig;
use crate::context::Context;
use crate::errors::StylePropsError;
use crate::merge::{adopted_param, DeclarationMerger, MergeError};
use crate::rename::{fresh_name, IdentCollector};
use crate::responsive::{expand_attribute, ResponsiveBuckets};
use crate::tables::{classify_attribute, AttributeKind, PropertyMode};
use crate::utils::{element_name, ident};
use crate::value::{attribute_value_expr, classify_value};
use crate::variant::{spread_variant, VariantSpread};

/// Values an element surfaces through `__styleProps` when the surfaced props
/// backend is selected. The wrapper generation has to attach them to the
/// emitted component.
#[derive(Debug)]
pub struct SurfacedProps {
  pub element: String,
  pub span: Span,
  pub registry: PassThroughRegistry,
}

/// Rewrites the style props of every JSX element into a single themed style
/// declaration.
///
/// ```jsx
/// <Box mt={0} color="primary" id="card" />
/// ```
///
/// becomes
///
/// ```jsx
/// <Box id="card" css={(theme) => ({ marginTop: 0, color: theme.colors.primary ?? "primary" })} />
/// ```
///
/// Errors do not abort the run. They are pushed to `errors`, and an element
/// whose declaration could not be merged is left untouched. Elements that
/// surface values through `__styleProps` are pushed to `surfaced_props`.
pub struct StylePropsVisitor<'a> {
  config: StylePropsConfig,
  errors: &'a mut Vec<StylePropsError>,
  surfaced_props: &'a mut Vec<SurfacedProps>,
}

impl<'a> StylePropsVisitor<'a> {
  pub fn new(
    config: StylePropsConfig,
    errors: &'a mut Vec<StylePropsError>,
    surfaced_props: &'a mut Vec<SurfacedProps>,
  ) -> Self {
    StylePropsVisitor {
      config,
      errors,
      surfaced_props,
    }
  }
}

pub fn style_props_visitor<'a>(
  config: StylePropsConfig,
  errors: &'a mut Vec<StylePropsError>,
  surfaced_props: &'a mut Vec<SurfacedProps>,
) -> impl Pass + VisitMut + 'a {
  visit_mut_pass(StylePropsVisitor::new(config, errors, surfaced_props))
}

impl VisitMut for StylePropsVisitor<'_> {
  fn visit_mut_jsx_opening_element(&mut self, element: &mut JSXOpeningElement) {
    element.visit_mut_children_with(self);

    match transform_element(element, &self.config) {
      Ok(ElementOutcome { errors, registry }) => {
        self.errors.extend(errors);

        if !registry.is_empty() {
          self.surfaced_props.push(SurfacedProps {
            element: element_name(&element.name),
            span: element.span,
            registry,
          });
        }
      }
      Err(error) => {
        tracing::error!("{}", error);
        self.errors.push(error);
      }
    }
  }
}

struct ElementOutcome {
  /// Errors that did not prevent the element from being rewritten.
  errors: Vec<StylePropsError>,
  registry: PassThroughRegistry,
}

/// Transforms the style props of one element.
///
/// The element is only modified once the final declaration has been built,
/// so an error leaves it exactly as it was.
#[tracing::instrument(level = "debug", skip_all)]
fn transform_element(
  element: &mut JSXOpeningElement,
  config: &StylePropsConfig,
) -> Result<ElementOutcome, StylePropsError> {
  let style_attribute = element
    .attrs
    .iter()
    .rposition(|attr| is_named(attr, &config.style_attribute));
  let existing = style_attribute.and_then(|index| match &element.attrs[index] {
    JSXAttrOrSpread::JSXAttr(attr) => attribute_value_expr(&attr.value),
    JSXAttrOrSpread::SpreadElement(_) => None,
  });
  let theme = theme_ident(element, existing.as_ref(), config);

  let mut ctx = Context::new(config).with_theme(theme.clone());
  let mut buckets = ResponsiveBuckets::new(config.bucket_count());
  let mut consumed = HashSet::new();
  let mut errors = Vec::new();

  for (index, attr) in element.attrs.iter().enumerate() {
    let JSXAttrOrSpread::JSXAttr(attr) = attr else {
      continue;
    };
    let JSXAttrName::Ident(name) = &attr.name else {
      continue;
    };

    if *name.sym == *config.style_attribute {
      continue;
    }

    let kind = classify_attribute(&name.sym, &config.variants);
    tracing::trace!("Classified {} as {:?}", name.sym, kind);

    if kind == AttributeKind::PassThrough {
      continue;
    }
    let Some(value) = attribute_value_expr(&attr.value) else {
      continue;
    };

    match kind {
      AttributeKind::Style(properties) => expand_attribute(
        &mut ctx,
        &mut buckets,
        properties,
        PropertyMode::Style,
        &classify_value(&value),
      ),
      AttributeKind::Scale(properties) => expand_attribute(
        &mut ctx,
        &mut buckets,
        properties,
        PropertyMode::Scale,
        &classify_value(&value),
      ),
      AttributeKind::Variant(namespace) => match spread_variant(&ctx, namespace, &value) {
        VariantSpread::Spread(declaration) => buckets.push(0, declaration),
        VariantSpread::Skip => {}
        VariantSpread::Malformed => {
          let error = StylePropsError::MalformedVariantValue {
            element: element_name(&element.name),
            attribute: name.sym.to_string(),
            span: attr.span,
          };
          tracing::warn!("{}", error);
          errors.push(error);
          continue;
        }
      },
      AttributeKind::PassThrough => continue,
    }

    consumed.insert(index);
  }

  if consumed.is_empty() {
    return Ok(ElementOutcome {
      errors,
      registry: ctx.into_registry(),
    });
  }

  let filled_buckets = (0..config.bucket_count())
    .filter(|breakpoint| !buckets.bucket(*breakpoint).is_empty())
    .count();
  let is_empty = buckets.is_empty();
  let generated = buckets.flatten(&config.breakpoints);

  let declaration = if is_empty {
    None
  } else {
    let mut merger = DeclarationMerger::new();
    merger.extend(generated);

    let merged = merger
      .merge(existing.as_ref(), &theme)
      .map_err(|error| match error {
        MergeError::MissingReturn { span } => StylePropsError::MissingReturnInMergeTarget {
          element: element_name(&element.name),
          attribute: config.style_attribute.clone(),
          span,
        },
      })?;

    Some(JSXAttrValue::JSXExprContainer(JSXExprContainer {
      span: DUMMY_SP,
      expr: JSXExpr::Expr(Box::new(merged)),
    }))
  };

  tracing::debug!(
    "Rewrote {} style props of <{}> into {} breakpoint buckets",
    consumed.len(),
    element_name(&element.name),
    filled_buckets,
  );

  let attrs = std::mem::take(&mut element.attrs);
  element.attrs = attrs
    .into_iter()
    .enumerate()
    .filter(|(index, _)| !consumed.contains(index))
    .map(|(index, attr)| match (attr, &declaration) {
      (JSXAttrOrSpread::JSXAttr(mut attr), Some(value)) if Some(index) == style_attribute => {
        attr.value = Some(value.clone());
        JSXAttrOrSpread::JSXAttr(attr)
      }
      (attr, _) => attr,
    })
    .collect();

  if let (None, Some(value)) = (style_attribute, declaration) {
    element.attrs.push(JSXAttrOrSpread::JSXAttr(JSXAttr {
      span: DUMMY_SP,
      name: JSXAttrName::Ident(IdentName::new(
        config.style_attribute.as_str().into(),
        DUMMY_SP,
      )),
      value: Some(value),
    }));
  }

  Ok(ElementOutcome {
    errors,
    registry: ctx.into_registry(),
  })
}

fn is_named(attr: &JSXAttrOrSpread, name: &str) -> bool {
  matches!(
    attr,
    JSXAttrOrSpread::JSXAttr(JSXAttr { name: JSXAttrName::Ident(ident), .. }) if *ident.sym == *name
  )
}

/// The theme parameter of an element's style function.
///
/// The configured identifier is used unless an attribute value of the element
/// mentions the same name, which the parameter would shadow. The parameter of
/// an existing style function is the one exception, since the theme is
/// adopted through it.
fn theme_ident(
  element: &JSXOpeningElement,
  existing: Option<&Expr>,
  config: &StylePropsConfig,
) -> Ident {
  let mut collector = IdentCollector::default();
  for attr in &element.attrs {
    attr.visit_with(&mut collector);
  }

  let adopted = existing.and_then(adopted_param);
  let taken = collector.names_except(adopted.as_ref());
  let name = fresh_name(&config.theme_identifier, &taken);
  if name != config.theme_identifier {
    tracing::debug!(
      "Naming the theme parameter of <{}> {} to avoid shadowing",
      element_name(&element.name),
      name
    );
  }

  ident(&name)
}

#[cfg(test)]
mod tests {
  use atlaspack_swc_runner::test_utils::run_test_visit;
  use indexmap::IndexMap;
  use indoc::indoc;
  use pretty_assertions::assert_eq;
  use tracing_test::traced_test;

  use super::*;
  use crate::config::StylingBackend;
  use crate::test_utils::{emit_expr, print, print_expr, transform};

  fn config(breakpoints: &[&str]) -> StylePropsConfig {
    StylePropsConfig {
      breakpoints: breakpoints.iter().map(|b| b.to_string()).collect(),
      variants: IndexMap::from([("boxStyle".to_string(), "boxStyles".to_string())]),
      ..Default::default()
    }
  }

  #[test]
  fn test_literal_props_resolve_through_the_theme() {
    let (output, reported) = transform(
      r#"<Box mt={0} color="primary" id="card" />;"#,
      config(&[]),
    );

    assert_eq!(
      output,
      print(
        r#"<Box id="card" css={(theme) => ({ marginTop: 0, color: theme.colors.primary ?? "primary" })} />;"#
      )
    );
    assert!(reported.errors.is_empty());
    assert!(reported.surfaced_props.is_empty());
  }

  #[test]
  fn test_responsive_array() {
    let (output, _) = transform(r#"<Box width={["100%", "50%"]} />;"#, config(&["40rem"]));

    assert_eq!(
      output,
      print(indoc! {r#"
        <Box css={(theme) => ({
          width: "100%",
          "@media (min-width: 40rem)": { width: "50%" }
        })} />;
      "#})
    );
  }

  #[test]
  fn test_negated_value() {
    let (output, _) = transform(r#"<Box mr="-large" />;"#, config(&[]));

    assert_eq!(
      output,
      print(r#"<Box css={(theme) => ({ marginRight: "-" + (theme.space.large ?? "large") })} />;"#)
    );
  }

  #[test]
  fn test_variant_spreads_theme_sub_object() {
    let (output, _) = transform(r#"<Box boxStyle="primary" />;"#, config(&[]));

    assert_eq!(
      output,
      print(r#"<Box css={(theme) => ({ ...theme.boxStyles.primary })} />;"#)
    );
  }

  #[test]
  fn test_unrelated_attributes_are_kept_in_place() {
    let (output, _) = transform(
      r#"<Box {...rest} onClick={handle} px={3} data-id="a" hidden />;"#,
      config(&[]),
    );

    assert_eq!(
      output,
      print(indoc! {r#"
        <Box {...rest} onClick={handle} data-id="a" hidden css={(theme) => ({
          paddingLeft: theme.space[3] ?? 3,
          paddingRight: theme.space[3] ?? 3
        })} />;
      "#})
    );
  }

  #[test]
  fn test_elements_without_style_props_are_untouched() {
    let code = r#"<Box id="card" css={{ display: "flex" }}><span title="x" /></Box>;"#;
    let (output, reported) = transform(code, config(&[]));

    assert_eq!(output, print(code));
    assert!(reported.errors.is_empty());
  }

  #[test]
  fn test_null_props_are_consumed_without_declarations() {
    let (output, _) = transform(r#"<Box color={null} bg={undefined} id="a" />;"#, config(&[]));

    assert_eq!(output, print(r#"<Box id="a" />;"#));
  }

  #[test]
  fn test_nested_elements_are_transformed() {
    let (output, _) = transform(
      r#"<Box color="primary"><Text color="muted">hi</Text></Box>;"#,
      config(&[]),
    );

    assert_eq!(
      output,
      print(indoc! {r#"
        <Box css={(theme) => ({ color: theme.colors.primary ?? "primary" })}><Text css={(theme) => ({
          color: theme.colors.muted ?? "muted"
        })}>hi</Text></Box>;
      "#})
    );
  }

  #[test]
  fn test_existing_object_is_merged_in_place() {
    let (output, _) = transform(
      r#"<Box css={{ display: "flex" }} id="a" color="primary" />;"#,
      config(&[]),
    );

    assert_eq!(
      output,
      print(
        r#"<Box css={(theme) => ({ color: theme.colors.primary ?? "primary", display: "flex" })} id="a" />;"#
      )
    );
  }

  #[test]
  fn test_existing_function_is_merged() {
    let (output, _) = transform(
      indoc! {r#"
        <Box
          color="primary"
          css={({ colors }) => {
            const border = colors.border;
            return { border };
          }}
        />;
      "#},
      config(&[]),
    );

    assert_eq!(
      output,
      print(indoc! {r#"
        <Box css={(theme) => {
          const { colors } = theme;
          const border = colors.border;
          return { color: theme.colors.primary ?? "primary", border };
        }} />;
      "#})
    );
  }

  #[test]
  fn test_configured_theme_identifier_and_attribute() {
    let config = StylePropsConfig {
      theme_identifier: "t".to_string(),
      style_attribute: "sx".to_string(),
      ..Default::default()
    };
    let (output, _) = transform(r#"<Box bg="muted" sx={{ display: "flex" }} />;"#, config);

    assert_eq!(
      output,
      print(r#"<Box sx={(t) => ({ backgroundColor: t.colors.muted ?? "muted", display: "flex" })} />;"#)
    );
  }

  #[test]
  fn test_conditional_values_are_distributed() {
    let (output, _) = transform(
      r#"<Box color={active ? "primary" : null} />;"#,
      config(&[]),
    );

    assert_eq!(
      output,
      print(
        r#"<Box css={(theme) => ({ color: active ? theme.colors.primary ?? "primary" : null })} />;"#
      )
    );
  }

  #[test]
  fn test_scale_props_resolve_per_breakpoint() {
    let (output, _) = transform(r#"<Text fontScale="body" />;"#, config(&["40rem"]));

    assert_eq!(
      output,
      print(indoc! {r#"
        <Text css={(theme) => ({
          fontSize: theme.fontScales.body[0],
          "@media (min-width: 40rem)": { fontSize: theme.fontScales.body[1] }
        })} />;
      "#})
    );
  }

  #[test]
  fn test_surfaced_props_backend() {
    let config = StylePropsConfig {
      styling_backend: StylingBackend::SurfacedProps,
      ..config(&["40rem"])
    };
    let (output, reported) = transform(r#"<Box color={tone} width={[size, "50%"]} />;"#, config);

    assert_eq!(
      output,
      print(indoc! {r#"
        <Box css={(theme) => ({
          color: theme.colors[__styleProps.color[0]] ?? __styleProps.color[0],
          width: __styleProps.width[0],
          "@media (min-width: 40rem)": { width: "50%" }
        })} />;
      "#})
    );

    let [surfaced] = reported.surfaced_props.as_slice() else {
      panic!("expected one surfaced element");
    };
    assert_eq!(surfaced.element, "Box");
    assert_eq!(
      emit_expr(&surfaced.registry.to_object_lit().into()),
      print_expr("{ color: [tone], width: [size] }")
    );
  }

  #[test]
  #[traced_test]
  fn test_malformed_variant_stays_on_the_element() {
    let (output, reported) = transform(
      r#"<Box boxStyle={kind} color="primary" />;"#,
      config(&[]),
    );

    assert_eq!(
      output,
      print(r#"<Box boxStyle={kind} css={(theme) => ({ color: theme.colors.primary ?? "primary" })} />;"#)
    );
    assert_eq!(
      reported
        .errors
        .iter()
        .map(|error| (error.to_string(), error.is_fatal()))
        .collect::<Vec<_>>(),
      vec![(
        "<Box>: the value of variant `boxStyle` must be a string literal".to_string(),
        false
      )]
    );
    assert!(logs_contain("must be a string literal"));
  }

  #[test]
  #[traced_test]
  fn test_failed_merge_leaves_the_element_untouched() {
    let code = indoc! {r#"
      <Box color="primary" css={(theme) => {
        const color = theme.colors.text;
      }} />;
    "#};
    let (output, reported) = transform(code, config(&[]));

    assert_eq!(output, print(code));
    assert_eq!(reported.errors.len(), 1);
    assert!(reported.errors[0].is_fatal());
    assert!(logs_contain("has no return statement"));
  }

  #[test]
  fn test_theme_parameter_avoids_shadowing_render_scope_bindings() {
    let (output, _) = transform(
      indoc! {r#"
        function Card() {
          const theme = useTheme();
          return <Box color={theme.brand} />;
        }
      "#},
      config(&[]),
    );

    assert_eq!(
      output,
      print(indoc! {r#"
        function Card() {
          const theme = useTheme();
          return <Box css={(theme1) => ({ color: theme1.colors[theme.brand] ?? theme.brand })} />;
        }
      "#})
    );
  }

  #[test]
  fn test_theme_parameter_avoids_bindings_of_the_existing_function() {
    let (output, _) = transform(
      r#"<Box color="primary" css={(t) => { const theme = 1; return { a: t.x, b: theme }; }} />;"#,
      config(&[]),
    );

    assert_eq!(
      output,
      print(indoc! {r#"
        <Box css={(theme1) => {
          const theme = 1;
          return { color: theme1.colors.primary ?? "primary", a: theme1.x, b: theme };
        }} />;
      "#})
    );
  }

  #[test]
  fn test_existing_theme_parameter_keeps_its_name() {
    let (output, _) = transform(
      r#"<Box color="primary" css={(theme) => ({ border: theme.colors.border })} />;"#,
      config(&[]),
    );

    assert_eq!(
      output,
      print(
        r#"<Box css={(theme) => ({ color: theme.colors.primary ?? "primary", border: theme.colors.border })} />;"#
      )
    );
  }

  #[test]
  fn test_every_return_of_an_existing_function_is_merged() {
    let (output, _) = transform(
      r#"<Box color="primary" css={(t) => { if (t.dark) return { bg: "black" }; return { bg: "white" }; }} />;"#,
      config(&[]),
    );

    assert_eq!(
      output,
      print(indoc! {r#"
        <Box css={(theme) => {
          if (theme.dark) return { color: theme.colors.primary ?? "primary", bg: "black" };
          return { color: theme.colors.primary ?? "primary", bg: "white" };
        }} />;
      "#})
    );
  }

  #[test]
  fn test_pass_reports_errors_and_surfaced_props() {
    let mut errors = Vec::new();
    let mut surfaced_props = Vec::new();
    let config = StylePropsConfig {
      styling_backend: StylingBackend::SurfacedProps,
      ..config(&[])
    };

    let output_code = run_test_visit(
      indoc! {r#"
        <Card color={tone} css={() => { const x = 1; }} />;
        <Box color={tone} />;
      "#},
      |_| style_props_visitor(config, &mut errors, &mut surfaced_props),
    )
    .output_code;

    assert_eq!(
      output_code,
      print(indoc! {r#"
        <Card color={tone} css={() => { const x = 1; }} />;
        <Box css={(theme) => ({
          color: theme.colors[__styleProps.color[0]] ?? __styleProps.color[0]
        })} />;
      "#})
    );
    assert_eq!(
      errors
        .iter()
        .map(|error| (error.to_string(), error.is_fatal()))
        .collect::<Vec<_>>(),
      vec![(
        "<Card>: the existing `css` function has no return statement".to_string(),
        true
      )]
    );
    assert_eq!(
      surfaced_props
        .iter()
        .map(|surfaced| surfaced.element.as_str())
        .collect::<Vec<_>>(),
      vec!["Box"]
    );
  }
}
