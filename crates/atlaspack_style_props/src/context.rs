use swc_core::ecma::ast::{Expr, Ident};

use crate::backend::{access_protocol, AccessProtocol, PassThroughRegistry};
use crate::config::StylePropsConfig;
use crate::utils::ident;

/// State of a single element transformation.
///
/// The configuration is shared by every element of a run, the pass-through
/// registry belongs to the element being transformed and is handed back to
/// the caller once the element is done.
pub struct Context<'a> {
  pub config: &'a StylePropsConfig,
  protocol: &'static dyn AccessProtocol,
  registry: PassThroughRegistry,
  theme: Ident,
}

impl<'a> Context<'a> {
  pub fn new(config: &'a StylePropsConfig) -> Self {
    Context {
      config,
      protocol: access_protocol(config.styling_backend),
      registry: PassThroughRegistry::default(),
      theme: ident(&config.theme_identifier),
    }
  }

  /// Names the theme parameter `theme` instead of the configured identifier.
  pub fn with_theme(self, theme: Ident) -> Self {
    Context { theme, ..self }
  }

  pub fn theme(&self) -> Expr {
    Expr::Ident(self.theme.clone())
  }

  pub fn closes_over_scope(&self) -> bool {
    self.protocol.closes_over_scope()
  }

  pub fn access_key(&mut self, property: &str, value: &Expr, breakpoint: usize) -> Expr {
    self
      .protocol
      .resolve_access_key(property, value, breakpoint, &mut self.registry)
  }

  pub fn into_registry(self) -> PassThroughRegistry {
    self.registry
  }
}
