//! Merging of generated declarations into an existing style declaration.
//!
//! The result is always a style function taking the theme. Generated
//! declarations come first so that declarations the author wrote by hand
//! win when both set the same key.

use swc_core::atoms::Atom;
use swc_core::common::{Span, Spanned, SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::{
  ArrowExpr, BindingIdent, BlockStmt, BlockStmtOrExpr, Class, Decl, Expr, FnExpr, Function,
  GetterProp, Id, Ident, ObjectLit, Param, Pat, PropOrSpread, ReturnStmt, SetterProp, Stmt,
  VarDecl, VarDeclKind, VarDeclarator,
};
use swc_core::ecma::visit::{Visit, VisitMut, VisitMutWith, VisitWith};
use swc_core::quote;

use crate::rename::{rename_ident, IdentCollector};
use crate::utils::{ident, paren, spread};
use crate::value::unwrap_parens;

/// Binding an opaque existing declaration is evaluated into.
pub const EXISTING_STYLE_IDENTIFIER_NAME: &str = "__existingStyle";

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MergeError {
  #[error("the existing style function has no return statement")]
  MissingReturn { span: Span },
}

/// Collects generated declarations and merges them into an existing style
/// declaration.
///
/// Declarations keep the order they were added in, so extending with `a`
/// then `b` merges exactly like extending once with `a ++ b`.
#[derive(Debug, Default)]
pub struct DeclarationMerger {
  generated: Vec<PropOrSpread>,
}

impl DeclarationMerger {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn extend(&mut self, props: impl IntoIterator<Item = PropOrSpread>) -> &mut Self {
    self.generated.extend(props);
    self
  }

  /// Produces the final style function.
  ///
  /// * no existing declaration: `(theme) => ({ ...generated })`
  /// * an object: the object's entries are appended after the generated ones
  /// * a function: its theme parameter is adopted and every object it returns
  ///   gets the generated entries first. When the function itself uses the
  ///   theme's name, it is called with the theme and its result is spread
  ///   instead.
  /// * anything else is evaluated at runtime and spread after the generated
  ///   entries, called with the theme when it turns out to be a function
  ///
  /// `theme` must not be used by the generated entries for anything but the
  /// theme.
  pub fn merge(self, existing: Option<&Expr>, theme: &Ident) -> Result<Expr, MergeError> {
    let generated = self.generated;

    match existing.map(unwrap_parens) {
      None => Ok(style_arrow(theme, generated)),
      Some(Expr::Object(object)) => {
        let mut props = generated;
        props.extend(object.props.iter().cloned());
        Ok(style_arrow(theme, props))
      }
      Some(function @ (Expr::Arrow(_) | Expr::Fn(_))) if uses_name(function, &theme.sym) => {
        merge_call(function.clone(), generated, theme)
      }
      Some(Expr::Arrow(arrow)) => merge_arrow(arrow.clone(), generated, theme),
      Some(Expr::Fn(function)) => merge_fn(function.clone(), generated, theme),
      Some(other) => Ok(merge_opaque(other.clone(), generated, theme)),
    }
  }
}

/// The binding of a style function's first parameter, when it is a plain
/// identifier. The theme is adopted through it.
pub fn adopted_param(existing: &Expr) -> Option<Id> {
  let first = match unwrap_parens(existing) {
    Expr::Arrow(arrow) => arrow.params.first(),
    Expr::Fn(function) => function.function.params.first().map(|param| &param.pat),
    _ => None,
  };

  match first {
    Some(Pat::Ident(binding)) => Some(binding.id.to_id()),
    _ => None,
  }
}

/// Whether `existing` declares or refers to `name` other than through the
/// parameter the theme is adopted through.
fn uses_name(existing: &Expr, name: &Atom) -> bool {
  let mut collector = IdentCollector::default();
  existing.visit_with(&mut collector);
  collector
    .names_except(adopted_param(existing).as_ref())
    .contains(name)
}

fn style_arrow(theme: &Ident, props: Vec<PropOrSpread>) -> Expr {
  Expr::Arrow(ArrowExpr {
    span: DUMMY_SP,
    ctxt: SyntaxContext::empty(),
    params: vec![theme_param(theme)],
    body: Box::new(BlockStmtOrExpr::Expr(Box::new(paren(object(props))))),
    is_async: false,
    is_generator: false,
    type_params: None,
    return_type: None,
  })
}

fn merge_arrow(
  mut arrow: ArrowExpr,
  generated: Vec<PropOrSpread>,
  theme: &Ident,
) -> Result<Expr, MergeError> {
  let (params, body) = merge_function(arrow.params, *arrow.body, arrow.span, generated, theme)?;
  arrow.params = params;
  arrow.body = Box::new(body);
  Ok(Expr::Arrow(arrow))
}

fn merge_fn(
  mut function: FnExpr,
  generated: Vec<PropOrSpread>,
  theme: &Ident,
) -> Result<Expr, MergeError> {
  let span = function.function.span;
  let Some(body) = function.function.body.take() else {
    return Err(MergeError::MissingReturn { span });
  };
  let params = std::mem::take(&mut function.function.params)
    .into_iter()
    .map(|param| param.pat)
    .collect();

  let (params, body) = merge_function(
    params,
    BlockStmtOrExpr::BlockStmt(body),
    span,
    generated,
    theme,
  )?;

  function.function.params = params
    .into_iter()
    .map(|pat| Param {
      span: DUMMY_SP,
      decorators: Vec::new(),
      pat,
    })
    .collect();
  function.function.body = Some(match body {
    BlockStmtOrExpr::BlockStmt(block) => block,
    BlockStmtOrExpr::Expr(expr) => block(vec![return_stmt(*expr)]),
  });

  Ok(Expr::Fn(function))
}

/// Adopts the theme as first parameter and splices the generated
/// declarations into the returned object.
fn merge_function(
  mut params: Vec<Pat>,
  mut body: BlockStmtOrExpr,
  span: Span,
  generated: Vec<PropOrSpread>,
  theme: &Ident,
) -> Result<(Vec<Pat>, BlockStmtOrExpr), MergeError> {
  let mut prelude = Vec::new();

  if params.is_empty() {
    params.push(theme_param(theme));
  } else {
    let first = std::mem::replace(&mut params[0], theme_param(theme));
    match first {
      Pat::Ident(binding) if binding.id.sym == theme.sym => {}
      Pat::Ident(binding) => {
        let from = binding.id.to_id();
        for param in params.iter_mut().skip(1) {
          rename_ident(param, from.clone(), theme.clone());
        }
        rename_ident(&mut body, from, theme.clone());
      }
      Pat::Assign(assign) => prelude.push(const_decl(
        *assign.left,
        quote!(
          "$theme ?? $fallback" as Expr,
          theme: Ident = theme.clone(),
          fallback: Expr = paren(*assign.right),
        ),
      )),
      Pat::Rest(rest) => prelude.push(const_decl(
        *rest.arg,
        quote!("[$theme]" as Expr, theme: Ident = theme.clone()),
      )),
      pattern => prelude.push(const_decl(pattern, Expr::Ident(theme.clone()))),
    }
  }

  let body = match body {
    BlockStmtOrExpr::Expr(expr) => {
      let mut props = generated;
      props.extend(returned_props(*expr));

      if prelude.is_empty() {
        BlockStmtOrExpr::Expr(Box::new(paren(object(props))))
      } else {
        prelude.push(return_stmt(object(props)));
        BlockStmtOrExpr::BlockStmt(block(prelude))
      }
    }
    BlockStmtOrExpr::BlockStmt(mut existing) => {
      let mut splicer = ReturnSplicer {
        generated: &generated,
        returns: 0,
      };
      existing.visit_mut_with(&mut splicer);
      if splicer.returns == 0 {
        return Err(MergeError::MissingReturn { span });
      }

      prelude.append(&mut existing.stmts);
      existing.stmts = prelude;
      BlockStmtOrExpr::BlockStmt(existing)
    }
  };

  Ok((params, body))
}

/// Keeps the existing function as it is and spreads what it returns when
/// called with the theme.
fn merge_call(
  existing: Expr,
  generated: Vec<PropOrSpread>,
  theme: &Ident,
) -> Result<Expr, MergeError> {
  let returns = match &existing {
    Expr::Arrow(arrow) => match &*arrow.body {
      BlockStmtOrExpr::BlockStmt(body) => has_return(body),
      BlockStmtOrExpr::Expr(_) => true,
    },
    Expr::Fn(function) => function.function.body.as_ref().is_some_and(has_return),
    _ => true,
  };
  if !returns {
    return Err(MergeError::MissingReturn {
      span: existing.span(),
    });
  }

  let result = quote!(
    "$style($theme)" as Expr,
    style: Expr = paren(existing),
    theme: Ident = theme.clone(),
  );

  let mut props = generated;
  props.push(spread(result));
  Ok(style_arrow(theme, props))
}

/// Prefixes every object returned by one function body with the generated
/// declarations. A bare `return;` returns the generated declarations alone.
///
/// Nested functions and classes return on their own behalf and are not
/// entered.
struct ReturnSplicer<'a> {
  generated: &'a [PropOrSpread],
  returns: usize,
}

impl VisitMut for ReturnSplicer<'_> {
  fn visit_mut_return_stmt(&mut self, stmt: &mut ReturnStmt) {
    let mut props = self.generated.to_vec();
    if let Some(arg) = stmt.arg.take() {
      props.extend(returned_props(*arg));
    }

    stmt.arg = Some(Box::new(object(props)));
    self.returns += 1;
  }

  fn visit_mut_function(&mut self, _: &mut Function) {}

  fn visit_mut_arrow_expr(&mut self, _: &mut ArrowExpr) {}

  fn visit_mut_class(&mut self, _: &mut Class) {}

  fn visit_mut_getter_prop(&mut self, _: &mut GetterProp) {}

  fn visit_mut_setter_prop(&mut self, _: &mut SetterProp) {}
}

#[derive(Default)]
struct ReturnFinder {
  found: bool,
}

impl Visit for ReturnFinder {
  fn visit_return_stmt(&mut self, _: &ReturnStmt) {
    self.found = true;
  }

  fn visit_function(&mut self, _: &Function) {}

  fn visit_arrow_expr(&mut self, _: &ArrowExpr) {}

  fn visit_class(&mut self, _: &Class) {}

  fn visit_getter_prop(&mut self, _: &GetterProp) {}

  fn visit_setter_prop(&mut self, _: &SetterProp) {}
}

fn has_return(body: &BlockStmt) -> bool {
  let mut finder = ReturnFinder::default();
  body.visit_with(&mut finder);
  finder.found
}

fn merge_opaque(existing: Expr, generated: Vec<PropOrSpread>, theme: &Ident) -> Expr {
  let binding = ident(EXISTING_STYLE_IDENTIFIER_NAME);
  let resolved = quote!(
    "typeof $existing === \"function\" ? $existing($theme) : $existing" as Expr,
    existing: Ident = binding.clone(),
    theme: Ident = theme.clone(),
  );

  let mut props = generated;
  props.push(spread(paren(resolved)));

  Expr::Arrow(ArrowExpr {
    span: DUMMY_SP,
    ctxt: SyntaxContext::empty(),
    params: vec![theme_param(theme)],
    body: Box::new(BlockStmtOrExpr::BlockStmt(block(vec![
      const_decl(Pat::Ident(BindingIdent::from(binding)), existing),
      return_stmt(object(props)),
    ]))),
    is_async: false,
    is_generator: false,
    type_params: None,
    return_type: None,
  })
}

/// Entries contributed by a returned expression: the properties of an
/// object literal, or a spread of anything else.
fn returned_props(expr: Expr) -> Vec<PropOrSpread> {
  match expr {
    Expr::Paren(paren) => returned_props(*paren.expr),
    Expr::Object(object) => object.props,
    expr => vec![spread(expr)],
  }
}

fn theme_param(theme: &Ident) -> Pat {
  Pat::Ident(BindingIdent::from(theme.clone()))
}

fn object(props: Vec<PropOrSpread>) -> Expr {
  Expr::Object(ObjectLit {
    span: DUMMY_SP,
    props,
  })
}

fn block(stmts: Vec<Stmt>) -> BlockStmt {
  BlockStmt {
    span: DUMMY_SP,
    ctxt: SyntaxContext::empty(),
    stmts,
  }
}

fn return_stmt(arg: Expr) -> Stmt {
  Stmt::Return(ReturnStmt {
    span: DUMMY_SP,
    arg: Some(Box::new(arg)),
  })
}

fn const_decl(name: Pat, init: Expr) -> Stmt {
  Stmt::Decl(Decl::Var(Box::new(VarDecl {
    span: DUMMY_SP,
    ctxt: SyntaxContext::empty(),
    kind: VarDeclKind::Const,
    declare: false,
    decls: vec![VarDeclarator {
      span: DUMMY_SP,
      name,
      init: Some(Box::new(init)),
      definite: false,
    }],
  })))
}
