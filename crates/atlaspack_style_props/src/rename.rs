use std::collections::HashSet;

use swc_core::atoms::Atom;
use swc_core::ecma::ast::{
  AssignPat, BindingIdent, Expr, Id, Ident, IdentName, KeyValuePatProp, KeyValueProp,
  ObjectPatProp, Pat, Prop, PropName,
};
use swc_core::ecma::visit::{Visit, VisitMut, VisitMutWith};

/// Renames every reference to one binding inside a subtree.
///
/// Bindings are matched by id (symbol and syntax context), so shadowing
/// declarations are left alone once the resolver has run. Object shorthands
/// are expanded to keep their key: `{ t }` becomes `{ t: theme }`.
pub struct IdentRenamer {
  from: Id,
  to: Ident,
}

impl IdentRenamer {
  pub fn new(from: Id, to: Ident) -> Self {
    IdentRenamer { from, to }
  }

  fn matches(&self, ident: &Ident) -> bool {
    ident.sym == self.from.0 && ident.ctxt == self.from.1
  }
}

impl VisitMut for IdentRenamer {
  fn visit_mut_ident(&mut self, ident: &mut Ident) {
    if self.matches(ident) {
      ident.sym = self.to.sym.clone();
      ident.ctxt = self.to.ctxt;
    }
  }

  fn visit_mut_prop(&mut self, prop: &mut Prop) {
    if let Prop::Shorthand(ident) = prop {
      if self.matches(ident) {
        *prop = Prop::KeyValue(KeyValueProp {
          key: PropName::Ident(IdentName::new(ident.sym.clone(), ident.span)),
          value: Box::new(Expr::Ident(self.to.clone())),
        });
        return;
      }
    }

    prop.visit_mut_children_with(self);
  }

  fn visit_mut_object_pat_prop(&mut self, prop: &mut ObjectPatProp) {
    if let ObjectPatProp::Assign(assign) = prop {
      if self.matches(&assign.key.id) {
        let target = Pat::Ident(BindingIdent::from(self.to.clone()));
        let mut value = match assign.value.take() {
          Some(default) => Pat::Assign(AssignPat {
            span: assign.span,
            left: Box::new(target),
            right: default,
          }),
          None => target,
        };
        value.visit_mut_children_with(self);

        *prop = ObjectPatProp::KeyValue(KeyValuePatProp {
          key: PropName::Ident(IdentName::new(assign.key.id.sym.clone(), assign.key.id.span)),
          value: Box::new(value),
        });
        return;
      }
    }

    prop.visit_mut_children_with(self);
  }
}

/// Renames the binding `from` to `to` within `node`.
pub fn rename_ident<N>(node: &mut N, from: Id, to: Ident)
where
  N: VisitMutWith<IdentRenamer>,
{
  node.visit_mut_with(&mut IdentRenamer::new(from, to));
}

/// Collects every identifier of a subtree, declarations included.
///
/// Member and property names are not identifiers and are skipped.
#[derive(Debug, Default)]
pub struct IdentCollector {
  ids: HashSet<Id>,
}

impl IdentCollector {
  /// Names of the collected identifiers, leaving out one binding and its
  /// references.
  pub fn names_except(self, except: Option<&Id>) -> HashSet<Atom> {
    self
      .ids
      .into_iter()
      .filter(|id| Some(id) != except)
      .map(|(sym, _)| sym)
      .collect()
  }
}

impl Visit for IdentCollector {
  fn visit_ident(&mut self, ident: &Ident) {
    self.ids.insert(ident.to_id());
  }
}

/// `base` if no name in `taken` is `base`, otherwise the first free of
/// `base1`, `base2`, ...
pub fn fresh_name(base: &str, taken: &HashSet<Atom>) -> String {
  if !taken.contains(&Atom::from(base)) {
    return base.to_string();
  }

  (1..)
    .map(|suffix| format!("{base}{suffix}"))
    .find(|name| !taken.contains(&Atom::from(name.as_str())))
    .unwrap_or_else(|| base.to_string())
}
