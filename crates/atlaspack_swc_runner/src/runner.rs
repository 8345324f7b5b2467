use std::string::FromUtf8Error;

use swc_core::common::input::StringInput;
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, Globals, Mark, SourceMap, GLOBALS};
use swc_core::ecma::ast::Module;
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::codegen::Emitter;
use swc_core::ecma::parser::lexer::Lexer;
use swc_core::ecma::parser::{EsSyntax, Parser, Syntax};
use swc_core::ecma::transforms::base::resolver;
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

pub struct RunContext {
  /// Source-map in use
  pub source_map: Lrc<SourceMap>,
  /// Global mark from SWC resolver
  pub global_mark: Mark,
  /// Unresolved mark from SWC resolver
  pub unresolved_mark: Mark,
}

pub struct RunVisitResult<V> {
  pub output_code: String,
  pub visitor: V,
}

#[derive(Debug, thiserror::Error)]
pub enum RunWithTransformationError {
  #[error("Failed to parse module")]
  SwcParse(swc_core::ecma::parser::error::Error),
  #[error("IO Error: {0}")]
  IoError(#[from] std::io::Error),
  #[error("Invalid utf-8 output: {0}")]
  InvalidUtf8Output(#[from] FromUtf8Error),
}

/// Runner of SWC transformations over JSX modules
///
/// * Parse `code` with SWC
/// * Run the resolver, then a visitor over it
/// * Print the module
///
pub fn run_visit<V: VisitMut>(
  code: &str,
  make_visit: impl FnOnce(RunContext) -> V,
) -> Result<RunVisitResult<V>, RunWithTransformationError> {
  let source_map = Lrc::new(SourceMap::default());
  let source_file = source_map.new_source_file(Lrc::new(FileName::Anon), code.into());

  let lexer = Lexer::new(
    Syntax::Es(EsSyntax {
      jsx: true,
      ..Default::default()
    }),
    Default::default(),
    StringInput::from(&*source_file),
    None,
  );

  let mut parser = Parser::new_from(lexer);
  let mut module = parser
    .parse_module()
    .map_err(RunWithTransformationError::SwcParse)?;

  GLOBALS.set(
    &Globals::new(),
    || -> Result<RunVisitResult<V>, RunWithTransformationError> {
      let global_mark = Mark::new();
      let unresolved_mark = Mark::new();
      module.visit_mut_with(&mut resolver(unresolved_mark, global_mark, false));

      let mut visitor = make_visit(RunContext {
        source_map: source_map.clone(),
        global_mark,
        unresolved_mark,
      });
      module.visit_mut_with(&mut visitor);

      Ok(RunVisitResult {
        output_code: emit(source_map.clone(), &module)?,
        visitor,
      })
    },
  )
}

fn emit(source_map: Lrc<SourceMap>, module: &Module) -> Result<String, RunWithTransformationError> {
  let mut output_buffer = vec![];
  let mut emitter = Emitter {
    cfg: Default::default(),
    cm: source_map.clone(),
    comments: None,
    wr: JsWriter::new(source_map, "\n", &mut output_buffer, None),
  };
  emitter.emit_module(module)?;

  Ok(String::from_utf8(output_buffer)?)
}
