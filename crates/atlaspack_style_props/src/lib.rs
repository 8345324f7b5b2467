//! Compile time transformation of themed JSX style props.
//!
//! Attributes such as `color="primary"`, `width={["100%", "50%"]}` or a
//! configured variant like `boxStyle="primary"` are removed from the element
//! and folded into a single style function on its style attribute, resolving
//! every value against the runtime theme:
//!
//! ```jsx
//! <Box color="primary" width={["100%", "50%"]} />
//! // with breakpoints ["40rem"]
//! <Box css={(theme) => ({
//!   color: theme.colors.primary ?? "primary",
//!   width: "100%",
//!   "@media (min-width: 40rem)": { width: "50%" },
//! })} />
//! ```
//!
//! Nothing is evaluated at transform time. A style declaration already on the
//! element is merged into the generated one.

pub mod backend;
pub mod config;
mod context;
pub mod errors;
pub mod merge;
mod rename;
mod responsive;
pub mod tables;
mod theme_expr;
mod utils;
mod value;
mod variant;
mod visitor;

#[cfg(test)]
mod test_utils;

pub use backend::{PassThroughRegistry, SURFACED_PROPS_IDENTIFIER_NAME};
pub use config::{StylePropsConfig, StylingBackend};
pub use errors::StylePropsError;
pub use merge::DeclarationMerger;
pub use visitor::{style_props_visitor, StylePropsVisitor, SurfacedProps};
