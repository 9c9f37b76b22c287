//! Source-side collaborators: positions, function extents and file lookup.

mod functions;
mod position;
mod resolve;

pub use functions::{extract_functions, FunctionExtent, GoFunctions};
pub use position::{LineMap, Position};
pub use resolve::{parse_module_path, GoModule, ModuleResolver, SourceResolver};
