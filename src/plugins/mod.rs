//! Optional behaviour installed with [`Engine::use_plugin`](crate::Engine::use_plugin).

pub mod constraints;
pub mod format;
pub mod parse;
pub mod text_view;

pub use constraints::{Bound, ConstraintOptions, Constraints};
pub use format::{DateFormatter, Format, FormatOptions, TextField};
pub use parse::{DateParser, Parse, ParseOptions};
pub use text_view::{TextSurface, TextView, TextViewOptions};
