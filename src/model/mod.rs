// Model building and solution extraction

pub mod builder;
pub mod extract;

pub use builder::{BuiltModel, ModelBuilder, VariableLayout};
pub use extract::{SolutionExtractor, DEFAULT_ROUNDING_THRESHOLD};
