// Line-balancing domain: problem specification, validation, assignment plan

pub mod plan;
pub mod spec;
pub mod validate;

pub use plan::*;
pub use spec::*;
pub use validate::*;
