pub mod paths;
pub mod visitor;

pub use paths::*;
pub use visitor::*;
