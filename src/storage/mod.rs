pub mod options;
pub mod paths;

pub use options::*;
pub use paths::*;
