mod answer;
mod context;
mod embedding;
mod prompt;
mod query;

pub use answer::*;
pub use context::*;
pub use embedding::*;
pub use prompt::*;
pub use query::*;
