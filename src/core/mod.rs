pub mod collection;
pub mod comparison_result;
pub mod game;

pub use collection::GameCollection;
pub use comparison_result::{ComparisonReport, ComparisonResult, ComparisonStats};
pub use game::{Game, RawGame};
