pub mod product;
pub mod pricing;
pub mod games;

pub use product::{CatalogError, DurationClass, Extra, HeadsetModel};
pub use pricing::{rate_for, ExtrasSelection, Rate};
pub use games::{included_games, GameEntry};
