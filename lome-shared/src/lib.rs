pub mod dates;
pub mod money;
pub mod pii;
pub mod site;

pub use dates::DateError;
pub use money::format_ars;
pub use pii::Masked;
pub use site::{SiteContext, SoundCue, Theme};
