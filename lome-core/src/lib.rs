pub mod clock;
pub mod handoff;
pub mod repository;

pub use clock::{Clock, FixedClock, SystemClock};
pub use handoff::{HandoffLauncher, HandoffWindow};
pub use repository::{Collection, DocumentStore, StoreError, StoredDocument};
