pub mod rate_limit;

pub use rate_limit::{contact_rate_limit, session_rate_limit};
