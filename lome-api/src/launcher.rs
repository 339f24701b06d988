use lome_core::{HandoffLauncher, HandoffWindow};
use tracing::debug;

/// The browser opens the deep link returned in the response, so from the
/// server's side the window is always considered open.
pub struct ClientLauncher;

struct ClientWindow;

impl HandoffWindow for ClientWindow {
    fn is_closed(&self) -> bool {
        false
    }
}

impl HandoffLauncher for ClientLauncher {
    fn open(&self, url: &str) -> Option<Box<dyn HandoffWindow>> {
        debug!(url, "handing deep link to client");
        Some(Box::new(ClientWindow))
    }
}
