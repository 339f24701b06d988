/// A browsing context opened for the messaging deep link.
pub trait HandoffWindow: Send + Sync {
    /// True once the customer (or a popup blocker) has closed it.
    fn is_closed(&self) -> bool;
}

/// Opens the external messaging deep link.
///
/// `None` means the window could not be opened at all (popup blocked).
pub trait HandoffLauncher: Send + Sync {
    fn open(&self, url: &str) -> Option<Box<dyn HandoffWindow>>;
}
