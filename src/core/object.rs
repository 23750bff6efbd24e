//! The capability the engine needs from a host entity.

/// A business entity whose lifecycle is driven by a machine.
///
/// The engine only ever reads and writes the status string. Guards and
/// actions receive the host's concrete type and may read any other field
/// through it.
///
/// # Example
///
/// ```rust
/// use workflow_fsm::core::Object;
///
/// struct Invoice {
///     status: String,
///     amount: u64,
/// }
///
/// impl Object for Invoice {
///     fn status(&self) -> &str {
///         &self.status
///     }
///
///     fn set_status(&mut self, status: &str) {
///         self.status = status.to_string();
///     }
/// }
///
/// let mut invoice = Invoice { status: "draft".into(), amount: 10 };
/// invoice.set_status("sent");
/// assert_eq!(invoice.status(), "sent");
/// ```
pub trait Object: Send + Sync {
    /// Current status, expected to name a declared state.
    fn status(&self) -> &str;

    /// Overwrite the status.
    fn set_status(&mut self, status: &str);
}
