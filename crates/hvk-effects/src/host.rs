/// Mutable surface of the hosting page.
///
/// Implementations wrap the real document/window (or a test double). The
/// runtime is the only caller; executors never hold a host reference between
/// ticks, so no component other than the controller path can flip the page
/// into its locked rendering.
pub trait PageHost {
    /// Swap the whole body for the restricted view.
    fn replace_body(&mut self, html: &str);

    /// Disable scrolling on the root element and body.
    fn suppress_scroll(&mut self);

    /// Pin history so back-navigation cannot leave the restricted view.
    fn pin_history(&mut self);

    /// Install capturing, default-preventing listeners for `events`.
    fn install_input_suppressors(&mut self, events: &[&str]);

    /// Replace every console method with a no-op behind a non-configurable
    /// property definition, so later code cannot undo the neutering.
    fn neuter_console(&mut self);

    /// Wrap fetch / XHR open+send / the WebSocket constructor so that calls
    /// made while locked reject or throw immediately instead of reaching the
    /// network.
    fn intercept_network(&mut self);

    /// Full navigation reload. The only supported recovery path.
    fn request_reload(&mut self);
}
