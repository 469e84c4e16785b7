use crate::WindowMetrics;

/// Read-only view of the hosting page environment.
///
/// Every accessor returns `Option`: `None` means the capability does not
/// exist in this host. A probe reading through a `None` capability degrades
/// to a clear signal; it never errors and never touches the page.
///
/// The two `*_pause_ms` accessors are the timing probes themselves: the host
/// executes the probe (a synchronous debugger-yield, or a console write) and
/// reports the observed wall-clock pause. The anomaly only exists while the
/// probe runs, which is why these are methods and not cached values.
pub trait PageEnv {
    /// Current window geometry.
    fn window_metrics(&self) -> Option<WindowMetrics>;

    /// Run the debugger-yield probe and report the observed pause.
    fn debugger_pause_ms(&mut self) -> Option<u64>;

    /// Run the console-write probe and report the observed pause.
    fn console_pause_ms(&mut self) -> Option<u64>;

    /// Name from the privileged extension-manifest API, where that API
    /// exists. Unavailable in most browsers; `None` is the normal case.
    fn extension_manifest_name(&self) -> Option<String>;

    /// `true` when the host can deliver DOM mutation records.
    fn mutation_observer_supported(&self) -> bool;
}
