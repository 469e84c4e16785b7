use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Which outbound primitive a blocked call attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkPrimitive {
    Fetch,
    XhrOpen,
    XhrSend,
    WebSocket,
}

impl NetworkPrimitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkPrimitive::Fetch => "fetch",
            NetworkPrimitive::XhrOpen => "XMLHttpRequest.open",
            NetworkPrimitive::XhrSend => "XMLHttpRequest.send",
            NetworkPrimitive::WebSocket => "WebSocket",
        }
    }
}

/// Error returned to any network call made while the page is locked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkBlocked {
    pub primitive: NetworkPrimitive,
}

impl fmt::Display for NetworkBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} blocked: page is locked", self.primitive.as_str())
    }
}

impl std::error::Error for NetworkBlocked {}

/// Shared locked-flag consulted by the host's network wrappers.
///
/// Single-threaded cooperative page model: `Rc<Cell<bool>>`, cloned into each
/// wrapper at interception time. Locking is one-way for the page lifetime —
/// there is deliberately no `unlock`; recovery goes through a reload, which
/// rebuilds everything from scratch.
#[derive(Clone, Debug, Default)]
pub struct NetworkGate {
    locked: Rc<Cell<bool>>,
}

impl NetworkGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) {
        self.locked.set(true);
    }

    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }

    /// Gate one outbound call: `Err` while locked, `Ok` otherwise.
    pub fn check(&self, primitive: NetworkPrimitive) -> Result<(), NetworkBlocked> {
        if self.locked.get() {
            Err(NetworkBlocked { primitive })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_is_open_until_locked() {
        let gate = NetworkGate::new();
        assert!(gate.check(NetworkPrimitive::Fetch).is_ok());

        gate.lock();
        assert_eq!(
            gate.check(NetworkPrimitive::Fetch),
            Err(NetworkBlocked {
                primitive: NetworkPrimitive::Fetch
            })
        );
        assert!(gate.check(NetworkPrimitive::WebSocket).is_err());
    }

    #[test]
    fn clones_share_the_flag() {
        let gate = NetworkGate::new();
        let wrapper_view = gate.clone();
        gate.lock();
        assert!(wrapper_view.is_locked());
    }

    #[test]
    fn blocked_error_names_the_primitive() {
        let err = NetworkBlocked {
            primitive: NetworkPrimitive::XhrSend,
        };
        assert_eq!(err.to_string(), "XMLHttpRequest.send blocked: page is locked");
    }
}
