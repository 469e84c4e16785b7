/// Inputs the hosting layers can carry the privilege flag on.
///
/// Resolution order matches the original templates: a server-injected global
/// is authoritative when present (true or false), then a marker class on the
/// root element, then a persisted local flag. Resolved once at page init;
/// never re-read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrivilegeSignals {
    /// Server-rendered global (e.g. template-injected `isAdmin`).
    pub server_flag: Option<bool>,
    /// Marker class present on the root element.
    pub root_marker: bool,
    /// Locally persisted flag, if the deployment uses one.
    pub persisted_flag: Option<bool>,
}

impl PrivilegeSignals {
    pub fn is_privileged(&self) -> bool {
        if let Some(v) = self.server_flag {
            return v;
        }
        if self.root_marker {
            return true;
        }
        self.persisted_flag.unwrap_or(false)
    }
}
