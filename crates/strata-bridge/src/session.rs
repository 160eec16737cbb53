use std::sync::atomic::{AtomicBool, Ordering};
use strata_types::{ProtocolVersion, VersionName};

/// Version facts for one client connection, fixed at login.
#[derive(Debug)]
pub struct Session {
    protocol: ProtocolVersion,
    version: Option<VersionName>,
    version_label: String,
    client_label: String,
    limited: bool,
    mismatch_reported: AtomicBool,
}

impl Session {
    pub(crate) fn new(
        protocol: ProtocolVersion,
        version: Option<VersionName>,
        version_label: String,
        client_label: String,
        limited: bool,
    ) -> Self {
        Self {
            protocol,
            version,
            version_label,
            client_label,
            limited,
            mismatch_reported: AtomicBool::new(false),
        }
    }

    pub fn protocol(&self) -> ProtocolVersion {
        self.protocol
    }

    /// Release resolved at login, or `None` when the protocol identifier is
    /// unknown and policy admitted the client anyway.
    pub fn version(&self) -> Option<&VersionName> {
        self.version.as_ref()
    }

    /// Display label for log lines and metrics; always present, even for
    /// unknown protocols.
    pub fn version_label(&self) -> &str {
        &self.version_label
    }

    /// Whatever the client reported about itself during login.
    pub fn client_label(&self) -> &str {
        &self.client_label
    }

    /// True when the login policy admitted this session despite an
    /// unsupported revision.
    pub fn is_limited(&self) -> bool {
        self.limited
    }

    /// True exactly once, so the untranslatable-session warning is logged a
    /// single time per connection.
    pub(crate) fn note_mismatch(&self) -> bool {
        !self.mismatch_reported.swap(true, Ordering::Relaxed)
    }
}

/// Outcome of gating a connecting client.
#[derive(Debug)]
pub enum LoginDecision {
    /// Supported revision: translate normally for this session.
    Allow(Session),
    /// Unsupported revision admitted by policy; where the release is
    /// unknown, packets are forwarded untranslated.
    AllowLimited(Session),
    /// Unsupported revision turned away with a disconnect message.
    Kick { message: String },
}

impl LoginDecision {
    pub fn session(&self) -> Option<&Session> {
        match self {
            LoginDecision::Allow(session) | LoginDecision::AllowLimited(session) => Some(session),
            LoginDecision::Kick { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_reported_once() {
        let session = Session::new(
            ProtocolVersion(9999),
            None,
            "unknown (protocol 9999)".to_string(),
            "1.22.0 / 12345".to_string(),
            true,
        );
        assert!(session.note_mismatch());
        assert!(!session.note_mismatch());
        assert!(!session.note_mismatch());
    }

    #[test]
    fn test_decision_session_accessor() {
        let session = Session::new(
            ProtocolVersion(701),
            Some(VersionName::new(1, 21, 30)),
            "1.21.30".to_string(),
            "client".to_string(),
            false,
        );
        let decision = LoginDecision::Allow(session);
        assert!(decision.session().is_some());
        let kick = LoginDecision::Kick {
            message: "no".to_string(),
        };
        assert!(kick.session().is_none());
    }
}
