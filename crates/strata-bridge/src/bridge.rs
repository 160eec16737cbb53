use crate::config::{BridgeConfig, UnsupportedAction};
use crate::metrics::VersionMetrics;
use crate::session::{LoginDecision, Session};
use std::sync::Arc;
use strata_mapper::PacketMapper;
use strata_protocol::BedrockPacket;
use strata_translate::{TranslateError, Translator};
use strata_types::{ProtocolVersion, VersionName};
use strata_versions::VersionTable;
use tracing::{debug, info, trace, warn};

/// The release this build speaks natively.
pub const CANONICAL_SERVER_VERSION: VersionName = VersionName::new(1, 21, 30);

/// Connector-facing facade: wires the version table, the translator, the
/// login gating policy, and per-version metrics together. The hosting
/// runtime feeds it login events and decoded packets; it never touches
/// sockets or raw frames itself.
pub struct VersionBridge {
    table: Arc<VersionTable>,
    translator: Arc<Translator>,
    config: BridgeConfig,
    metrics: VersionMetrics,
}

impl VersionBridge {
    /// Wire a bridge over shared tables. The only failure is a
    /// `server_version` the table does not know, which is a deployment
    /// mistake surfaced at startup rather than per packet.
    pub fn new(
        table: Arc<VersionTable>,
        mapper: Arc<PacketMapper>,
        server_version: VersionName,
        config: BridgeConfig,
    ) -> Result<Self, TranslateError> {
        let translator = Arc::new(Translator::new(table.clone(), mapper, server_version)?);
        let supported: Vec<String> = table
            .supported_versions()
            .values()
            .map(|v| v.to_string())
            .collect();
        info!(
            "speaking {server_version} natively, supported versions: {}",
            supported.join(", ")
        );
        Ok(Self {
            table,
            translator,
            config,
            metrics: VersionMetrics::new(),
        })
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn metrics(&self) -> &VersionMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn table(&self) -> &VersionTable {
        &self.table
    }

    /// Gate a connecting client; called once per connection at login.
    /// `client_label` is whatever the client reported about itself and is
    /// only used for log lines.
    pub fn handle_login(&self, protocol: ProtocolVersion, client_label: &str) -> LoginDecision {
        info!("client connecting: {client_label}, protocol {protocol}");
        if !self.table.is_protocol_supported(protocol) {
            return self.handle_unsupported(protocol, client_label);
        }
        let label = self.table.version_name_safe(protocol);
        info!("protocol {protocol} mapped to {label}");
        let session = Session::new(
            protocol,
            self.table.version_name(protocol),
            label,
            client_label.to_string(),
            false,
        );
        if self.config.enable_metrics {
            self.metrics.record_join(session.version_label());
        }
        LoginDecision::Allow(session)
    }

    fn handle_unsupported(&self, protocol: ProtocolVersion, client_label: &str) -> LoginDecision {
        match self.config.unsupported_version_action {
            UnsupportedAction::Kick => LoginDecision::Kick {
                message: "Unsupported client version. Please use supported versions.".to_string(),
            },
            UnsupportedAction::Warn => {
                warn!("unsupported protocol {protocol} - allowing connection with limitations");
                self.admit_limited(protocol, client_label)
            }
            UnsupportedAction::Allow => {
                info!("unsupported protocol {protocol} - allowing connection");
                self.admit_limited(protocol, client_label)
            }
        }
    }

    fn admit_limited(&self, protocol: ProtocolVersion, client_label: &str) -> LoginDecision {
        let session = Session::new(
            protocol,
            self.table.version_name(protocol),
            self.table.version_name_safe(protocol),
            client_label.to_string(),
            true,
        );
        if self.config.enable_metrics {
            self.metrics.record_join(session.version_label());
        }
        LoginDecision::AllowLimited(session)
    }

    /// Translate one client → server packet for this session.
    pub fn on_inbound(&self, session: &Session, packet: BedrockPacket) -> BedrockPacket {
        if self.config.log_packets {
            trace_packet("in", session, &packet);
        }
        match session.version() {
            Some(version) => self.translator.translate_incoming(packet, version),
            None => {
                self.report_mismatch(session);
                packet
            }
        }
    }

    /// Translate one server → client packet for this session. Broadcast
    /// fan-out calls this once per recipient; recipients on the same
    /// release share cached strategies through the translator.
    pub fn on_outbound(&self, session: &Session, packet: BedrockPacket) -> BedrockPacket {
        if self.config.log_packets {
            trace_packet("out", session, &packet);
        }
        match session.version() {
            Some(version) => self.translator.translate_outgoing(packet, version),
            None => {
                self.report_mismatch(session);
                packet
            }
        }
    }

    /// Session closed; metrics bookkeeping.
    pub fn handle_disconnect(&self, session: &Session) {
        if self.config.enable_metrics {
            self.metrics.record_leave(session.version_label());
        }
        debug!(
            "session closed: {} ({})",
            session.client_label(),
            session.version_label()
        );
    }

    fn report_mismatch(&self, session: &Session) {
        if session.note_mismatch() {
            warn!(
                "session {} has no resolvable release, forwarding its packets untranslated",
                session.version_label()
            );
        }
    }
}

fn trace_packet(direction: &str, session: &Session, packet: &BedrockPacket) {
    let kind = packet.kind().map(|k| k.name()).unwrap_or("unknown");
    trace!("[{direction}] {kind} for {}", session.version_label());
}
