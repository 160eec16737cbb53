use crate::cache::{Resolution, RuleCache};
use crate::handlers::{self, HandlerCategory};
use std::sync::Arc;
use strata_mapper::{PacketMapper, RuleKey};
use strata_protocol::BedrockPacket;
use strata_types::{ProtocolVersion, VersionName};
use strata_versions::VersionTable;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum TranslateError {
    /// The canonical server version has no entry in the version table.
    /// This is a deployment mistake caught at construction; translation
    /// itself never fails.
    #[error("server version {0} is not present in the version table")]
    UnknownServerVersion(VersionName),
}

/// Rewrites decoded packets between a client's negotiated release and the
/// server's canonical one.
///
/// Per packet the pipeline is: identity fast path, then the cached
/// resolution for (kind, from, to). The resolution is an exact-pair rule
/// when one is registered, the kind's category handler otherwise, and
/// pass-through when neither exists. Translation never errors; at worst a
/// packet is forwarded untouched.
pub struct Translator {
    table: Arc<VersionTable>,
    mapper: Arc<PacketMapper>,
    server_version: VersionName,
    cache: RuleCache,
}

impl Translator {
    /// Build a translator for `server_version`, which must resolve in the
    /// version table (registry overlay included).
    pub fn new(
        table: Arc<VersionTable>,
        mapper: Arc<PacketMapper>,
        server_version: VersionName,
    ) -> Result<Self, TranslateError> {
        if table.protocol_for(&server_version).is_none() {
            return Err(TranslateError::UnknownServerVersion(server_version));
        }
        Ok(Self {
            table,
            mapper,
            server_version,
            cache: RuleCache::new(),
        })
    }

    pub fn server_version(&self) -> &VersionName {
        &self.server_version
    }

    /// Client → server. A client on the server's own release skips the
    /// pipeline entirely.
    pub fn translate_incoming(
        &self,
        packet: BedrockPacket,
        client_version: &VersionName,
    ) -> BedrockPacket {
        if *client_version == self.server_version {
            return packet;
        }
        self.perform(packet, *client_version, self.server_version)
    }

    /// Server → client. Broadcast fan-out calls this once per recipient;
    /// recipients sharing a release share the cached resolution, never a
    /// translated packet.
    pub fn translate_outgoing(
        &self,
        packet: BedrockPacket,
        target_version: &VersionName,
    ) -> BedrockPacket {
        self.perform(packet, self.server_version, *target_version)
    }

    /// Client → server, keyed by raw protocol identifier. Identifiers the
    /// table does not know degrade to pass-through.
    pub fn translate_incoming_for_protocol(
        &self,
        packet: BedrockPacket,
        protocol: ProtocolVersion,
    ) -> BedrockPacket {
        match self.table.version_name(protocol) {
            Some(version) => self.translate_incoming(packet, &version),
            None => {
                debug!("unknown protocol {protocol}, forwarding packet untranslated");
                packet
            }
        }
    }

    /// Server → client, keyed by raw protocol identifier.
    pub fn translate_outgoing_for_protocol(
        &self,
        packet: BedrockPacket,
        protocol: ProtocolVersion,
    ) -> BedrockPacket {
        match self.table.version_name(protocol) {
            Some(version) => self.translate_outgoing(packet, &version),
            None => {
                debug!("unknown protocol {protocol}, forwarding packet untranslated");
                packet
            }
        }
    }

    /// Drop all cached resolutions. Call after registering rules at
    /// runtime; until then, keys resolved before the registration keep
    /// their old strategy.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of cached (kind, from, to) resolutions.
    pub fn cached_resolutions(&self) -> usize {
        self.cache.len()
    }

    fn perform(
        &self,
        packet: BedrockPacket,
        from: VersionName,
        to: VersionName,
    ) -> BedrockPacket {
        if from == to {
            return packet;
        }
        let Some(kind) = packet.kind() else {
            trace!("unclassifiable packet forwarded untouched");
            return packet;
        };
        let key = RuleKey::new(kind, from, to);
        let resolution = match self.cache.get(&key) {
            Some(resolution) => resolution,
            None => {
                let resolution = self.resolve(&key);
                self.cache.insert(key, resolution.clone());
                resolution
            }
        };
        match resolution {
            Resolution::Rule(rule) => (*rule)(packet),
            Resolution::Category(category) => {
                handlers::apply(category, packet, &from, &to, &self.table)
            }
            Resolution::PassThrough => packet,
        }
    }

    /// Strategy for a key, independent of any packet instance: registered
    /// rule first, category handler second, pass-through last.
    fn resolve(&self, key: &RuleKey) -> Resolution {
        if let Some(rule) = self.mapper.rule_for(key) {
            return Resolution::Rule(rule);
        }
        match HandlerCategory::for_kind(key.kind) {
            Some(category) => Resolution::Category(category),
            None => {
                debug!("no rule or handler for {key}, packets will be forwarded as-is");
                Resolution::PassThrough
            }
        }
    }
}
