use std::sync::Arc;

use async_trait::async_trait;
use im_proto::OidbPacket;
use reqwest::Url;
use tracing::info;

use crate::client::{SignClient, SignResult};
use crate::config::SignConfig;
use crate::error::SignError;
use crate::whitelist::{CommandWhitelist, SignGate};

/// Source of packet signatures for the send path.
///
/// `None` means "send without a signature", never "abort the send".
#[async_trait]
pub trait SignProvider: Send + Sync {
    async fn sign(&self, command: &str, seq: i32, body: &[u8]) -> Option<SignResult>;
}

/// An outgoing packet paired with whatever signature could be obtained.
#[derive(Debug, Clone)]
pub struct SignedPacket {
    pub packet: OidbPacket,
    pub seq: i32,
    pub sign: Option<SignResult>,
}

impl SignedPacket {
    pub fn is_signed(&self) -> bool {
        self.sign.is_some()
    }
}

/// Sign provider bound to one sign service endpoint.
#[derive(Clone)]
pub struct PacketSigner {
    endpoint: Url,
    client: SignClient,
}

impl PacketSigner {
    pub fn new(config: &SignConfig) -> Result<Self, SignError> {
        let whitelist = if config.extra_commands.is_empty() {
            CommandWhitelist::global()
        } else {
            Arc::new(
                CommandWhitelist::global().with_extra(config.extra_commands.iter().cloned()),
            )
        };
        Self::with_gate(config, SignGate::new(whitelist))
    }

    pub fn with_gate(config: &SignConfig, gate: SignGate) -> Result<Self, SignError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| SignError::InvalidEndpoint(format!("{}: {e}", config.endpoint)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SignError::InvalidEndpoint(format!(
                "{}: unsupported scheme",
                config.endpoint
            )));
        }
        let client = SignClient::new(gate, &config.user_agent)?;
        info!(
            endpoint = %endpoint,
            commands = client.gate().whitelist().len(),
            "packet signer ready"
        );
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn sign(&self, command: &str, seq: i32, body: &[u8]) -> Option<SignResult> {
        self.client
            .fetch_signature(&self.endpoint, command, seq, body)
            .await
    }

    /// Sign `packet` under sequence number `seq` and hand both back.
    pub async fn sign_packet(&self, packet: OidbPacket, seq: i32) -> SignedPacket {
        let sign = self.sign(&packet.command, seq, &packet.data).await;
        SignedPacket { packet, seq, sign }
    }
}

#[async_trait]
impl SignProvider for PacketSigner {
    async fn sign(&self, command: &str, seq: i32, body: &[u8]) -> Option<SignResult> {
        PacketSigner::sign(self, command, seq, body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unusable_endpoints() {
        for endpoint in ["", "not a url", "ftp://sign.local/sign"] {
            let err = PacketSigner::new(&SignConfig::new(endpoint)).err();
            assert!(
                matches!(err, Some(SignError::InvalidEndpoint(_))),
                "{endpoint:?} should be rejected"
            );
        }
    }

    #[test]
    fn extra_commands_widen_the_gate() {
        let mut config = SignConfig::new("http://127.0.0.1:9/sign");
        config.extra_commands = vec!["OidbSvcTrpcTcp.0x11c4_100".into()];
        let signer = PacketSigner::new(&config).unwrap();
        assert!(signer.client.gate().should_sign("OidbSvcTrpcTcp.0x11c4_100"));
        assert!(signer.client.gate().should_sign("MessageSvc.PbSendMsg"));
        assert_eq!(signer.endpoint().as_str(), "http://127.0.0.1:9/sign");
    }
}
