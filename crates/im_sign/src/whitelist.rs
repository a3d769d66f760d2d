use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

/// Commands the sign service must countersign.
const SIGN_COMMANDS: &[&str] = &[
    "trpc.o3.ecdh_access.EcdhAccess.SsoEstablishShareKey",
    "trpc.o3.ecdh_access.EcdhAccess.SsoSecureAccess",
    "trpc.o3.report.Report.SsoReport",
    "MessageSvc.PbSendMsg",
    "wtlogin.login",
    "trpc.login.ecdh.EcdhService.SsoNTLoginPasswordLogin",
    "trpc.login.ecdh.EcdhService.SsoNTLoginEasyLogin",
    "trpc.login.ecdh.EcdhService.SsoNTLoginPasswordLoginNewDevice",
    "trpc.login.ecdh.EcdhService.SsoNTLoginEasyLoginUnusualDevice",
    "trpc.login.ecdh.EcdhService.SsoNTLoginPasswordLoginUnusualDevice",
    "OidbSvcTrpcTcp.0x11ec_1",
    "OidbSvcTrpcTcp.0x758_1",
    "OidbSvcTrpcTcp.0x7c2_5",
    "OidbSvcTrpcTcp.0x10db_1",
    "OidbSvcTrpcTcp.0x8a1_7",
    "OidbSvcTrpcTcp.0x89a_0",
    "OidbSvcTrpcTcp.0x89a_15",
    "OidbSvcTrpcTcp.0x88d_0",
    "OidbSvcTrpcTcp.0x88d_14",
    "OidbSvcTrpcTcp.0x112a_1",
    "OidbSvcTrpcTcp.0x587_74",
    "OidbSvcTrpcTcp.0x1100_1",
    "OidbSvcTrpcTcp.0x1102_1",
    "OidbSvcTrpcTcp.0x1103_1",
    "OidbSvcTrpcTcp.0x1107_1",
    "OidbSvcTrpcTcp.0x1105_1",
    "OidbSvcTrpcTcp.0xf88_1",
    "OidbSvcTrpcTcp.0xf89_1",
    "OidbSvcTrpcTcp.0xf57_1",
    "OidbSvcTrpcTcp.0xf57_106",
    "OidbSvcTrpcTcp.0xf57_9",
    "OidbSvcTrpcTcp.0xf55_1",
    "OidbSvcTrpcTcp.0xf67_1",
    "OidbSvcTrpcTcp.0xf67_5",
];

static GLOBAL: OnceLock<Arc<CommandWhitelist>> = OnceLock::new();

/// Immutable set of fully-qualified command names that need a signature.
///
/// Built once at startup and shared behind an `Arc`; lookups take no lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandWhitelist {
    commands: HashSet<String>,
}

impl Default for CommandWhitelist {
    fn default() -> Self {
        Self::from_iter(SIGN_COMMANDS.iter().copied())
    }
}

impl<S: Into<String>> FromIterator<S> for CommandWhitelist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl CommandWhitelist {
    /// Process-wide default list.
    pub fn global() -> Arc<CommandWhitelist> {
        GLOBAL
            .get_or_init(|| Arc::new(CommandWhitelist::default()))
            .clone()
    }

    /// Copy of this list widened with `extra`. Meant for startup only.
    pub fn with_extra<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut commands = self.commands.clone();
        commands.extend(extra.into_iter().map(Into::into));
        Self { commands }
    }

    pub fn contains(&self, command: &str) -> bool {
        self.commands.contains(command)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Decides whether an outgoing command needs a signature.
#[derive(Debug, Clone)]
pub struct SignGate {
    whitelist: Arc<CommandWhitelist>,
}

impl Default for SignGate {
    fn default() -> Self {
        Self::new(CommandWhitelist::global())
    }
}

impl SignGate {
    pub fn new(whitelist: Arc<CommandWhitelist>) -> Self {
        Self { whitelist }
    }

    pub fn should_sign(&self, command: &str) -> bool {
        self.whitelist.contains(command)
    }

    pub fn whitelist(&self) -> &CommandWhitelist {
        &self.whitelist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_covers_protocol_commands() {
        let gate = SignGate::default();
        assert!(gate.should_sign("MessageSvc.PbSendMsg"));
        assert!(gate.should_sign("wtlogin.login"));
        assert!(gate.should_sign("OidbSvcTrpcTcp.0xf67_5"));
        assert!(gate.should_sign("trpc.o3.ecdh_access.EcdhAccess.SsoSecureAccess"));
        assert_eq!(gate.whitelist().len(), SIGN_COMMANDS.len());
    }

    #[test]
    fn unlisted_commands_are_not_signed() {
        let gate = SignGate::default();
        assert!(!gate.should_sign("wtlogin.trans_emp"));
        assert!(!gate.should_sign("trpc.login.ecdh.EcdhService.SsoKeyExchange"));
        assert!(!gate.should_sign("OidbSvcTrpcTcp.0x11c4_100"));
        // lookups are exact, not prefix or case-insensitive
        assert!(!gate.should_sign("messagesvc.pbsendmsg"));
        assert!(!gate.should_sign("MessageSvc.PbSendMsg "));
        assert!(!gate.should_sign(""));
    }

    #[test]
    fn global_list_is_built_once() {
        let a = CommandWhitelist::global();
        let b = CommandWhitelist::global();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn with_extra_widens_a_copy() {
        let base = CommandWhitelist::default();
        let widened = base.with_extra(["OidbSvcTrpcTcp.0x11c4_100"]);
        assert!(widened.contains("OidbSvcTrpcTcp.0x11c4_100"));
        assert!(!base.contains("OidbSvcTrpcTcp.0x11c4_100"));
        assert_eq!(widened.len(), base.len() + 1);
    }

    #[test]
    fn concurrent_lookups_share_one_list() {
        let gate = SignGate::default();
        std::thread::scope(|s| {
            for _ in 0..8 {
                let gate = gate.clone();
                s.spawn(move || {
                    for _ in 0..1000 {
                        assert!(gate.should_sign("MessageSvc.PbSendMsg"));
                        assert!(!gate.should_sign("MessageSvc.PbGetMsg"));
                    }
                });
            }
        });
    }
}
