use std::net::IpAddr;

use super::request_id::RequestId;

/// Actor name recorded when the caller did not identify itself
pub const SYSTEM_ACTOR: &str = "system";

/// Request context that flows through all layers
///
/// Carries the actor descriptor handed over by the transport layer. Every
/// mutating store call takes one so the audit trail can attribute the attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// Id of the authenticated user, when the transport supplied one
    pub actor_id: Option<i64>,

    /// Display name of the actor ("system" if absent)
    pub actor_name: String,

    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Client string (User-Agent for HTTP callers)
    pub client_info: String,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,
}

impl RequestContext {
    /// Create an anonymous context
    pub fn new() -> Self {
        Self {
            actor_id: None,
            actor_name: SYSTEM_ACTOR.to_string(),
            ip_address: None,
            client_info: String::new(),
            request_id: RequestId::new(),
        }
    }

    /// Set the actor; an empty name falls back to "system"
    pub fn with_actor(mut self, actor_id: Option<i64>, actor_name: impl Into<String>) -> Self {
        let actor_name = actor_name.into();
        self.actor_id = actor_id;
        self.actor_name = if actor_name.trim().is_empty() {
            SYSTEM_ACTOR.to_string()
        } else {
            actor_name
        };
        self
    }

    /// Set the ip_address
    pub fn with_ip_address(mut self, ip_address: IpAddr) -> Self {
        self.ip_address = Some(ip_address);
        self
    }

    /// Set the client info
    pub fn with_client_info(mut self, client_info: impl Into<String>) -> Self {
        self.client_info = client_info.into();
        self
    }

    /// Source address as recorded in audit entries
    pub fn source_address(&self) -> String {
        self.ip_address
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_defaults_to_system_actor() {
        let ctx = RequestContext::new();
        assert_eq!(ctx.actor_id, None);
        assert_eq!(ctx.actor_name, "system");
        assert_eq!(ctx.source_address(), "unknown");
    }

    #[test]
    fn blank_actor_name_falls_back_to_system() {
        let ctx = RequestContext::new().with_actor(Some(4), "  ");
        assert_eq!(ctx.actor_id, Some(4));
        assert_eq!(ctx.actor_name, "system");
    }

    #[test]
    fn builders_populate_actor_descriptor() {
        let ctx = RequestContext::new()
            .with_actor(Some(12), "alice")
            .with_ip_address("10.1.2.3".parse().unwrap())
            .with_client_info("curl/8.0");

        assert_eq!(ctx.actor_name, "alice");
        assert_eq!(ctx.source_address(), "10.1.2.3");
        assert_eq!(ctx.client_info, "curl/8.0");
    }
}
