use std::net::IpAddr;

use poem::Request;

use crate::types::internal::context::RequestContext;

/// Header carrying the authenticated user's numeric id
pub const ACTOR_ID_HEADER: &str = "X-Actor-Id";

/// Header carrying the authenticated user's display name
pub const ACTOR_NAME_HEADER: &str = "X-Actor-Name";

/// Extract the client IP address from the request
///
/// Checks X-Forwarded-For (first hop), then X-Real-IP, then the peer address.
pub fn extract_ip_address(req: &Request) -> Option<IpAddr> {
    if let Some(forwarded) = req.header("X-Forwarded-For") {
        if let Some(ip) = forwarded.split(',').next() {
            if let Ok(parsed) = ip.trim().parse() {
                return Some(parsed);
            }
        }
    }

    if let Some(real_ip) = req.header("X-Real-IP") {
        if let Ok(parsed) = real_ip.trim().parse() {
            return Some(parsed);
        }
    }

    req.remote_addr()
        .as_socket_addr()
        .map(|addr| addr.ip())
}

pub fn extract_user_agent(req: &Request) -> String {
    req.header("User-Agent").unwrap_or_default().to_string()
}

/// Build the actor descriptor for a request
///
/// Authentication happens upstream; the gateway forwards the actor in
/// `X-Actor-Id` and `X-Actor-Name`. A missing or unparsable id is recorded as
/// absent and a missing name becomes "system".
pub fn create_request_context(req: &Request) -> RequestContext {
    let actor_id = req.header(ACTOR_ID_HEADER)
        .and_then(|id| id.trim().parse::<i64>().ok());
    let actor_name = req.header(ACTOR_NAME_HEADER).unwrap_or_default().trim().to_string();

    let mut ctx = RequestContext::new()
        .with_actor(actor_id, actor_name)
        .with_client_info(extract_user_agent(req));

    if let Some(ip) = extract_ip_address(req) {
        ctx = ctx.with_ip_address(ip);
    }

    tracing::debug!(
        request_id = %ctx.request_id,
        actor = %ctx.actor_name,
        "Request context created"
    );

    ctx
}
