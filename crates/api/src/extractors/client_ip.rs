//! Source address of a request, recorded on audit events.

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use std::convert::Infallible;
use std::net::SocketAddr;

/// First `X-Forwarded-For` hop, else the peer address, else nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientIp(pub Option<String>);

impl ClientIp {
    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Ok(ClientIp(forwarded_for(&parts.headers).or(peer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(req: Request<()>) -> ClientIp {
        let (mut parts, _) = req.into_parts();
        ClientIp::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_forwarded_for_first_hop_wins() {
        let req = Request::builder()
            .header("X-Forwarded-For", "10.0.0.7, 172.16.0.1")
            .body(())
            .unwrap();
        assert_eq!(extract(req).await, ClientIp(Some("10.0.0.7".to_string())));
    }

    #[tokio::test]
    async fn test_peer_address_fallback() {
        let mut req = Request::builder().body(()).unwrap();
        let addr: SocketAddr = "192.168.1.20:5555".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        assert_eq!(
            extract(req).await.into_inner(),
            Some("192.168.1.20".to_string())
        );
    }

    #[tokio::test]
    async fn test_no_source_address() {
        let req = Request::builder().body(()).unwrap();
        assert_eq!(extract(req).await, ClientIp(None));
    }
}
