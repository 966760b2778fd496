//! Response envelope decoding
//!
//! Every v1 response looks like
//! `{"status": "OK" | "ERROR", "<payload key>": ..., "error_message": "..."}`.
//! Failure is signalled in-band, so the HTTP status is never consulted.

use super::error::{Error, Result, MISSING_REMOTE_MESSAGE};
use super::models::{Droplet, SshKey};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Status value that marks a failed call
pub const ERROR_STATUS: &str = "ERROR";

/// Success payload shape of a catalog operation.
///
/// `FIELD` names the envelope key the payload lives under; `None` means the
/// operation only acknowledges the request.
pub trait Payload: DeserializeOwned {
    const FIELD: Option<&'static str>;
}

impl Payload for Droplet {
    const FIELD: Option<&'static str> = Some("droplet");
}

impl Payload for Vec<Droplet> {
    const FIELD: Option<&'static str> = Some("droplets");
}

impl Payload for SshKey {
    const FIELD: Option<&'static str> = Some("ssh_key");
}

impl Payload for Vec<SshKey> {
    const FIELD: Option<&'static str> = Some("ssh_keys");
}

impl Payload for () {
    const FIELD: Option<&'static str> = None;
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

/// Decode a raw response body into the payload `P`.
pub fn decode<P: Payload>(body: &[u8]) -> Result<P> {
    let mut envelope: RawEnvelope = serde_json::from_slice(body)
        .map_err(|e| Error::MalformedResponse(format!("invalid envelope: {e}")))?;

    if envelope.status == ERROR_STATUS {
        let message = envelope
            .error_message
            .or(envelope.message)
            .unwrap_or_else(|| MISSING_REMOTE_MESSAGE.to_string());
        return Err(Error::Remote { message });
    }

    let Some(field) = P::FIELD else {
        return serde_json::from_value(Value::Null)
            .map_err(|e| Error::MalformedResponse(e.to_string()));
    };

    let value = envelope
        .rest
        .remove(field)
        .ok_or_else(|| Error::MalformedResponse(format!("missing `{field}` field")))?;

    serde_json::from_value(value).map_err(|e| {
        tracing::warn!("Failed to decode `{}` payload: {}", field, e);
        Error::MalformedResponse(format!("invalid `{field}` field: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{DropletId, SshKeyId};

    #[test]
    fn test_error_status_surfaces_message() {
        let body = br#"{"status":"ERROR","error_message":"Droplet not found"}"#;
        match decode::<Droplet>(body) {
            Err(Error::Remote { message }) => assert_eq!(message, "Droplet not found"),
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[test]
    fn test_error_status_ignores_payload() {
        let body = br#"{"status":"ERROR","error_message":"nope","droplets":[{"id":1}]}"#;
        assert!(matches!(decode::<Vec<Droplet>>(body), Err(Error::Remote { .. })));
    }

    #[test]
    fn test_error_without_message_uses_fallback() {
        let body = br#"{"status":"ERROR"}"#;
        match decode::<()>(body) {
            Err(Error::Remote { message }) => assert_eq!(message, MISSING_REMOTE_MESSAGE),
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[test]
    fn test_error_with_alternate_message_key() {
        let body = br#"{"status":"ERROR","message":"Access Denied"}"#;
        match decode::<()>(body) {
            Err(Error::Remote { message }) => assert_eq!(message, "Access Denied"),
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[test]
    fn test_ok_acknowledgement() {
        let body = br#"{"status":"OK","event_id":7321}"#;
        decode::<()>(body).unwrap();
    }

    #[test]
    fn test_non_error_status_is_success() {
        let body = br#"{"status":"queued","ssh_key":{"id":5,"name":"laptop","ssh_pub_key":"ssh-rsa AAA"}}"#;
        let key = decode::<SshKey>(body).unwrap();
        assert_eq!(key.id, SshKeyId(5));
        assert_eq!(key.ssh_pub_key.as_deref(), Some("ssh-rsa AAA"));
    }

    #[test]
    fn test_collection_payload() {
        let body = br#"{"status":"OK","droplets":[{"id":1,"name":"a","status":"new"},{"id":2,"name":"b","status":"off"}]}"#;
        let droplets = decode::<Vec<Droplet>>(body).unwrap();
        assert_eq!(droplets.len(), 2);
        assert_eq!(droplets[1].id, DropletId(2));
        assert_eq!(droplets[1].status, "off");
    }

    #[test]
    fn test_missing_payload_is_malformed() {
        let body = br#"{"status":"OK"}"#;
        assert!(matches!(decode::<Droplet>(body), Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_wrong_payload_shape_is_malformed() {
        let body = br#"{"status":"OK","droplet":[1,2,3]}"#;
        assert!(matches!(decode::<Droplet>(body), Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_truncated_and_non_json_bodies_are_malformed() {
        assert!(matches!(decode::<()>(br#"{"status":"OK""#), Err(Error::MalformedResponse(_))));
        assert!(matches!(decode::<()>(b"<html>502</html>"), Err(Error::MalformedResponse(_))));
        assert!(matches!(decode::<()>(b""), Err(Error::MalformedResponse(_))));
        assert!(matches!(decode::<()>(br#"{"droplets":[]}"#), Err(Error::MalformedResponse(_))));
    }
}
