// src/infrastructure/security/forgery.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
    ports::{forgery::AntiForgery, time::Clock},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Duration;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Stateless anti-forgery tokens: `base64(issued.nonce).base64(mac)` where the
/// MAC covers the user id, so a token only works for the session it was
/// rendered for.
pub struct HmacAntiForgery {
    secret: Vec<u8>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl HmacAntiForgery {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: secret.into(),
            ttl,
            clock,
        }
    }

    fn mac(&self, actor: &AuthenticatedUser, payload: &str) -> ApplicationResult<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        mac.update(actor.id.to_string().as_bytes());
        mac.update(b":");
        mac.update(payload.as_bytes());
        Ok(mac)
    }
}

impl AntiForgery for HmacAntiForgery {
    fn issue(&self, actor: &AuthenticatedUser) -> ApplicationResult<String> {
        let payload = format!("{}.{}", self.clock.now().timestamp(), Uuid::new_v4().simple());
        let signature = self.mac(actor, &payload)?.finalize().into_bytes();
        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload.as_bytes()),
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    fn verify(&self, actor: &AuthenticatedUser, token: &str) -> ApplicationResult<()> {
        let invalid = || ApplicationError::forbidden("invalid anti-forgery token");

        let (payload_b64, signature_b64) = token.trim().split_once('.').ok_or_else(invalid)?;
        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or_else(invalid)?;
        let signature = URL_SAFE_NO_PAD.decode(signature_b64).map_err(|_| invalid())?;

        self.mac(actor, &payload)?
            .verify_slice(&signature)
            .map_err(|_| invalid())?;

        let issued = payload
            .split_once('.')
            .and_then(|(ts, _)| ts.parse::<i64>().ok())
            .ok_or_else(invalid)?;
        let age = self.clock.now().timestamp() - issued;
        if age < 0 || age > self.ttl.num_seconds() {
            return Err(ApplicationError::forbidden("anti-forgery token expired"));
        }
        Ok(())
    }
}
