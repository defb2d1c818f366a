// src/infrastructure/security/token.rs
use crate::application::{
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, KeyPair, PrivateKey, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

/// Session tokens for the back office. The token carries the identity facts
/// the console needs (user, admin flag, entity, optional third party) and
/// time caveats enforced on every request.
#[derive(Clone)]
pub struct BiscuitTokenManager {
    root: Arc<KeyPair>,
    public: PublicKey,
    ttl: Duration,
}

impl BiscuitTokenManager {
    pub fn new(private_key_hex: &str, ttl: Duration) -> ApplicationResult<Self> {
        let private =
            PrivateKey::from_bytes_hex(private_key_hex, Algorithm::Ed25519).map_err(infra)?;
        let root = KeyPair::from(&private);
        Ok(Self {
            public: root.public(),
            root: Arc::new(root),
            ttl,
        })
    }
}

/// Identity facts and time caveats of a back office session.
const SESSION_FACTS: &str = r#"
    user({uid}, {login});
    admin({admin});
    entity({entity});
    issued_at({issued});
    expires_at({exp});
    check if time($now), $now >= {issued};
    check if time($now), $now <= {exp};
"#;

/// A session must name its user; everything else is read from the facts.
const SESSION_POLICY: &str = "allow if user($id, $login);";

fn infra(err: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::infrastructure(err.to_string())
}

fn rejected(err: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::unauthorized(err.to_string())
}

fn session_facts(
    subject: &TokenSubject,
    issued_at: SystemTime,
    expires_at: SystemTime,
) -> (String, HashMap<String, Term>) {
    let mut code = SESSION_FACTS.to_string();
    let mut params: HashMap<String, Term> = HashMap::from([
        ("uid".to_string(), i64::from(subject.user_id).into()),
        ("login".to_string(), subject.login.clone().into()),
        ("admin".to_string(), subject.admin.into()),
        ("entity".to_string(), i64::from(i32::from(subject.entity)).into()),
        ("issued".to_string(), issued_at.into()),
        ("exp".to_string(), expires_at.into()),
    ]);

    // absent fact means an internal user
    if let Some(third_party) = subject.third_party_id.filter(|id| *id > 0) {
        code.push_str("third_party({soc});\n");
        params.insert("soc".to_string(), third_party.into());
    }

    (code, params)
}

fn seal(code: &str, params: HashMap<String, Term>, root: &KeyPair) -> ApplicationResult<String> {
    Biscuit::builder()
        .code_with_params(code, params, HashMap::new())
        .map_err(infra)?
        .build(root)
        .map_err(infra)?
        .seal()
        .map_err(infra)?
        .to_base64()
        .map_err(infra)
}

#[async_trait]
impl TokenManager for BiscuitTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = SystemTime::now();
        let expires_at = issued_at
            .checked_add(self.ttl)
            .ok_or_else(|| ApplicationError::infrastructure("session lifetime overflows the clock"))?;
        let (code, params) = session_facts(&subject, issued_at, expires_at);
        let token = seal(&code, params, self.root.as_ref())?;

        let issued_at = DateTime::<Utc>::from(issued_at);
        let expires_at = DateTime::<Utc>::from(expires_at);
        Ok(AuthTokenDto {
            token,
            issued_at,
            expires_at,
            expires_in: (expires_at - issued_at).num_seconds().max(0),
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let biscuit = Biscuit::from_base64(token, self.public).map_err(rejected)?;

        // `.time()` feeds the expiry checks sealed into the token
        AuthorizerBuilder::new()
            .time()
            .code(SESSION_POLICY)
            .map_err(infra)?
            .build(&biscuit)
            .map_err(rejected)?
            .authorize()
            .map_err(rejected)?;

        let (facts, _, _, _) = biscuit.authorizer().map_err(rejected)?.dump();
        super::claims::parse_claims(facts)
    }
}
