use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Identity a token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// User identifier
    pub id: i64,

    /// User email, as stored
    pub email: String,
}

impl Subject {
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

/// Which of the two token kinds a JWT is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// JWT claims carried by both access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User identifier
    pub id: i64,

    /// User email
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,

    /// Token kind, so a refresh token is never accepted where an access
    /// token is expected
    #[serde(rename = "typ")]
    pub kind: TokenKind,
}

impl Claims {
    /// Build claims for a subject that expire `ttl` after `now`.
    ///
    /// # Arguments
    /// * `subject` - Identity to embed
    /// * `kind` - Access or refresh
    /// * `now` - Issue instant
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Claims with a fresh random `jti`
    pub fn for_subject(
        subject: &Subject,
        kind: TokenKind,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: subject.id,
            email: subject.email.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
            kind,
        }
    }

    /// Identity carried by the token.
    pub fn subject(&self) -> Subject {
        Subject::new(self.id, self.email.clone())
    }

    /// Expiration as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}
