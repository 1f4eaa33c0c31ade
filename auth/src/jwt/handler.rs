use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::Subject;
use super::claims::TokenKind;
use super::errors::JwtError;

/// JWT token handler for issuing and verifying tokens.
///
/// Uses HS256 (HMAC with SHA-256). The signing secret is fixed at construction
/// and never changes for the lifetime of the handler.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token for a subject.
    ///
    /// # Arguments
    /// * `subject` - Identity to embed in the token
    /// * `kind` - Access or refresh
    /// * `ttl` - Time until the token expires
    ///
    /// # Returns
    /// Compact JWT string
    ///
    /// # Errors
    /// * `Encoding` - Token encoding failed
    pub fn issue(
        &self,
        subject: &Subject,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, kind, Utc::now(), ttl);
        self.encode(&claims)
    }

    /// Sign already-built claims.
    ///
    /// # Errors
    /// * `Encoding` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key).map_err(|e| JwtError::Encoding(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// Expiry is checked without leeway.
    ///
    /// # Arguments
    /// * `token` - JWT token string
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `Expired` - Signature is valid but `exp` has passed
    /// * `Malformed` - Token structure, signature or claims are invalid
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::Expired,
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Verify a token and require it to be of the given kind.
    ///
    /// # Errors
    /// * `Expired` - Signature is valid but `exp` has passed
    /// * `Malformed` - Token structure, signature or claims are invalid
    /// * `WrongKind` - Token is valid but of the other kind
    pub fn verify_kind(&self, token: &str, expected: TokenKind) -> Result<Claims, JwtError> {
        let claims = self.verify(token)?;

        if claims.kind != expected {
            return Err(JwtError::WrongKind {
                expected,
                actual: claims.kind,
            });
        }

        Ok(claims)
    }
}
