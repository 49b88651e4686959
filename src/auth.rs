use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Credential could not be decoded: {0}")]
    Undecodable(String),
    #[error("Profile has no `id` or `sub`")]
    MissingId,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileFields {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub id: Option<String>,
    pub sub: Option<String>,
}

#[derive(Deserialize)]
struct Claims {
    sub: String,
    email: String,
    name: String,
    picture: Option<String>,
}

/// What a sign-in button hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginPayload {
    Credential(String),
    Profile(ProfileFields),
}

impl LoginPayload {
    pub fn credential(token: impl Into<String>) -> Self {
        LoginPayload::Credential(token.into())
    }

    pub fn profile(fields: ProfileFields) -> Self {
        LoginPayload::Profile(fields)
    }

    pub fn decode(self) -> Result<UserProfile, AuthError> {
        match self {
            LoginPayload::Credential(token) => {
                let claims = decode_jwt_claims(&token)
                    .or_else(|| serde_json::from_str::<Claims>(&token).ok())
                    .ok_or_else(|| AuthError::Undecodable(truncate(&token)))?;
                Ok(UserProfile {
                    id: claims.sub,
                    email: claims.email,
                    name: claims.name,
                    picture: claims.picture,
                })
            }
            LoginPayload::Profile(fields) => Ok(UserProfile {
                id: fields.id.or(fields.sub).ok_or(AuthError::MissingId)?,
                email: fields.email,
                name: fields.name,
                picture: fields.picture,
            }),
        }
    }
}

fn decode_jwt_claims(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

fn truncate(token: &str) -> String {
    token.chars().take(16).collect()
}

/// Holds the signed-in user for as long as the process lives.
#[derive(Debug, Default)]
pub struct SessionStore {
    user: Option<UserProfile>,
}

impl SessionStore {
    pub fn login(&mut self, payload: LoginPayload) -> Result<&UserProfile, AuthError> {
        let user = payload.decode()?;
        tracing::info!(email = %user.email, "Signed in");
        Ok(self.user.insert(user))
    }

    pub fn logout(&mut self) {
        self.user = None;
    }

    pub fn current(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }
}
