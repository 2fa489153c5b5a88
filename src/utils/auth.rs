use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use color_eyre::eyre::{eyre, Context, ContextCompat, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::{AuthAPIError, Email};

use super::constants::{JWT_COOKIE_NAME, JWT_SECRET};

// Token issuance lives in the identity service; this module only needs
// cookie creation for tests and validation for the protected routes.

// Create cookie with a new JWT auth token
#[tracing::instrument(name = "Generating auth cookie", skip_all)]
pub fn generate_auth_cookie(email: &Email) -> Result<Cookie<'static>> {
    let token = generate_auth_token(email)?;
    Ok(create_auth_cookie(token))
}

// Create cookie and set the value to the passed-in token string
#[tracing::instrument(name = "Creating auth cookie", skip_all)]
fn create_auth_cookie(token: Secret<String>) -> Cookie<'static> {
    let cookie =
        Cookie::build((JWT_COOKIE_NAME, token.expose_secret().to_owned()))
            .path("/") // apply cookie to all URLs on the server
            .http_only(true) // prevent JavaScript from accessing the cookie
            .same_site(SameSite::Lax) // send cookie with "same-site" requests, and with "cross-site" top-level navigations.
            .build();

    cookie
}

// This value determines how long the JWT auth token is valid for
pub const TOKEN_TTL_SECONDS: i64 = 600; // 10 minutes

// Create JWT auth token
#[tracing::instrument(name = "Generating auth token", skip_all)]
fn generate_auth_token(email: &Email) -> Result<Secret<String>> {
    let delta = chrono::Duration::try_seconds(TOKEN_TTL_SECONDS)
        .wrap_err("Failed to create 10 minute time delta")?;

    // Create JWT expiration time
    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(eyre!("failed to add to current time"))?
        .timestamp();

    // Cast exp to a usize, which is what Claims expects
    let exp: usize = exp.try_into().wrap_err(format!(
        "failed to cast exp time to usize. exp time: {}",
        exp
    ))?;

    let sub = email.as_ref().to_owned();

    let claims = Claims { sub, exp };

    create_token(&claims)
}

// Check if JWT auth token is valid by decoding it using the JWT secret
#[tracing::instrument(name = "Validating auth token", skip_all)]
pub fn validate_token(token: &Secret<String>) -> Result<Claims> {
    decode::<Claims>(
        token.expose_secret(),
        &DecodingKey::from_secret(JWT_SECRET.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .wrap_err("failed to decode token")
}

/// Extracts and validates the auth cookie from the request's cookie jar.
#[tracing::instrument(name = "Checking request credentials", skip_all)]
pub fn get_claims(jar: &CookieJar) -> Result<Claims, AuthAPIError> {
    let cookie = jar.get(JWT_COOKIE_NAME).ok_or(AuthAPIError::MissingToken)?;
    let token = Secret::new(cookie.value().to_owned());
    validate_token(&token).map_err(|_| AuthAPIError::InvalidToken)
}

// Create JWT auth token by encoding claims using the JWT secret
#[tracing::instrument(name = "Creating auth token", skip_all)]
fn create_token(claims: &Claims) -> Result<Secret<String>> {
    let token_string = encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.expose_secret().as_bytes()),
    )
    .wrap_err("failed to create token")?;

    Ok(Secret::new(token_string))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}
