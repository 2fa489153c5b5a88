use secrecy::Secret;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("API key pool cannot be empty")]
pub struct EmptyKeyPoolError;

/// Round-robin pool of API credentials. Each outbound call takes the key
/// at the cursor and moves the cursor forward, wrapping at the end, so
/// rate-limit exposure is spread across the whole pool.
///
/// Constructed once at startup and owned by the outbound client; there is
/// no process-global pool.
#[derive(Debug)]
pub struct ApiKeyPool {
    keys: Vec<Secret<String>>,
    cursor: usize,
}

impl ApiKeyPool {
    pub fn new(keys: Vec<Secret<String>>) -> Result<Self, EmptyKeyPoolError> {
        if keys.is_empty() {
            return Err(EmptyKeyPoolError);
        }
        Ok(Self { keys, cursor: 0 })
    }

    /// Returns the credential at the cursor, then advances it by one,
    /// wrapping to the first key after the last.
    pub fn advance(&mut self) -> Secret<String> {
        let key = self.keys[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.keys.len();
        key
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
