//! Anonymous visitor identity, carried in the signed session cookie and
//! handed to whoever needs it as an explicit value.

use axum_sessions::extractors::WritableSession;

const VISITOR_ID_KEY: &str = "visitor_id";

/// Opaque identity of an anonymous browser session.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitorId(String);

impl VisitorId {
    pub fn mint() -> Self {
        Self(format!("anon_{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for VisitorId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The visitor id for the current session, minting and storing a fresh
/// one on first sight.
pub fn visitor_id(session: &mut WritableSession) -> VisitorId {
    if let Some(existing) = session.get::<String>(VISITOR_ID_KEY) {
        return VisitorId(existing);
    }

    let fresh = VisitorId::mint();
    if let Err(e) = session.insert(VISITOR_ID_KEY, fresh.as_str()) {
        tracing::warn!("Failed to persist visitor id in session: {e}");
    }
    fresh
}
