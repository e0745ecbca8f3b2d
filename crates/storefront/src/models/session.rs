//! Session-related types.
//!
//! The session record only marks the browser as a known visitor. Its id
//! keys the visitor's cart and detail overlay in [`AppState`], so requests
//! from the same browser never overwrite each other's session record.
//!
//! [`AppState`]: crate::state::AppState

use tower_sessions::{Session, session, session_store};

/// Session keys for storefront state.
pub mod keys {
    /// Marks a session as belonging to a known visitor.
    pub const VISITOR: &str = "visitor";
}

/// The id of this browser's session, creating the session on first use.
///
/// A cookie naming a session the store no longer has gets a fresh id.
///
/// # Errors
///
/// Returns an error if the session store cannot be read or written.
pub async fn visitor_id(session: &Session) -> Result<String, session::Error> {
    if session.get::<bool>(keys::VISITOR).await?.is_none() {
        session.insert(keys::VISITOR, true).await?;
        session.save().await?;
    }

    session.id().map(|id| id.to_string()).ok_or_else(|| {
        session::Error::Store(session_store::Error::Backend(
            "Session has no id after saving".to_string(),
        ))
    })
}
