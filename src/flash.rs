//! # Flash Messages
//!
//! One-shot notifications kept in the session between a redirect and the page that
//! follows it. Writing appends; reading is an explicit consume-once operation that
//! removes every message of the requested category.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session key holding the queue
const FLASH_KEY: &str = "flash";

/// Message category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FlashMessage {
    category: Category,
    message: String,
}

/// Append a message to the session's flash queue.
pub async fn push(
    session: &Session,
    category: Category,
    message: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    let mut queue: Vec<FlashMessage> = session.get(FLASH_KEY).await?.unwrap_or_default();
    queue.push(FlashMessage {
        category,
        message: message.into(),
    });
    session.insert(FLASH_KEY, queue).await
}

/// Return every message of `category` and remove them from the queue.
///
/// Messages of other categories stay queued.
pub async fn take(
    session: &Session,
    category: Category,
) -> Result<Vec<String>, tower_sessions::session::Error> {
    let queue: Vec<FlashMessage> = match session.get(FLASH_KEY).await? {
        Some(queue) => queue,
        None => return Ok(Vec::new()),
    };

    let (taken, kept): (Vec<_>, Vec<_>) =
        queue.into_iter().partition(|m| m.category == category);

    if kept.is_empty() {
        session.remove_value(FLASH_KEY).await?;
    } else {
        session.insert(FLASH_KEY, kept).await?;
    }

    Ok(taken.into_iter().map(|m| m.message).collect())
}
