//! Message types sent to the completion endpoint.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single `{role, content}` pair.
///
/// # Examples
///
/// ```
/// use lectern_core::{Message, Role};
///
/// let message = Message::new(Role::User, "Hello!");
/// assert_eq!(*message.role(), Role::User);
/// assert_eq!(message.content(), "Hello!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct Message {
    /// The role of the message sender
    role: Role,
    /// Plain text content
    content: String,
}

impl Message {
    /// Creates a message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}
