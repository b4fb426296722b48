//! Setup request: what to install, where, and under which operation name.

use crate::domain::error::SetupError;
use crate::domain::fragment::{ALIASES_FRAGMENT, FragmentGroup, FragmentLibrary};

/// Operation name used when the caller does not supply one.
pub const DEFAULT_OPERATION_NAME: &str = "Language Setup";

/// One request to bootstrap a codespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupRequest {
    /// Codespace name.
    pub target: String,
    /// Explicitly requested fragment ids, in any order.
    pub fragment_ids: Vec<String>,
    /// Add every AI-agent fragment.
    pub include_ai_agents: bool,
    /// Add the alias/dotfile fragment.
    pub include_aliases: bool,
    /// Free-form label; also the prefix of the remote script name.
    pub operation_name: String,
}

impl SetupRequest {
    #[must_use]
    pub fn new(target: impl Into<String>, fragment_ids: Vec<String>) -> Self {
        Self {
            target: target.into(),
            fragment_ids,
            include_ai_agents: false,
            include_aliases: false,
            operation_name: DEFAULT_OPERATION_NAME.to_string(),
        }
    }

    /// Check the target name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTarget` if the target is blank or contains whitespace.
    pub fn validate_target(&self) -> Result<(), SetupError> {
        let target = self.target.trim();
        if target.is_empty() || target.chars().any(char::is_whitespace) {
            return Err(SetupError::InvalidTarget(self.target.clone()));
        }
        Ok(())
    }

    /// Expand the flags into the full list of requested ids.
    ///
    /// Order is not significant; resolution against the library fixes it.
    #[must_use]
    pub fn requested_ids(&self, library: &FragmentLibrary) -> Vec<String> {
        let mut ids = self.fragment_ids.clone();
        if self.include_ai_agents {
            ids.extend(
                library
                    .group_ids(FragmentGroup::AiAgent)
                    .into_iter()
                    .map(str::to_string),
            );
        }
        if self.include_aliases {
            ids.push(ALIASES_FRAGMENT.to_string());
        }
        ids
    }
}
