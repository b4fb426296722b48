//! Script fragment library.
//!
//! A fixed, read-only registry of named shell fragments. Resolution always
//! yields registration order so that composed scripts are reproducible.

mod catalog;

use std::collections::BTreeSet;

use crate::domain::error::SetupError;
use crate::domain::script::HEREDOC_SENTINEL;

/// Logical grouping used by listings and by the `--ai-agents` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FragmentGroup {
    /// Programming-language toolchains.
    Language,
    /// AI-agent installers.
    AiAgent,
    /// Shell configuration and general tooling.
    Tooling,
}

impl FragmentGroup {
    /// Human-readable group title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Language => "Languages",
            Self::AiAgent => "AI agents",
            Self::Tooling => "Tools",
        }
    }
}

/// One reusable, independently valid shell-script segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub id: &'static str,
    pub label: &'static str,
    pub group: FragmentGroup,
    pub description: &'static str,
    pub body: &'static str,
}

impl Fragment {
    #[must_use]
    pub const fn new(
        id: &'static str,
        label: &'static str,
        group: FragmentGroup,
        description: &'static str,
        body: &'static str,
    ) -> Self {
        Self {
            id,
            label,
            group,
            description,
            body,
        }
    }
}

/// Identifier of the alias/dotfile fragment added by `--aliases`.
pub const ALIASES_FRAGMENT: &str = "aliases";

/// Immutable registry of fragments, in registration order.
#[derive(Debug, Clone)]
pub struct FragmentLibrary {
    fragments: Vec<Fragment>,
}

impl FragmentLibrary {
    /// Register `fragments` in the given order.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateFragment` if an id appears twice,
    /// `SentinelCollision` if a body contains the heredoc terminator line
    /// used to transfer composed scripts, or `UnsafeLabel` if a label could
    /// escape the double-quoted `echo` it is written into.
    pub fn new(fragments: Vec<Fragment>) -> Result<Self, SetupError> {
        let mut seen = BTreeSet::new();
        for fragment in &fragments {
            if !seen.insert(fragment.id) {
                return Err(SetupError::DuplicateFragment(fragment.id.to_string()));
            }
            if fragment.body.lines().any(|l| l.trim() == HEREDOC_SENTINEL) {
                return Err(SetupError::SentinelCollision {
                    id: fragment.id.to_string(),
                    sentinel: HEREDOC_SENTINEL.to_string(),
                });
            }
            if !is_safe_label(fragment.label) {
                return Err(SetupError::UnsafeLabel {
                    id: fragment.id.to_string(),
                    label: fragment.label.to_string(),
                });
            }
        }
        Ok(Self { fragments })
    }

    /// The built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in catalog violates a registration
    /// check.
    pub fn builtin() -> Result<Self, SetupError> {
        Self::new(catalog::builtin_fragments())
    }

    /// Look up a fragment by identifier.
    ///
    /// # Errors
    ///
    /// Returns `UnknownFragment` if `id` is not registered.
    pub fn lookup(&self, id: &str) -> Result<&Fragment, SetupError> {
        self.fragments
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| SetupError::UnknownFragment(id.to_string()))
    }

    /// Resolve requested ids into fragments in canonical (registration) order.
    ///
    /// Duplicate ids collapse to one fragment; input order is irrelevant.
    ///
    /// # Errors
    ///
    /// Returns `UnknownFragment` for the first unregistered id, or
    /// `EmptySelection` if nothing was requested.
    pub fn resolve<S: AsRef<str>>(&self, requested: &[S]) -> Result<Vec<&Fragment>, SetupError> {
        let mut wanted = BTreeSet::new();
        for id in requested {
            wanted.insert(self.lookup(id.as_ref())?.id);
        }
        let resolved: Vec<&Fragment> = self
            .fragments
            .iter()
            .filter(|f| wanted.contains(f.id))
            .collect();
        if resolved.is_empty() {
            return Err(SetupError::EmptySelection);
        }
        Ok(resolved)
    }

    /// Fragments belonging to `group`, in canonical order.
    #[must_use]
    pub fn group(&self, group: FragmentGroup) -> Vec<&Fragment> {
        self.fragments.iter().filter(|f| f.group == group).collect()
    }

    /// Identifiers belonging to `group`, in canonical order.
    #[must_use]
    pub fn group_ids(&self, group: FragmentGroup) -> Vec<&'static str> {
        self.group(group).into_iter().map(|f| f.id).collect()
    }

    /// All fragments, in canonical order.
    #[must_use]
    pub fn all(&self) -> &[Fragment] {
        &self.fragments
    }
}

/// Labels are written into `echo "..."` and a `#` banner line.
fn is_safe_label(label: &str) -> bool {
    !label.is_empty()
        && !label
            .chars()
            .any(|c| c.is_control() || matches!(c, '"' | '$' | '`' | '\\'))
}
