use serde::{Deserialize, Deserializer, Serialize};

/// Codespace state as reported by `gh codespace list --json state`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CodespaceState {
    Available,
    Shutdown,
    Starting,
    ShuttingDown,
    Rebuilding,
    Provisioning,
    #[serde(other)]
    Unknown,
}

impl CodespaceState {
    /// A codespace that accepts remote-shell connections right away.
    #[must_use]
    pub fn is_available(self) -> bool {
        self == Self::Available
    }
}

impl std::fmt::Display for CodespaceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Available => "Available",
            Self::Shutdown => "Shutdown",
            Self::Starting => "Starting",
            Self::ShuttingDown => "ShuttingDown",
            Self::Rebuilding => "Rebuilding",
            Self::Provisioning => "Provisioning",
            Self::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// A remote compute target as listed by the hosted-repository CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CodespaceDescriptor {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, deserialize_with = "repository_name")]
    pub repository: String,
    #[serde(default = "unknown_state")]
    pub state: CodespaceState,
    #[serde(default)]
    pub machine_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<String>,
}

impl CodespaceDescriptor {
    /// Browser URL of the codespace.
    #[must_use]
    pub fn web_url(&self) -> String {
        format!("https://github.com/codespaces/{}", self.name)
    }

    /// Rough hourly cost in USD for the machine class.
    #[must_use]
    pub fn hourly_cost_estimate(&self) -> f64 {
        match self.machine_name.as_str() {
            "standardLinux32gb" => 0.36,
            "premiumLinux64gb" => 0.72,
            "largeLinux128gb" => 1.44,
            _ => 0.18,
        }
    }
}

fn unknown_state() -> CodespaceState {
    CodespaceState::Unknown
}

/// Older `gh` releases report `repository` as an object.
fn repository_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repository {
        Name(String),
        Object { full_name: String },
    }

    Ok(match Repository::deserialize(deserializer)? {
        Repository::Name(name) | Repository::Object { full_name: name } => name,
    })
}
