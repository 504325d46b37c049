use serde::{Deserialize, Serialize};

/// What happens to the key and move when the user exits after seeing the
/// commitment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitPolicy {
    /// Exiting is abstaining: nothing is disclosed.
    #[default]
    Abstain,
    /// Disclose key and move anyway so the abandoned commitment can be audited.
    Reveal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub exit_policy: ExitPolicy,
}

impl GameConfig {
    pub fn new(exit_policy: ExitPolicy) -> Self {
        Self { exit_policy }
    }

    pub fn reveals_on_exit(&self) -> bool {
        self.exit_policy == ExitPolicy::Reveal
    }
}
