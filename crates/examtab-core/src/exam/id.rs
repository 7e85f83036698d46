use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Display name used for the custom exam until the user names it.
pub const DEFAULT_CUSTOM_NAME: &str = "Custom Exam";

/// Identifier of a known exam.
///
/// The three built-ins are fixed; `Custom` is the reserved slot for the
/// single user-defined exam. With nothing stored, JEE Advanced is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamId {
    #[serde(rename = "jee")]
    JeeMain,
    #[serde(rename = "neet")]
    Neet,
    #[default]
    #[serde(rename = "jeeAdv")]
    JeeAdvanced,
    #[serde(rename = "custom")]
    Custom,
}

impl ExamId {
    pub const ALL: [ExamId; 4] = [
        ExamId::JeeMain,
        ExamId::Neet,
        ExamId::JeeAdvanced,
        ExamId::Custom,
    ];

    pub const BUILT_IN: [ExamId; 3] = [ExamId::JeeMain, ExamId::Neet, ExamId::JeeAdvanced];

    /// Stable identifier as persisted under `activeExam`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamId::JeeMain => "jee",
            ExamId::Neet => "neet",
            ExamId::JeeAdvanced => "jeeAdv",
            ExamId::Custom => "custom",
        }
    }

    /// Built-in display name. The custom exam's name lives in the store.
    pub fn display_name(&self) -> &'static str {
        match self {
            ExamId::JeeMain => "JEE Main",
            ExamId::Neet => "NEET",
            ExamId::JeeAdvanced => "JEE Advanced",
            ExamId::Custom => DEFAULT_CUSTOM_NAME,
        }
    }

    pub fn is_built_in(&self) -> bool {
        !matches!(self, ExamId::Custom)
    }

    /// Map a remote feed name ("JEE Main", "neet", ...) to a built-in.
    pub fn from_feed_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "jee main" => Some(ExamId::JeeMain),
            "neet" => Some(ExamId::Neet),
            "jee advanced" => Some(ExamId::JeeAdvanced),
            _ => None,
        }
    }
}

impl fmt::Display for ExamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ExamId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExamId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownExam(s.to_string()))
    }
}
