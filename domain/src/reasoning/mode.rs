//! Reasoning mode value object

use serde::{Deserialize, Serialize};

/// Disciplines used to pad a multi-disciplinary request
pub const DEFAULT_DISCIPLINES: &[&str] = &["security", "performance", "usability", "maintainability"];

/// Minimum number of distinct disciplines in multi-disciplinary mode
pub const MIN_DISCIPLINES: usize = 2;

/// How a change is evaluated
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ReasoningMode {
    /// Thesis, antithesis and synthesis only
    #[default]
    Dialectical,
    /// Dialectical reasoning plus one perspective per discipline
    MultiDisciplinary { disciplines: Vec<String> },
}

impl ReasoningMode {
    pub fn multi_disciplinary<I, S>(disciplines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ReasoningMode::MultiDisciplinary {
            disciplines: disciplines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReasoningMode::Dialectical => "dialectical",
            ReasoningMode::MultiDisciplinary { .. } => "multi_disciplinary",
        }
    }

    pub fn is_multi_disciplinary(&self) -> bool {
        matches!(self, ReasoningMode::MultiDisciplinary { .. })
    }

    /// Disciplines to ask for a perspective, in request order.
    ///
    /// Labels are trimmed, lowercased and deduplicated. In multi-disciplinary
    /// mode the list is padded from [`DEFAULT_DISCIPLINES`] until it holds at
    /// least [`MIN_DISCIPLINES`] entries. Dialectical mode requests none.
    pub fn requested_disciplines(&self) -> Vec<String> {
        let ReasoningMode::MultiDisciplinary { disciplines } = self else {
            return Vec::new();
        };

        let mut requested: Vec<String> = Vec::new();
        for label in disciplines {
            let label = label.trim().to_lowercase();
            if !label.is_empty() && !requested.contains(&label) {
                requested.push(label);
            }
        }

        for fallback in DEFAULT_DISCIPLINES {
            if requested.len() >= MIN_DISCIPLINES {
                break;
            }
            if !requested.iter().any(|d| d == fallback) {
                requested.push(fallback.to_string());
            }
        }

        requested
    }
}

impl std::fmt::Display for ReasoningMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
