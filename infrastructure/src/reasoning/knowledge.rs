//! Built-in discipline knowledge for the offline provider

/// What one discipline looks for in a change description
#[derive(Debug, Clone, Copy)]
pub struct DisciplineKnowledge {
    pub discipline: &'static str,
    /// Terms whose presence counts in the change's favour
    pub strengths: &'static [&'static str],
    /// Practices recommended when the description does not mention them
    pub best_practices: &'static [&'static str],
    /// `(term, reason)` pairs that make the discipline object outright
    pub red_flags: &'static [(&'static str, &'static str)],
}

impl DisciplineKnowledge {
    /// Knowledge for `discipline`, or a neutral entry for unknown ones
    pub fn lookup(discipline: &str) -> DisciplineKnowledge {
        KNOWLEDGE
            .iter()
            .find(|k| k.discipline == discipline)
            .copied()
            .unwrap_or(DisciplineKnowledge {
                discipline: "general",
                strengths: &[],
                best_practices: &["tests", "documentation"],
                red_flags: &[],
            })
    }

    /// First red flag mentioned in `text` (already lowercased)
    pub fn red_flag(&self, text: &str) -> Option<&'static str> {
        self.red_flags
            .iter()
            .find(|(term, _)| text.contains(term))
            .map(|(_, reason)| *reason)
    }

    pub fn strengths_in(&self, text: &str) -> Vec<&'static str> {
        self.strengths
            .iter()
            .copied()
            .filter(|s| text.contains(s))
            .collect()
    }

    pub fn missing_practices(&self, text: &str) -> Vec<&'static str> {
        self.best_practices
            .iter()
            .copied()
            .filter(|p| !text.contains(p))
            .collect()
    }
}

const KNOWLEDGE: &[DisciplineKnowledge] = &[
    DisciplineKnowledge {
        discipline: "security",
        strengths: &["encrypt", "authentication", "authorization", "audit", "validation"],
        best_practices: &["input validation", "least privilege", "encryption"],
        red_flags: &[
            ("plaintext", "stores or transmits secrets in plaintext"),
            ("disable auth", "removes an authentication check"),
            ("hardcoded password", "embeds credentials in source"),
            ("eval(", "executes untrusted input"),
        ],
    },
    DisciplineKnowledge {
        discipline: "performance",
        strengths: &["cache", "batch", "index", "async", "stream"],
        best_practices: &["benchmark", "profiling", "caching"],
        red_flags: &[
            ("full table scan", "scans the whole table on a hot path"),
            ("busy wait", "spins a CPU while waiting"),
        ],
    },
    DisciplineKnowledge {
        discipline: "usability",
        strengths: &["simple", "consistent", "feedback", "default", "help"],
        best_practices: &["user feedback", "sensible defaults", "clear error messages"],
        red_flags: &[("remove undo", "takes away the user's ability to recover")],
    },
    DisciplineKnowledge {
        discipline: "maintainability",
        strengths: &["refactor", "test", "document", "module", "interface"],
        best_practices: &["tests", "documentation", "small modules"],
        red_flags: &[("copy-paste", "duplicates logic instead of sharing it")],
    },
    DisciplineKnowledge {
        discipline: "accessibility",
        strengths: &["screen reader", "contrast", "keyboard", "aria"],
        best_practices: &["keyboard navigation", "screen reader labels"],
        red_flags: &[("mouse only", "excludes keyboard users")],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_and_unknown() {
        assert_eq!(DisciplineKnowledge::lookup("security").discipline, "security");
        let general = DisciplineKnowledge::lookup("astrology");
        assert_eq!(general.discipline, "general");
        assert!(general.red_flags.is_empty());
    }

    #[test]
    fn test_red_flags_and_practices() {
        let security = DisciplineKnowledge::lookup("security");
        let text = "log the api token in plaintext for debugging";
        assert_eq!(
            security.red_flag(text),
            Some("stores or transmits secrets in plaintext")
        );
        assert_eq!(security.missing_practices(text).len(), 3);
        assert!(security.red_flag("add audit trail").is_none());
        assert_eq!(security.strengths_in("add audit trail"), vec!["audit"]);
    }
}
