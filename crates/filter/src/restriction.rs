//! Restriction configuration and matching.

use serde::Deserialize;

/// Which actions a filter applies to.
///
/// Deserializes from `applies_to` / `excludes`, or their aliases
/// `only` / `except`. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Restriction {
    /// Actions the filter runs for. Empty means every action.
    #[serde(default, alias = "only")]
    pub applies_to: Vec<String>,

    /// Actions the filter never runs for (overrides `applies_to`).
    #[serde(default, alias = "except")]
    pub excludes: Vec<String>,
}

/// Result of matching an action against a restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Run,
    Skip { reason: String },
}

impl Decision {
    pub fn runs(&self) -> bool {
        matches!(self, Decision::Run)
    }
}

impl Restriction {
    /// A restriction that matches every action.
    pub fn all() -> Self {
        Self::default()
    }

    /// Run only for the given actions.
    pub fn only<I, S>(actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            applies_to: actions.into_iter().map(Into::into).collect(),
            excludes: Vec::new(),
        }
    }

    /// Run for every action except the given ones.
    pub fn except<I, S>(actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            applies_to: Vec::new(),
            excludes: actions.into_iter().map(Into::into).collect(),
        }
    }

    /// Add actions to the deny-list.
    pub fn excluding<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(actions.into_iter().map(Into::into));
        self
    }

    /// Decide whether a filter with this restriction runs for `action`.
    pub fn check(&self, action: &str) -> Decision {
        if self.excludes.iter().any(|a| a == action) {
            return Decision::Skip {
                reason: format!("'{action}' is excluded"),
            };
        }

        if !self.applies_to.is_empty() && !self.applies_to.iter().any(|a| a == action) {
            return Decision::Skip {
                reason: format!("'{action}' not in [{}]", self.applies_to.join(", ")),
            };
        }

        Decision::Run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_runs_everywhere() {
        let restriction = Restriction::all();
        assert!(restriction.check("index").runs());
        assert!(restriction.check("show").runs());
    }

    #[test]
    fn test_only() {
        let restriction = Restriction::only(["show"]);
        assert!(restriction.check("show").runs());
        assert_eq!(
            restriction.check("index"),
            Decision::Skip {
                reason: "'index' not in [show]".into()
            }
        );
    }

    #[test]
    fn test_except() {
        let restriction = Restriction::except(["edit", "update"]);
        assert!(restriction.check("show").runs());
        assert!(!restriction.check("edit").runs());
        assert!(!restriction.check("update").runs());
    }

    #[test]
    fn test_excludes_wins_over_applies_to() {
        let restriction = Restriction::only(["show", "edit"]).excluding(["edit"]);
        assert!(restriction.check("show").runs());
        assert!(!restriction.check("edit").runs());
        assert!(!restriction.check("index").runs());
    }
}
