use std::time::Instant;

use selwait_core_types::ActionId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug)]
pub struct ExecCtx {
    pub action_id: ActionId,
    /// Result of the previous command in the chain, if any.
    pub last_result: Option<LastResult>,
}

impl ExecCtx {
    pub fn new(action_id: ActionId) -> Self {
        Self {
            action_id,
            last_result: None,
        }
    }

    pub fn with_last_result(mut self, selector: impl Into<String>) -> Self {
        self.last_result = Some(LastResult {
            selector: selector.into(),
        });
        self
    }

    pub fn last_selector(&self) -> Option<&str> {
        self.last_result
            .as_ref()
            .map(|last| last.selector.as_str())
            .filter(|selector| !selector.is_empty())
    }
}

impl Default for ExecCtx {
    fn default() -> Self {
        Self::new(ActionId::new())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct LastResult {
    pub selector: String,
}

/// Selection/check state reported for the elements a selector matched.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionQuery {
    Single(bool),
    Many(Vec<bool>),
}

impl SelectionQuery {
    /// Whether the reported state ends the wait.
    ///
    /// Sequences fold from `reverse`: OR when waiting for a selection, AND
    /// when waiting for it to clear. An empty sequence never ends the wait.
    pub fn satisfies(&self, reverse: bool) -> bool {
        match self {
            SelectionQuery::Single(selected) => *selected != reverse,
            SelectionQuery::Many(values) => {
                let folded = values.iter().fold(reverse, |acc, &selected| {
                    if reverse {
                        acc && selected
                    } else {
                        acc || selected
                    }
                });
                folded != reverse
            }
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct WaitSelectedParams {
    /// Forwarded verbatim to the state port. `None` targets the element the
    /// command is bound to.
    pub selector: Option<String>,
    /// `None` falls back to the configured default. Kept as given so the
    /// timeout message reports the caller's value; negatives poll once.
    pub timeout_ms: Option<i64>,
    /// Wait for the unselected/unchecked state instead.
    pub reverse: bool,
}

impl WaitSelectedParams {
    /// `(selector, ms, reverse)` call shape.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: Some(selector.into()),
            timeout_ms: None,
            reverse: false,
        }
    }

    /// Element-bound call shape `(ms, reverse)`: no selector. Chain
    /// `with_timeout_ms` for an explicit budget.
    pub fn bound(reverse: bool) -> Self {
        Self {
            selector: None,
            timeout_ms: None,
            reverse,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: i64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }
}

#[derive(Clone, Debug)]
pub struct ActionReport {
    pub ok: bool,
    pub started_at: Instant,
    pub finished_at: Instant,
    pub latency_ms: u128,
    pub attempts: u32,
}

impl ActionReport {
    pub fn new(started_at: Instant) -> Self {
        Self {
            ok: false,
            started_at,
            finished_at: started_at,
            latency_ms: 0,
            attempts: 0,
        }
    }

    pub fn finish(mut self, finished_at: Instant) -> Self {
        self.finished_at = finished_at;
        self.latency_ms = finished_at
            .saturating_duration_since(self.started_at)
            .as_millis();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value_follows_polarity() {
        assert!(SelectionQuery::Single(true).satisfies(false));
        assert!(!SelectionQuery::Single(false).satisfies(false));
        assert!(SelectionQuery::Single(false).satisfies(true));
        assert!(!SelectionQuery::Single(true).satisfies(true));
    }

    #[test]
    fn any_selected_element_ends_forward_wait() {
        let query = SelectionQuery::Many(vec![false, false, true]);
        assert!(query.satisfies(false));
        assert!(!SelectionQuery::Many(vec![false, false]).satisfies(false));
    }

    #[test]
    fn reversed_fold_is_conjunction() {
        assert!(!SelectionQuery::Many(vec![true, true]).satisfies(true));
        assert!(SelectionQuery::Many(vec![false, false]).satisfies(true));
        // AND-fold drops to false as soon as one element is unselected.
        assert!(SelectionQuery::Many(vec![true, false]).satisfies(true));
    }

    #[test]
    fn empty_sequence_never_satisfies() {
        assert!(!SelectionQuery::Many(Vec::new()).satisfies(false));
        assert!(!SelectionQuery::Many(Vec::new()).satisfies(true));
    }

    #[test]
    fn query_decodes_both_shapes() {
        let single: SelectionQuery = serde_json::from_str("true").expect("bool decodes");
        assert_eq!(single, SelectionQuery::Single(true));
        let many: SelectionQuery = serde_json::from_str("[false, true]").expect("array decodes");
        assert_eq!(many, SelectionQuery::Many(vec![false, true]));
    }

    #[test]
    fn last_selector_ignores_empty_values() {
        let ctx = ExecCtx::default().with_last_result("");
        assert_eq!(ctx.last_selector(), None);
        let ctx = ExecCtx::default().with_last_result("#opt");
        assert_eq!(ctx.last_selector(), Some("#opt"));
    }
}
