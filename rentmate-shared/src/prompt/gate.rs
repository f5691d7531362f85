/// Whether the evaluator should run for `current_user_id`.
///
/// A different user than the last one checked always forces a re-check;
/// otherwise the evaluator runs only if this user has not been checked yet.
pub fn should_evaluate(
    current_user_id: &str,
    last_checked_user_id: Option<&str>,
    has_checked_tags: bool,
) -> bool {
    last_checked_user_id != Some(current_user_id) || !has_checked_tags
}

/// Per-mount memory of which user the evaluator last ran for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckGate {
    last_checked_user_id: Option<String>,
    has_checked_tags: bool,
}

impl CheckGate {
    /// A gate that has not checked anyone.
    pub fn new() -> Self {
        Self::default()
    }

    /// [`should_evaluate`] against what this gate has recorded.
    pub fn should_evaluate(&self, current_user_id: &str) -> bool {
        should_evaluate(
            current_user_id,
            self.last_checked_user_id.as_deref(),
            self.has_checked_tags,
        )
    }

    /// Whether `current_user_id` differs from a previously checked user.
    pub fn is_new_user(&self, current_user_id: &str) -> bool {
        self.last_checked_user_id
            .as_deref()
            .is_some_and(|last| last != current_user_id)
    }

    /// Marks `current_user_id` as checked.
    pub fn record(&mut self, current_user_id: &str) {
        self.last_checked_user_id = Some(current_user_id.to_string());
        self.has_checked_tags = true;
    }

    /// Id of the user last recorded, if any.
    pub fn last_checked_user_id(&self) -> Option<&str> {
        self.last_checked_user_id.as_deref()
    }

    /// Whether any evaluation has been recorded.
    pub fn has_checked_tags(&self) -> bool {
        self.has_checked_tags
    }
}
