use crate::shared::errors::RefreshError;

/// Result of one refresh cycle. The container has already been written by the
/// time this is returned; a failure here is informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Container now shows the rendered body
    Rendered { bytes: usize },
    /// Container now shows the error notice
    Failed(RefreshError),
}

impl RefreshOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RefreshOutcome::Rendered { .. })
    }

    pub fn error(&self) -> Option<&RefreshError> {
        match self {
            RefreshOutcome::Failed(err) => Some(err),
            RefreshOutcome::Rendered { .. } => None,
        }
    }
}

/// What a news container shows. An empty body is still fetched content and
/// must not read as "nothing loaded yet".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NewsPanel {
    #[default]
    Loading,
    Showing(String),
}

impl NewsPanel {
    pub fn showing(html: &str) -> Self {
        NewsPanel::Showing(html.to_string())
    }

    /// Markup to place in the container, `None` while still loading
    pub fn html(&self) -> Option<&str> {
        match self {
            NewsPanel::Loading => None,
            NewsPanel::Showing(html) => Some(html),
        }
    }
}
