#![forbid(unsafe_code)]

//! Selected-post detail list.

use sentiscope_core::{PostId, SelectionSet};

pub const HEADING: &str = "Selected Posts";
pub const EMPTY_MESSAGE: &str = "No posts selected.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailEntry {
    pub idx: PostId,
    pub text: String,
}

/// Display text of every selected post, most recently selected first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailList {
    entries: Vec<DetailEntry>,
}

impl DetailList {
    #[must_use]
    pub fn from_selection(selection: &SelectionSet) -> Self {
        Self {
            entries: selection
                .iter()
                .map(|post| DetailEntry {
                    idx: post.idx().clone(),
                    text: post.text().to_string(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn heading(&self) -> &'static str {
        HEADING
    }

    #[must_use]
    pub fn entries(&self) -> &[DetailEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Placeholder shown instead of entries when nothing is selected.
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_MESSAGE)
    }
}
