#![forbid(unsafe_code)]

//! Most-recent-first selection store.
//!
//! Membership is decided by [`PostId`] equality, never by which `Post` value
//! was handed in, so a post re-read from a reloaded file still matches its
//! earlier selection.

use crate::dataset::Dataset;
use crate::post::{Post, PostId};

/// Result of [`SelectionSet::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Selected,
    Deselected,
}

/// Ordered set of selected posts, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    posts: Vec<Post>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the post if one with the same `idx` is present, otherwise
    /// prepend it.
    pub fn toggle(&mut self, post: &Post) -> Toggle {
        if let Some(pos) = self.position(post.idx()) {
            self.posts.remove(pos);
            Toggle::Deselected
        } else {
            self.posts.insert(0, post.clone());
            Toggle::Selected
        }
    }

    /// Remove by identifier; returns whether anything was removed.
    pub fn remove(&mut self, idx: &PostId) -> bool {
        match self.position(idx) {
            Some(pos) => {
                self.posts.remove(pos);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, idx: &PostId) -> bool {
        self.position(idx).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter()
    }

    /// Selected identifiers, newest first.
    pub fn ids(&self) -> impl Iterator<Item = &PostId> {
        self.posts.iter().map(Post::idx)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn clear(&mut self) {
        self.posts.clear();
    }

    /// Reconcile with a freshly loaded dataset.
    ///
    /// Entries whose `idx` still exists keep their position and pick up the
    /// new post data; entries whose `idx` is gone are dropped. Returns the
    /// number of dropped entries.
    pub fn retain_present(&mut self, dataset: &Dataset) -> usize {
        let before = self.posts.len();
        self.posts = self
            .posts
            .iter()
            .filter_map(|post| dataset.get(post.idx()).cloned())
            .collect();
        before - self.posts.len()
    }

    fn position(&self, idx: &PostId) -> Option<usize> {
        self.posts.iter().position(|p| p.idx() == idx)
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a Post;
    type IntoIter = std::slice::Iter<'a, Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::PostRecord;

    fn post(idx: i64, raw: &str) -> Post {
        Post::from(PostRecord::new(idx, raw, "Jan"))
    }

    #[test]
    fn toggle_new_post_prepends() {
        let mut set = SelectionSet::new();
        assert_eq!(set.toggle(&post(1, "a")), Toggle::Selected);
        assert_eq!(set.toggle(&post(2, "b")), Toggle::Selected);
        let ids: Vec<_> = set.ids().cloned().collect();
        assert_eq!(ids, vec![PostId::Int(2), PostId::Int(1)]);
    }

    #[test]
    fn double_toggle_restores_original_state() {
        let mut set = SelectionSet::new();
        set.toggle(&post(1, "a"));
        let original = set.clone();
        set.toggle(&post(2, "b"));
        set.toggle(&post(2, "b"));
        assert_eq!(set, original);
    }

    #[test]
    fn membership_uses_idx_not_identity() {
        let mut set = SelectionSet::new();
        set.toggle(&post(5, "first capture"));
        // Different value, same idx: deselects.
        assert!(set.contains(&PostId::Int(5)));
        assert_eq!(set.toggle(&post(5, "other text")), Toggle::Deselected);
        assert!(set.is_empty());
    }

    #[test]
    fn remove_by_idx() {
        let mut set = SelectionSet::new();
        set.toggle(&post(1, "a"));
        assert!(set.remove(&PostId::Int(1)));
        assert!(!set.remove(&PostId::Int(1)));
    }

    #[test]
    fn retain_present_refreshes_and_prunes() {
        let mut set = SelectionSet::new();
        set.toggle(&post(1, "b'old'"));
        set.toggle(&post(2, "b'gone'"));

        let (dataset, _) = Dataset::from_records(vec![
            PostRecord::new(1, "b'new'", "Feb"),
            PostRecord::new(3, "b'other'", "Feb"),
        ])
        .unwrap();

        assert_eq!(set.retain_present(&dataset), 1);
        let kept: Vec<_> = set.iter().collect();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text(), "new");
        assert_eq!(kept[0].month(), "Feb");
    }
}
