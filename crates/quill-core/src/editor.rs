//! Admin editor - which post is being edited and its unsaved draft.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AdminSession, NewPost, Post, PostChanges};
use crate::error::DomainError;
use crate::format;
use crate::store::PostStore;

/// Unsaved copy of a post's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    pub content: String,
    /// Empty means "no category".
    pub category: String,
}

impl Draft {
    fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            category: post.category.clone().unwrap_or_default(),
        }
    }

    fn category(&self) -> Option<String> {
        if self.category.trim().is_empty() {
            None
        } else {
            Some(self.category.clone())
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    /// Nothing selected; the draft, if filled in, becomes a new post.
    #[default]
    Idle,
    /// The draft holds edits to this post.
    Editing(Post),
}

/// Selection and draft state behind the admin form.
///
/// Draft changes never reach the store until [`Editor::save`].
#[derive(Debug, Clone, Default)]
pub struct Editor {
    state: EditorState,
    draft: Draft,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Id of the post being edited, if any.
    pub fn target(&self) -> Option<Uuid> {
        match &self.state {
            EditorState::Idle => None,
            EditorState::Editing(post) => Some(post.id),
        }
    }

    pub fn start_create(&mut self) {
        self.reset();
    }

    pub fn start_edit(&mut self, post: Post) {
        self.draft = Draft::from_post(&post);
        self.state = EditorState::Editing(post);
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.draft.category = category.into();
    }

    /// Run a toolbar action over the draft content and return the new content.
    pub fn apply_format(&mut self, start: usize, end: usize, tag: &str) -> &str {
        self.draft.content = format::apply_format(&self.draft.content, start, end, tag);
        &self.draft.content
    }

    /// Persist the draft: update the selected post, or create a new one.
    ///
    /// On success the editor returns to `Idle`. On failure nothing changes so
    /// the author can retry.
    pub async fn save(
        &mut self,
        session: &AdminSession,
        store: &PostStore,
    ) -> Result<Post, DomainError> {
        session.require()?;

        let saved = match self.target() {
            Some(id) => {
                let changes = PostChanges {
                    title: Some(self.draft.title.clone()),
                    content: Some(self.draft.content.clone()),
                    category: self.category_change(),
                };
                store.update(id, changes).await?
            }
            None => {
                let fields = NewPost {
                    title: self.draft.title.clone(),
                    content: self.draft.content.clone(),
                    category: self.draft.category(),
                };
                store.create(fields).await?
            }
        };

        self.reset();
        Ok(saved)
    }

    /// A post that has a category cannot lose it, so a blanked draft category
    /// is still sent and rejected by validation.
    fn category_change(&self) -> Option<String> {
        match &self.state {
            EditorState::Editing(post) if post.category.is_some() => {
                Some(self.draft.category.clone())
            }
            _ => self.draft.category(),
        }
    }

    fn reset(&mut self) {
        self.state = EditorState::Idle;
        self.draft = Draft::default();
    }
}
