//! Drawer form state shared by the create and edit flows.

use crate::domain::{EntityId, Stamped};

/// Editable draft behaviour an entity's fields expose to the drawer.
pub trait Draft: Clone + Default {
    /// Normalise free-text fields (trim whitespace and the like) before
    /// validation and submission.
    #[must_use]
    fn sanitised(self) -> Self {
        self
    }

    /// Whether the sanitised draft satisfies the form's required fields.
    fn is_submittable(&self) -> bool;
}

/// A validated submission handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerSubmission<D> {
    /// The sanitised draft to create or merge.
    pub draft: D,
    /// The record being edited, or `None` for the create flow.
    pub target: Option<EntityId>,
}

/// Headless drawer form: one instance serves both create and edit.
///
/// Opening for edit re-derives the draft from the record's current fields,
/// so stale edits from an earlier opening never leak through. Submission is
/// silently refused while the draft fails validation; there is no error
/// state to clear.
#[derive(Debug, Clone, Default)]
pub struct DrawerForm<D> {
    draft: Option<D>,
    target: Option<EntityId>,
}

impl<D: Draft> DrawerForm<D> {
    /// A closed drawer.
    #[must_use]
    pub const fn closed() -> Self {
        Self {
            draft: None,
            target: None,
        }
    }

    /// Open with a blank draft for the create flow.
    pub fn open_create(&mut self) {
        self.draft = Some(D::default());
        self.target = None;
    }

    /// Open for editing, deriving the draft from `record`'s fields.
    pub fn open_edit(&mut self, record: &Stamped<D>) {
        self.draft = Some(record.fields().clone());
        self.target = Some(record.id().clone());
    }

    /// Close, discarding any draft.
    pub fn close(&mut self) {
        self.draft = None;
        self.target = None;
    }

    /// Whether the drawer is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// The record under edit, or `None` when creating.
    #[must_use]
    pub const fn target(&self) -> Option<&EntityId> {
        self.target.as_ref()
    }

    /// The live draft, for rendering.
    #[must_use]
    pub const fn draft(&self) -> Option<&D> {
        self.draft.as_ref()
    }

    /// The live draft, for binding form inputs.
    pub const fn draft_mut(&mut self) -> Option<&mut D> {
        self.draft.as_mut()
    }

    /// Sanitise and validate the draft, yielding a submission when valid.
    ///
    /// Returns `None`, without closing or signalling, when the drawer is
    /// closed or the draft fails validation.
    #[must_use]
    pub fn submit(&self) -> Option<DrawerSubmission<D>> {
        let draft = self.draft.clone()?.sanitised();
        draft.is_submittable().then(|| DrawerSubmission {
            draft,
            target: self.target.clone(),
        })
    }
}
