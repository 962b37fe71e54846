//! Sidebar composer: a scratch entry that turns into a journal node plus
//! its platform drafts.

use crate::session::CanvasSession;
use euclid_core::id::NodeId;
use euclid_core::store::StoreError;

#[derive(Debug, Default, Clone)]
pub struct SidebarComposer {
    entry: String,
}

impl SidebarComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn set_entry(&mut self, text: impl Into<String>) {
        self.entry = text.into();
    }

    pub fn can_process(&self) -> bool {
        !self.entry.trim().is_empty()
    }

    /// Hand the entry to `session` ("Process Entry" or Shift+Enter). Blank
    /// entries are ignored and kept as typed; otherwise the entry clears.
    pub fn process(&mut self, session: &mut CanvasSession) -> Result<Option<NodeId>, StoreError> {
        if !self.can_process() {
            return Ok(None);
        }
        let id = session.process_entry(&self.entry)?;
        self.entry.clear();
        Ok(Some(id))
    }
}
