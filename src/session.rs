//! One authoring session: an editor bound to a store.
//!
//! Exactly one author edits one graph per session; there is no merge
//! semantics. Loads swap the whole graph atomically once they resolve. A
//! load may be superseded by a later load for a different automation, in
//! which case the earlier result is discarded when it arrives
//! (last-requested-wins), enforced through `LoadTicket` generations so hosts
//! that fetch asynchronously cannot apply a stale graph.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tracing::{debug, warn};

use crate::{
    Result, ShareLock,
    editor::GraphEditor,
    model::AutomationModel,
    store::Store,
};

/// Generation token for one requested load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    automation_id: String,
    seq: u64,
}

impl LoadTicket {
    /// Automation this ticket was issued for.
    pub fn automation_id(&self) -> &str {
        &self.automation_id
    }
}

/// An authoring session over one automation.
pub struct Session {
    editor: Arc<GraphEditor>,
    store: Arc<Store>,
    /// Id the current graph is saved under.
    automation_id: ShareLock<String>,
    /// Generation counter for last-requested-wins loads.
    load_seq: AtomicU64,
}

impl Session {
    pub fn new(
        editor: Arc<GraphEditor>,
        store: Arc<Store>,
        automation_id: &str,
    ) -> Self {
        Self {
            editor,
            store,
            automation_id: ShareLock::new(automation_id.to_string().into()),
            load_seq: AtomicU64::new(0),
        }
    }

    pub fn editor(&self) -> &GraphEditor {
        &self.editor
    }

    /// Id the current graph is saved under.
    pub fn automation_id(&self) -> String {
        self.automation_id.read().unwrap().clone()
    }

    /// Saves the full `{nodes, edges, name}` snapshot.
    ///
    /// A failed save leaves the in-memory graph untouched and editable; a
    /// retry is simply another call.
    pub fn save(&self) -> Result<()> {
        let id = self.automation_id();
        let model = self.editor.graph().to_model(&id);
        self.store.save(&model)?;
        debug!("session::save({}) {} nodes, {} edges", id, model.nodes.len(), model.edges.len());
        Ok(())
    }

    /// Requests a load, superseding any load still in flight.
    pub fn request_load(
        &self,
        automation_id: &str,
    ) -> LoadTicket {
        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket {
            automation_id: automation_id.to_string(),
            seq,
        }
    }

    /// Fetches the model a ticket points at.
    pub fn fetch(
        &self,
        ticket: &LoadTicket,
    ) -> Result<AutomationModel> {
        self.store.load(&ticket.automation_id)
    }

    /// Applies a resolved load when its ticket is still the latest.
    ///
    /// Returns false when the ticket was superseded; the result is discarded
    /// and the current graph is left untouched.
    pub fn complete_load(
        &self,
        ticket: &LoadTicket,
        model: &AutomationModel,
    ) -> Result<bool> {
        if ticket.seq != self.load_seq.load(Ordering::SeqCst) {
            warn!("session: discarding superseded load of {}", ticket.automation_id);
            return Ok(false);
        }
        self.editor.replace(model)?;
        *self.automation_id.write().unwrap() = ticket.automation_id.clone();
        debug!("session::load({}) applied", ticket.automation_id);
        Ok(true)
    }

    /// Convenience synchronous load: request, fetch, and apply in one call.
    pub fn load(
        &self,
        automation_id: &str,
    ) -> Result<bool> {
        let ticket = self.request_load(automation_id);
        let model = self.fetch(&ticket)?;
        self.complete_load(&ticket, &model)
    }
}
