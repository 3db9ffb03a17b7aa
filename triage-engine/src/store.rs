//! Swappable handle to the active knowledge base.

use std::sync::Arc;

use parking_lot::RwLock;
use triage_core::{CareReport, PatientInput, TriageConfig};

use crate::coordinator;
use crate::knowledge::KnowledgeBase;

/// Readers take an `Arc` snapshot; writers replace the whole table, so an
/// analysis never sees a partially updated knowledge base.
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    current: Arc<RwLock<Arc<KnowledgeBase>>>,
}

impl KnowledgeStore {
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(knowledge))),
        }
    }

    pub fn snapshot(&self) -> Arc<KnowledgeBase> {
        Arc::clone(&self.current.read())
    }

    /// Install `knowledge` and return the table it replaced.
    pub fn replace(&self, knowledge: KnowledgeBase) -> Arc<KnowledgeBase> {
        let incoming = Arc::new(knowledge);
        let conditions = incoming.len();
        let previous = std::mem::replace(&mut *self.current.write(), incoming);
        log::info!("knowledge base replaced ({conditions} conditions)");
        previous
    }

    pub fn analyze(&self, patient: &PatientInput, config: &TriageConfig) -> CareReport {
        let knowledge = self.snapshot();
        coordinator::analyze(&knowledge, patient, config)
    }
}

impl Default for KnowledgeStore {
    fn default() -> Self {
        Self::new(KnowledgeBase::builtin())
    }
}
