//! The set of workers in play

use std::collections::HashSet;

use super::worker::Worker;
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::reactive::Scope;
use crate::settings::WorkerDef;

/// Workers in definition order. Ids are unique, so storage keys never collide.
#[derive(Debug, Default)]
pub struct Roster {
    workers: Vec<Worker>,
}

impl Roster {
    pub fn new(ctx: &AppContext, scope: &Scope, defs: &[WorkerDef]) -> Result<Self> {
        let mut seen = HashSet::new();
        if let Some(dup) = defs.iter().find(|d| !seen.insert(d.id.as_str())) {
            return Err(Error::DuplicateWorker(dup.id.clone()));
        }

        let workers = defs
            .iter()
            .map(|def| Worker::from_def(ctx, scope, def))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("Roster built with {} workers", workers.len());

        Ok(Self { workers })
    }

    pub fn get(&self, id: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id() == id)
    }

    /// Like `get`, but a missing id is an error
    pub fn require(&self, id: &str) -> Result<&Worker> {
        self.get(id)
            .ok_or_else(|| Error::UnknownWorker(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Worker> {
        self.workers.iter()
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Decimal;
    use crate::platform::MemoryStorage;
    use std::rc::Rc;

    fn def(id: &str) -> WorkerDef {
        WorkerDef::new(id, id, format!("{id}s"), Decimal::from(10), Decimal::from(1))
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let ctx = AppContext::new(Rc::new(MemoryStorage::new()));
        let scope = Scope::new();
        let err = Roster::new(&ctx, &scope, &[def("wood"), def("stone"), def("wood")]).unwrap_err();
        assert!(matches!(err, Error::DuplicateWorker(ref id) if id == "wood"));
    }

    #[test]
    fn test_lookup_keeps_order() {
        let ctx = AppContext::new(Rc::new(MemoryStorage::new()));
        let scope = Scope::new();
        let roster = Roster::new(&ctx, &scope, &[def("wood"), def("stone")]).unwrap();
        scope.mount().unwrap();

        let ids: Vec<_> = roster.iter().map(Worker::id).collect();
        assert_eq!(ids, vec!["wood", "stone"]);
        assert_eq!(roster.len(), 2);
        assert!(roster.get("stone").is_some());
        assert!(matches!(roster.require("clay"), Err(Error::UnknownWorker(_))));
    }
}
