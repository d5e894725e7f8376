use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::models::AttendanceEvent;
use crate::storage::RecordStore;

/// Append-only attendance ledger
///
/// The ledger does not deduplicate; keeping one parent-presence event per day
/// is the wizard's job.
#[derive(Clone)]
pub struct LedgerService {
    events: Arc<dyn RecordStore<AttendanceEvent>>,
}

impl LedgerService {
    pub fn new(events: Arc<dyn RecordStore<AttendanceEvent>>) -> Self {
        Self { events }
    }

    pub async fn initialize(&self) -> DomainResult<()> {
        self.events.initialize().await?;
        Ok(())
    }

    /// Record the parent's own presence
    pub async fn mark_self(&self, id: &str, timestamp: NaiveDateTime) -> DomainResult<AttendanceEvent> {
        let event = AttendanceEvent::parent(id, timestamp);
        self.events.append(&event).await?;

        info!("Marked attendance for {} at {}", id, timestamp);
        Ok(event)
    }

    /// Record a child's presence under the parent's id
    pub async fn mark_child(
        &self,
        id: &str,
        child_name: &str,
        timestamp: NaiveDateTime,
    ) -> DomainResult<AttendanceEvent> {
        let event = AttendanceEvent::child(id, child_name, timestamp);
        self.events.append(&event).await?;

        info!("Marked attendance for child {} of {} at {}", child_name, id, timestamp);
        Ok(event)
    }

    /// True iff `id` has a parent-presence event dated `today`
    pub async fn has_marked_today(&self, id: &str, today: NaiveDate) -> DomainResult<bool> {
        let events = self.events.read_all().await?;
        Ok(events
            .iter()
            .any(|event| event.id == id && event.is_parent_presence() && event.date() == today))
    }

    /// Every event in file order, for admin review
    pub async fn all(&self) -> DomainResult<Vec<AttendanceEvent>> {
        Ok(self.events.read_all().await?)
    }
}
