//! # Attendance Wizard
//!
//! The four-step attendance flow:
//!
//! ```text
//! MarkParent ──> AskChildren ──> EnterChildren ──> ThankYou
//!     ^  │
//!     └──┘ already marked today
//! ```
//!
//! Every transition happens inside one request, driven by the `step` the
//! client posts. Nothing is kept between requests except the session, so a
//! fresh request always starts again at `MarkParent`.

use chrono::{NaiveDateTime, Timelike};
use tracing::{debug, info};

use crate::domain::commands::attendance::{ChildEntry, WizardAction};
use crate::domain::errors::DomainResult;
use crate::domain::ledger_service::LedgerService;
use crate::domain::models::Child;
use crate::domain::roster_service::RosterService;

pub const ALREADY_MARKED_NOTICE: &str = "You have already marked attendance today.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    MarkParent,
    AskChildren,
    EnterChildren,
    ThankYou,
}

/// Where the wizard ended up after handling a request
#[derive(Debug, Clone, PartialEq)]
pub struct WizardOutcome {
    pub step: WizardStep,
    /// Known children of the parent, for pre-filling the next page
    pub children: Vec<Child>,
    /// Informational message for the user, if any
    pub notice: Option<String>,
}

impl WizardOutcome {
    fn at(step: WizardStep, children: Vec<Child>) -> Self {
        Self {
            step,
            children,
            notice: None,
        }
    }
}

#[derive(Clone)]
pub struct AttendanceWizard {
    roster: RosterService,
    ledger: LedgerService,
}

impl AttendanceWizard {
    pub fn new(roster: RosterService, ledger: LedgerService) -> Self {
        Self { roster, ledger }
    }

    /// The page shown on a plain GET
    pub async fn view(&self, parent_id: &str) -> DomainResult<WizardOutcome> {
        let children = self.roster.children_of(parent_id).await?;
        Ok(WizardOutcome::at(WizardStep::MarkParent, children))
    }

    /// Handle one posted step at time `now`
    pub async fn advance(
        &self,
        parent_id: &str,
        action: WizardAction,
        now: NaiveDateTime,
    ) -> DomainResult<WizardOutcome> {
        let now = now.with_nanosecond(0).unwrap_or(now);
        debug!("Wizard step {:?} for {}", action, parent_id);

        match action {
            WizardAction::MarkParent => self.mark_parent(parent_id, now).await,
            WizardAction::ChildrenResponse => {
                let children = self.roster.children_of(parent_id).await?;
                Ok(WizardOutcome::at(WizardStep::EnterChildren, children))
            }
            WizardAction::SubmitChildren(entries) => {
                self.submit_children(parent_id, entries, now).await
            }
            WizardAction::Show => self.view(parent_id).await,
        }
    }

    async fn mark_parent(&self, parent_id: &str, now: NaiveDateTime) -> DomainResult<WizardOutcome> {
        let children = self.roster.children_of(parent_id).await?;

        if self.ledger.has_marked_today(parent_id, now.date()).await? {
            info!("{} already marked attendance on {}", parent_id, now.date());
            return Ok(WizardOutcome {
                step: WizardStep::MarkParent,
                children,
                notice: Some(ALREADY_MARKED_NOTICE.to_string()),
            });
        }

        self.ledger.mark_self(parent_id, now).await?;
        Ok(WizardOutcome::at(WizardStep::AskChildren, children))
    }

    async fn submit_children(
        &self,
        parent_id: &str,
        entries: Vec<ChildEntry>,
        now: NaiveDateTime,
    ) -> DomainResult<WizardOutcome> {
        let mut recorded = 0;

        for entry in entries {
            let name = entry.name.trim();
            if name.is_empty() {
                continue;
            }

            self.roster.add_if_new(parent_id, name, &entry.gender).await?;
            // Recorded even when the child was already on the roster
            self.ledger.mark_child(parent_id, name, now).await?;
            recorded += 1;
        }

        info!("Recorded {} children for {}", recorded, parent_id);
        Ok(WizardOutcome::at(WizardStep::ThankYou, Vec::new()))
    }
}
