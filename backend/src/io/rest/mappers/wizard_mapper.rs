//! backend/src/io/rest/mappers/wizard_mapper.rs

use crate::domain::commands::attendance::{ChildEntry, WizardAction};
use crate::domain::models::Child as DomainChild;
use crate::domain::{WizardOutcome, WizardStep as DomainStep};
use shared::{
    AttendanceStepRequest, AttendanceView, Child as SharedChild, Flash, FlashCategory,
    WizardStep as SharedStep,
};

pub struct WizardMapper;

impl WizardMapper {
    pub fn to_action(request: AttendanceStepRequest) -> WizardAction {
        let entries = request
            .children
            .into_iter()
            .map(|entry| ChildEntry {
                name: entry.name,
                gender: entry.gender,
            })
            .collect();
        WizardAction::from_step(request.step.as_deref(), entries)
    }

    pub fn step_to_dto(step: DomainStep) -> SharedStep {
        match step {
            DomainStep::MarkParent => SharedStep::MarkParent,
            DomainStep::AskChildren => SharedStep::AskChildren,
            DomainStep::EnterChildren => SharedStep::EnterChildren,
            DomainStep::ThankYou => SharedStep::ThankYou,
        }
    }

    pub fn child_to_dto(child: DomainChild) -> SharedChild {
        SharedChild {
            parent_id: child.parent_id,
            name: child.name,
            gender: child.gender,
        }
    }

    pub fn to_view(outcome: WizardOutcome) -> AttendanceView {
        AttendanceView {
            step: Self::step_to_dto(outcome.step),
            children: outcome.children.into_iter().map(Self::child_to_dto).collect(),
            flash: outcome
                .notice
                .map(|notice| Flash::new(FlashCategory::Info, notice).redirect_to("/attendance")),
        }
    }
}
