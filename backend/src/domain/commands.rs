// backend/src/domain/commands.rs

//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the DTOs defined in the
//! `shared` crate to these internal types.

pub mod users {
    /// Input for registering a new account.
    #[derive(Debug, Clone)]
    pub struct RegisterUserCommand {
        pub user_id: String,
        pub email: String,
        pub password: String,
        pub gender: String,
    }

    /// Input for an admin role assignment. Both fields are raw form input.
    #[derive(Debug, Clone, Default)]
    pub struct AssignRoleCommand {
        pub user_id: Option<String>,
        pub role: Option<String>,
    }
}

pub mod session {
    /// Input for a login attempt.
    #[derive(Debug, Clone)]
    pub struct LoginCommand {
        pub user_id: String,
        pub password: String,
        /// Empty when no admin key was supplied
        pub admin_key: String,
    }
}

pub mod attendance {
    /// One (name, gender) pair from the children form.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ChildEntry {
        pub name: String,
        pub gender: String,
    }

    /// What a POST to the attendance page asks the wizard to do.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum WizardAction {
        /// `mark_parent`, also used when no step is given
        MarkParent,
        /// `children_response`
        ChildrenResponse,
        /// `submit_children`
        SubmitChildren(Vec<ChildEntry>),
        /// Any unrecognised step; shows the default view
        Show,
    }

    impl WizardAction {
        /// Map the raw `step` form value onto an action
        pub fn from_step(step: Option<&str>, children: Vec<ChildEntry>) -> Self {
            match step.map(str::trim) {
                None | Some("mark_parent") => WizardAction::MarkParent,
                Some("children_response") => WizardAction::ChildrenResponse,
                Some("submit_children") => WizardAction::SubmitChildren(children),
                Some(_) => WizardAction::Show,
            }
        }
    }

}
