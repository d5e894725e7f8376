pub mod attendance;
pub mod child;
pub mod session;
pub mod user;

pub use attendance::AttendanceEvent;
pub use child::Child;
pub use session::Session;
pub use user::{Role, User};
