//! Value Objects - Immutable, identity-less domain primitives

mod bar_number;
mod case_number;
mod case_status;
mod email_address;
mod ids;

pub use bar_number::BarNumber;
pub use case_number::CaseNumber;
pub use case_status::CaseStatus;
pub use email_address::EmailAddress;
pub use ids::{AttorneyId, CaseId, ClientId, CourtId, DeadlineId, DocumentId, JudgeId};
