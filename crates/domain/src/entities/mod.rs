//! Domain entities - Objects with identity and lifecycle

mod attorney;
mod client;
mod court;
mod deadline;
mod document;
mod judge;
mod legal_case;

pub use attorney::Attorney;
pub use client::Client;
pub use court::Court;
pub use deadline::Deadline;
pub use document::Document;
pub use judge::Judge;
pub use legal_case::Case;
