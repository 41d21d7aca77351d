pub mod catalog;
pub mod llm_service;
pub mod paper_service;
pub mod profile_gate;
pub mod study_generator;

pub use catalog::CatalogSession;
pub use llm_service::LlmService;
pub use paper_service::PaperService;
pub use profile_gate::{route_for, GateDecision, ProfileGate, Route};
pub use study_generator::StudyGenerator;
