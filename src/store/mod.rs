pub mod paper_draft;

pub use paper_draft::PaperDraft;
