pub mod artifact;
pub mod filter;
pub mod loaders;
pub mod paper;
pub mod profile;
pub mod question;

pub use artifact::{
    ArtifactKind, Flashcard, LectureOutline, MindMap, ProcessedPdf, QuizQuestion, SavedArtifact,
    StudyBundle,
};
pub use filter::{FilterField, QuestionFilter};
pub use loaders::{load_all_toml_files, load_toml_to_paper_spec};
pub use paper::{PaperCreate, PaperItem, PaperMeta, PaperRecord, PaperSpec};
pub use profile::{Category, Profile, ProfileCreate, Role};
pub use question::{
    Difficulty, Question, QuestionDraft, QuestionListResponse, QuestionType, QuestionUpdate,
};
