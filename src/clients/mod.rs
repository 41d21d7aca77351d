pub mod ai_api;
pub mod api_client;
pub mod profile_api;
pub mod question_api;
pub mod student_api;
pub mod teacher_api;

pub use ai_api::PdfUpload;
pub use api_client::{ApiClient, Session};
