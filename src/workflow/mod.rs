pub mod study_pipeline;

pub use study_pipeline::{PipelineOutcome, PipelineStage, StageFailure, StudyPipeline};
