pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{DashboardStats, Material, RecentMaterial, Subject, SubjectDetails, Summary};
pub use errors::StudyError;
pub use ports::{
  ExtractionError, FileStorage, MaterialRepository, StorageError, SubjectRepository, Summarizer,
  SummaryRepository, TextExtractor,
};
pub use services::{GenerateSummaryData, StudyConfig, StudyService, UploadedFile};
pub use value_objects::{FileSize, PageRequest, SubjectName, SummaryContent, SummaryTitle};
