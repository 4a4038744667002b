//! Study use cases: subjects, materials, summaries and the dashboard

mod create_subject;
mod create_summary;
mod delete_material;
mod delete_subject;
mod delete_summary;
mod generate_summary;
mod get_dashboard_stats;
mod get_material_file;
mod get_subject_details;
mod get_summary;
mod list_materials;
mod list_recent_materials;
mod list_subjects;
mod list_summaries;
mod responses;
mod update_subject;
mod update_summary;
mod upload_material;

pub use create_subject::{CreateSubjectCommand, CreateSubjectUseCase};
pub use create_summary::{CreateSummaryCommand, CreateSummaryUseCase};
pub use delete_material::DeleteMaterialUseCase;
pub use delete_subject::DeleteSubjectUseCase;
pub use delete_summary::DeleteSummaryUseCase;
pub use generate_summary::{GenerateSummaryCommand, GenerateSummaryUseCase};
pub use get_dashboard_stats::{DashboardStatsResponse, GetDashboardStatsUseCase};
pub use get_material_file::{GetMaterialFileUseCase, MaterialFileResponse};
pub use get_subject_details::{
  GetSubjectDetailsCommand, GetSubjectDetailsUseCase, SubjectDetailsResponse,
};
pub use get_summary::GetSummaryUseCase;
pub use list_materials::ListMaterialsUseCase;
pub use list_recent_materials::ListRecentMaterialsUseCase;
pub use list_subjects::ListSubjectsUseCase;
pub use list_summaries::ListSummariesUseCase;
pub use responses::{MaterialResponse, RecentMaterialResponse, SubjectResponse, SummaryResponse};
pub use update_subject::{UpdateSubjectCommand, UpdateSubjectUseCase};
pub use update_summary::{UpdateSummaryCommand, UpdateSummaryUseCase};
pub use upload_material::{UploadMaterialCommand, UploadMaterialUseCase};
