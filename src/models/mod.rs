//! Domain records as the backend sends them (camelCase JSON).

pub mod auth;
pub mod doctor;
pub mod notification;
pub mod report;
pub mod session;

pub use auth::{AuthUser, CachedSession, Credentials, UserRole};
pub use doctor::{Doctor, DoctorDetailsUpdate, DoctorDraft, ProfilePicture, Specialization};
pub use notification::Notification;
pub use report::{FilterOptions, Pagination, ReportPage, ReportQuery, ReportSummary, RiskLevel, SessionReport, SessionReportDetails};
pub use session::{SessionQuery, SessionRecord};
