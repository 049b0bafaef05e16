//! Backend resource paths.

pub const ADMIN_LOGIN: &str = "/api/auth/login";
pub const DOCTOR_LOGIN: &str = "/api/auth/doctor-login";

pub const DOCTORS: &str = "/api/doctor/get-all-therapist";
pub const SPECIALIZATIONS: &str = "/api/admin/get-specialization";
pub const CREATE_DOCTOR: &str = "/api/doctor/create-Doctor";

pub const SESSIONS: &str = "/api/management/sessions";

pub const REPORTS: &str = "/api/reports";
pub const REPORT_FILTERS: &str = "/api/reports/filters";

pub fn doctor(id: i64) -> String {
    format!("/api/doctor/get-therapists/{}", id)
}

pub fn update_doctor_details(id: i64) -> String {
    format!("/api/doctor/update-therapists/details/{}", id)
}

pub fn delete_doctor(id: i64) -> String {
    format!("/api/doctor/delete-therapist/{}", id)
}

pub fn session(id: i64) -> String {
    format!("{}/{}", SESSIONS, id)
}

pub fn report(id: i64) -> String {
    format!("{}/{}", REPORTS, id)
}

pub fn notifications(user_id: &str) -> String {
    format!("/api/doctor/me/notifications/{}", user_id)
}

pub fn mark_notification_read(notification_id: i64, user_id: &str) -> String {
    format!("/api/doctor/notifications/{}/read/{}", notification_id, user_id)
}
