//! Doctor roster (admin portal).

use crate::config::endpoints;
use crate::error::ApiError;
use crate::models::{Doctor, DoctorDetailsUpdate, DoctorDraft, Specialization};
use crate::reactive::{RequestSequence, StateContainer};
use crate::service::{ApiClient, DraftValidator};
use crate::stores::resource::{RemoteResource, ResourceSnapshot};
use crate::stores::{AuthStore, Store};
use crate::transport::ApiRequest;
use std::sync::Arc;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DoctorsSnapshot {
    pub doctors: Vec<Doctor>,
    pub specializations: Vec<Specialization>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ResourceSnapshot for DoctorsSnapshot {
    fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

#[derive(Clone)]
pub struct DoctorsStore {
    resource: RemoteResource<DoctorsSnapshot>,
    roster: Arc<RequestSequence>,
    specializations: Arc<RequestSequence>,
}

impl Store for DoctorsStore {
    type Snapshot = DoctorsSnapshot;

    fn container(&self) -> &StateContainer<DoctorsSnapshot> {
        self.resource.state()
    }
}

impl DoctorsStore {
    pub fn new(api: ApiClient, auth: AuthStore) -> Self {
        Self {
            resource: RemoteResource::new(DoctorsSnapshot::default(), api, auth),
            roster: Arc::default(),
            specializations: Arc::default(),
        }
    }

    /// Replace the roster. Empty on failure; the previous roster stays in the snapshot.
    pub async fn fetch_all(&self) -> Vec<Doctor> {
        let r = &self.resource;
        r.fetch(
            &self.roster,
            "Failed to fetch doctors",
            r.load::<Vec<Doctor>>(ApiRequest::get(endpoints::DOCTORS)),
            |s, doctors| s.doctors = doctors.clone(),
        )
        .await
        .unwrap_or_default()
    }

    pub async fn fetch_specializations(&self) -> Vec<Specialization> {
        let r = &self.resource;
        r.fetch(
            &self.specializations,
            "Failed to fetch specializations",
            r.load::<Vec<Specialization>>(ApiRequest::get(endpoints::SPECIALIZATIONS)),
            |s, list| s.specializations = list.clone(),
        )
        .await
        .unwrap_or_default()
    }

    /// Refresh one doctor. Replaces the matching record in place; a doctor not
    /// already in the roster is returned but not inserted.
    pub async fn fetch_one(&self, id: i64) -> Option<Doctor> {
        let r = &self.resource;
        r.mutate(
            "Failed to fetch doctor",
            r.load::<Doctor>(ApiRequest::get(endpoints::doctor(id))),
            |s, doctor| replace_by_id(&mut s.doctors, doctor),
        )
        .await
        .ok()
    }

    /// Create a doctor from a draft and append the server's record.
    pub async fn add(&self, draft: &DoctorDraft) -> Result<Doctor, ApiError> {
        let r = &self.resource;
        let call = async {
            DraftValidator::validate(draft)?;
            let form = draft.to_form()?;
            r.load::<Doctor>(ApiRequest::post(endpoints::CREATE_DOCTOR).multipart(form))
                .await
        };
        r.mutate("Failed to add doctor", call, |s, doctor| s.doctors.push(doctor.clone()))
            .await
    }

    /// Partially update a doctor; the returned record replaces the old one in place.
    pub async fn update_details(&self, id: i64, changes: &DoctorDetailsUpdate) -> Result<Doctor, ApiError> {
        let r = &self.resource;
        let call = async {
            let body = serde_json::to_value(changes).map_err(|e| ApiError::Decode(e.to_string()))?;
            r.load::<Doctor>(ApiRequest::put(endpoints::update_doctor_details(id)).json(body))
                .await
        };
        r.mutate("Failed to update doctor", call, |s, doctor| replace_by_id(&mut s.doctors, doctor))
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let r = &self.resource;
        r.mutate(
            "Failed to delete doctor",
            r.send(ApiRequest::delete(endpoints::delete_doctor(id))),
            |s, _| s.doctors.retain(|d| d.id != id),
        )
        .await
    }

    pub fn clear_error(&self) {
        self.resource.clear_error();
    }
}

fn replace_by_id(doctors: &mut [Doctor], doctor: &Doctor) {
    if let Some(slot) = doctors.iter_mut().find(|d| d.id == doctor.id) {
        *slot = doctor.clone();
    }
}
