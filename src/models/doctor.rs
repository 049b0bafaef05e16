//! Doctor roster records and payloads.

use crate::error::ApiError;
use crate::transport::MultipartForm;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    pub current_status: String,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default, alias = "isActive")]
    pub active: bool,
    #[serde(default, alias = "isHandSignSpecialist")]
    pub hand_sign_specialist: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialization {
    pub id: i64,
    pub name: String,
}

/// Profile picture attached to a new doctor.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfilePicture {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Everything needed to create a doctor. Sent as multipart: the picture as
/// part `file`, the rest as JSON text in part `therapistDto`.
#[derive(Clone, Debug, PartialEq)]
pub struct DoctorDraft {
    pub name: String,
    pub email: String,
    pub hand_sign_specialist: bool,
    pub active: bool,
    /// Defaults to `OFFLINE` on the server when absent.
    pub current_status: Option<String>,
    pub specialization_ids: Vec<i64>,
    pub picture: ProfilePicture,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftDto<'a> {
    name: &'a str,
    email: &'a str,
    #[serde(rename = "isHandSignSpecialist")]
    hand_sign_specialist: bool,
    #[serde(rename = "isActive")]
    active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_status: Option<&'a str>,
    specialization_ids: &'a [i64],
}

impl DoctorDraft {
    pub fn to_form(&self) -> Result<MultipartForm, ApiError> {
        let dto = DraftDto {
            name: self.name.trim(),
            email: self.email.trim(),
            hand_sign_specialist: self.hand_sign_specialist,
            active: self.active,
            current_status: self.current_status.as_deref(),
            specialization_ids: &self.specialization_ids,
        };
        let json = serde_json::to_string(&dto).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(MultipartForm::new()
            .file(
                "file",
                self.picture.file_name.clone(),
                self.picture.content_type.clone(),
                self.picture.bytes.clone(),
            )
            .text("therapistDto", json))
    }
}

/// Partial update of a doctor's details. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDetailsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "isActive", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(rename = "isHandSignSpecialist", skip_serializing_if = "Option::is_none")]
    pub hand_sign_specialist: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization_ids: Option<Vec<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::FormPart;

    #[test]
    fn decodes_server_view() {
        let d: Doctor = serde_json::from_str(
            r#"{"id":4,"name":"Dr. Perera","email":"perera@example.org","profilePictureUrl":null,
                "active":true,"handSignSpecialist":false,"currentStatus":"ONLINE","specializations":["CBT"]}"#,
        )
        .unwrap();
        assert_eq!(d.id, 4);
        assert!(d.active);
        assert_eq!(d.specializations, vec!["CBT".to_string()]);
    }

    #[test]
    fn draft_form_has_file_and_dto_parts() {
        let draft = DoctorDraft {
            name: " Dr. Silva ".into(),
            email: "silva@example.org".into(),
            hand_sign_specialist: true,
            active: true,
            current_status: None,
            specialization_ids: vec![1, 3],
            picture: ProfilePicture {
                file_name: "silva.png".into(),
                content_type: "image/png".into(),
                bytes: vec![1, 2, 3],
            },
        };
        let form = draft.to_form().unwrap();
        assert!(matches!(form.part("file"), Some(FormPart::File { bytes, .. }) if bytes.as_slice() == [1u8, 2, 3]));
        let Some(FormPart::Text { value, .. }) = form.part("therapistDto") else {
            panic!("therapistDto part missing");
        };
        let dto: serde_json::Value = serde_json::from_str(value).unwrap();
        assert_eq!(dto["name"], "Dr. Silva");
        assert_eq!(dto["isHandSignSpecialist"], true);
        assert_eq!(dto["specializationIds"], serde_json::json!([1, 3]));
        assert!(dto.get("currentStatus").is_none());
    }

    #[test]
    fn details_update_skips_absent_fields() {
        let update = DoctorDetailsUpdate {
            active: Some(false),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({"isActive": false}));
    }
}
