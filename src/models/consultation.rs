use crate::database::Record;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    #[default]
    Pending,
    Attended,
}

/// Patient request for a specialist to review a document (stored in MongoDB).
///
/// `patientAccount` / `specialistAccount` are free-text correlation keys; nothing
/// checks them against the specialists collection.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[validate(length(min = 1, message = "patientAccount is required"))]
    pub patient_account: String,

    #[validate(length(min = 1, message = "specialistAccount is required"))]
    pub specialist_account: String,

    #[validate(length(min = 1, message = "specialistName is required"))]
    pub specialist_name: String,

    #[validate(length(min = 1, message = "documentUrl is required"))]
    pub document_url: String,

    #[serde(rename = "analysisCommentsAI", default)]
    pub analysis_comments_ai: String,

    #[serde(default)]
    pub analysis_comments_specialist: String,

    #[serde(default)]
    pub status: ConsultationStatus,

    #[serde(default)]
    pub created_at: i64,

    #[serde(default)]
    pub updated_at: i64,
}

impl Record for Consultation {
    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn stamp_created(&mut self, id: ObjectId, now: i64) {
        self.id = Some(id);
        self.created_at = now;
        self.updated_at = now;
    }

    fn stamp_updated(&mut self, now: i64) {
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateConsultationRequest {
    pub patient_account: String,
    pub specialist_account: String,
    pub specialist_name: String,
    pub document_url: String,
    #[serde(rename = "analysisCommentsAI")]
    pub analysis_comments_ai: Option<String>,
}

impl From<CreateConsultationRequest> for Consultation {
    fn from(req: CreateConsultationRequest) -> Self {
        Consultation {
            id: None,
            patient_account: req.patient_account.trim().to_string(),
            specialist_account: req.specialist_account.trim().to_string(),
            specialist_name: req.specialist_name.trim().to_string(),
            document_url: req.document_url.trim().to_string(),
            analysis_comments_ai: req
                .analysis_comments_ai
                .map(|c| c.trim().to_string())
                .unwrap_or_default(),
            // Filled in by the specialist later
            analysis_comments_specialist: String::new(),
            status: ConsultationStatus::Pending,
            created_at: 0,
            updated_at: 0,
        }
    }
}

/// Any status may be set at any time
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateConsultationRequest {
    pub status: Option<ConsultationStatus>,
    pub analysis_comments_specialist: Option<String>,
}

impl UpdateConsultationRequest {
    pub fn apply_to(self, mut existing: Consultation) -> Consultation {
        if let Some(status) = self.status {
            existing.status = status;
        }
        if let Some(comments) = self.analysis_comments_specialist {
            existing.analysis_comments_specialist = comments.trim().to_string();
        }
        existing
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationResponse {
    pub id: String,
    pub patient_account: String,
    pub specialist_account: String,
    pub specialist_name: String,
    pub document_url: String,
    #[serde(rename = "analysisCommentsAI")]
    pub analysis_comments_ai: String,
    pub analysis_comments_specialist: String,
    pub status: ConsultationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Consultation> for ConsultationResponse {
    fn from(c: Consultation) -> Self {
        ConsultationResponse {
            id: c.id.map(|id| id.to_hex()).unwrap_or_default(),
            patient_account: c.patient_account,
            specialist_account: c.specialist_account,
            specialist_name: c.specialist_name,
            document_url: c.document_url,
            analysis_comments_ai: c.analysis_comments_ai,
            analysis_comments_specialist: c.analysis_comments_specialist,
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
