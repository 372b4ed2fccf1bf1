use crate::{
    database::{DocumentStore, Filter},
    models::{Consultation, CreateConsultationRequest, UpdateConsultationRequest},
    utils::error::AppError,
};
use mongodb::bson::oid::ObjectId;
use validator::Validate;

const NOT_FOUND: &str = "Consultation not found";

fn parse_consultation_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| AppError::InvalidIdentifier("Invalid consultation ID".to_string()))
}

pub async fn create_consultation(
    store: &dyn DocumentStore<Consultation>,
    request: CreateConsultationRequest,
) -> Result<Consultation, AppError> {
    let consultation = Consultation::from(request);
    consultation.validate()?;

    store.insert(consultation).await
}

pub async fn list_by_specialist(
    store: &dyn DocumentStore<Consultation>,
    account: &str,
) -> Result<Vec<Consultation>, AppError> {
    store.find(&Filter::new().eq("specialistAccount", account.trim())).await
}

pub async fn list_by_patient(
    store: &dyn DocumentStore<Consultation>,
    account: &str,
) -> Result<Vec<Consultation>, AppError> {
    store.find(&Filter::new().eq("patientAccount", account.trim())).await
}

pub async fn get_consultation(
    store: &dyn DocumentStore<Consultation>,
    raw_id: &str,
) -> Result<Consultation, AppError> {
    let id = parse_consultation_id(raw_id)?;

    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

pub async fn update_consultation(
    store: &dyn DocumentStore<Consultation>,
    raw_id: &str,
    request: UpdateConsultationRequest,
) -> Result<Consultation, AppError> {
    let id = parse_consultation_id(raw_id)?;
    let existing = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    let updated = request.apply_to(existing);
    updated.validate()?;

    store
        .update_by_id(id, updated)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}
