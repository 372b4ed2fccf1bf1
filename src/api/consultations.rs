use actix_web::{web, HttpResponse};
use crate::{
    models::{ConsultationResponse, CreateConsultationRequest, UpdateConsultationRequest},
    services::consultation_service,
    state::AppState,
    utils::error::AppError,
};

fn list_response(consultations: Vec<crate::models::Consultation>) -> HttpResponse {
    let data: Vec<ConsultationResponse> =
        consultations.into_iter().map(ConsultationResponse::from).collect();

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "count": data.len(),
        "data": data
    }))
}

/// POST /api/consultations - Create a consultation request
#[utoipa::path(
    post,
    path = "/api/consultations",
    tag = "Consultations",
    request_body = CreateConsultationRequest,
    responses(
        (status = 201, description = "Consultation created as pending", body = ConsultationResponse),
        (status = 400, description = "Missing required fields")
    )
)]
pub async fn create_consultation(
    state: web::Data<AppState>,
    body: web::Json<CreateConsultationRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "📝 POST /consultations - patient {} -> specialist {}",
        body.patient_account.trim(),
        body.specialist_account.trim()
    );

    let consultation =
        consultation_service::create_consultation(state.consultations.as_ref(), body.into_inner())
            .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": ConsultationResponse::from(consultation)
    })))
}

/// GET /api/consultations/specialist/{account}
#[utoipa::path(
    get,
    path = "/api/consultations/specialist/{account}",
    tag = "Consultations",
    params(("account" = String, Path, description = "specialistAccount")),
    responses((status = 200, description = "Consultations, newest first", body = [ConsultationResponse]))
)]
pub async fn list_by_specialist(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let consultations =
        consultation_service::list_by_specialist(state.consultations.as_ref(), &path).await?;

    log::info!("📋 GET /consultations/specialist/{} - {} result(s)", path.as_str(), consultations.len());

    Ok(list_response(consultations))
}

/// GET /api/consultations/patient/{account}
#[utoipa::path(
    get,
    path = "/api/consultations/patient/{account}",
    tag = "Consultations",
    params(("account" = String, Path, description = "patientAccount")),
    responses((status = 200, description = "Consultations, newest first", body = [ConsultationResponse]))
)]
pub async fn list_by_patient(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let consultations =
        consultation_service::list_by_patient(state.consultations.as_ref(), &path).await?;

    log::info!("📋 GET /consultations/patient/{} - {} result(s)", path.as_str(), consultations.len());

    Ok(list_response(consultations))
}

/// GET /api/consultations/{id}
#[utoipa::path(
    get,
    path = "/api/consultations/{id}",
    tag = "Consultations",
    params(("id" = String, Path, description = "Store ObjectId")),
    responses(
        (status = 200, description = "Consultation found", body = ConsultationResponse),
        (status = 400, description = "Invalid consultation ID"),
        (status = 404, description = "Consultation not found")
    )
)]
pub async fn get_consultation(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let consultation =
        consultation_service::get_consultation(state.consultations.as_ref(), &path).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": ConsultationResponse::from(consultation)
    })))
}

/// PATCH /api/consultations/{id} - Update status and/or specialist comments
#[utoipa::path(
    patch,
    path = "/api/consultations/{id}",
    tag = "Consultations",
    params(("id" = String, Path, description = "Store ObjectId")),
    request_body = UpdateConsultationRequest,
    responses(
        (status = 200, description = "Consultation updated", body = ConsultationResponse),
        (status = 400, description = "Invalid consultation ID or payload"),
        (status = 404, description = "Consultation not found")
    )
)]
pub async fn update_consultation(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateConsultationRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔄 PATCH /consultations/{}", path.as_str());

    let consultation = consultation_service::update_consultation(
        state.consultations.as_ref(),
        &path,
        body.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": ConsultationResponse::from(consultation)
    })))
}
