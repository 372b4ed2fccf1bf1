use actix_web::{web, HttpResponse};
use crate::{
    models::{
        CreateSpecialistRequest, SpecialistQuery, SpecialistResponse, UpdateSpecialistRequest,
        UpdateStatusRequest,
    },
    services::specialist_service::{self, IdentifierMatch},
    state::AppState,
    utils::error::AppError,
};

/// POST /api/specialists - Register a specialist
#[utoipa::path(
    post,
    path = "/api/specialists",
    tag = "Specialists",
    request_body = CreateSpecialistRequest,
    responses(
        (status = 201, description = "Specialist registered; status derived from the documents", body = SpecialistResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Wallet already registered")
    )
)]
pub async fn create_specialist(
    state: web::Data<AppState>,
    body: web::Json<CreateSpecialistRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /specialists - Registering {}", body.full_name.trim());

    let specialist =
        specialist_service::create_specialist(state.specialists.as_ref(), body.into_inner()).await?;

    log::info!("✅ Specialist registered with status '{}'", specialist.status);

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": SpecialistResponse::from(specialist),
        "message": "Specialist registered successfully"
    })))
}

/// GET /api/specialists - List specialists (?status, ?specialty, ?city)
#[utoipa::path(
    get,
    path = "/api/specialists",
    tag = "Specialists",
    params(SpecialistQuery),
    responses(
        (status = 200, description = "Matching specialists, newest first", body = [SpecialistResponse])
    )
)]
pub async fn list_specialists(
    state: web::Data<AppState>,
    query: web::Query<SpecialistQuery>,
) -> Result<HttpResponse, AppError> {
    let specialists =
        specialist_service::list_specialists(state.specialists.as_ref(), &query).await?;

    log::info!("📋 GET /specialists - {} result(s)", specialists.len());

    let data: Vec<SpecialistResponse> = specialists.into_iter().map(SpecialistResponse::from).collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "count": data.len(),
        "data": data
    })))
}

/// GET /api/specialists/identifier/{identifier} - Lookup by store id or wallet identifier
#[utoipa::path(
    get,
    path = "/api/specialists/identifier/{identifier}",
    tag = "Specialists",
    params(("identifier" = String, Path, description = "Store id, accountIdentifier or privyWallet")),
    responses(
        (status = 200, description = "Specialist found", body = SpecialistResponse),
        (status = 404, description = "Specialist not found")
    )
)]
pub async fn get_specialist_by_identifier(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let identifier = path.into_inner();

    let resolved =
        specialist_service::resolve_identifier(state.specialists.as_ref(), &identifier).await?;

    match &resolved {
        IdentifierMatch::Primary(_) => log::info!("🔍 Identifier {} matched by id", identifier),
        IdentifierMatch::Alternate(_) => log::info!("🔍 Identifier {} matched by wallet", identifier),
        IdentifierMatch::NotFound => {}
    }

    let specialist = resolved
        .into_specialist()
        .ok_or_else(|| AppError::NotFound("Specialist not found".to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": SpecialistResponse::from(specialist)
    })))
}

/// GET /api/specialists/by-document-id/{id} - Lookup by ObjectId
#[utoipa::path(
    get,
    path = "/api/specialists/by-document-id/{id}",
    tag = "Specialists",
    params(("id" = String, Path, description = "Store ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "Specialist found", body = SpecialistResponse),
        (status = 400, description = "Invalid specialist ID"),
        (status = 404, description = "Specialist not found")
    )
)]
pub async fn get_specialist_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let specialist =
        specialist_service::get_specialist_by_id(state.specialists.as_ref(), &path).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": SpecialistResponse::from(specialist)
    })))
}

/// GET /api/specialists/{id} - Public profile by wallet
#[utoipa::path(
    get,
    path = "/api/specialists/{id}",
    tag = "Specialists",
    params(("id" = String, Path, description = "privyWallet of the specialist")),
    responses(
        (status = 200, description = "Specialist found", body = SpecialistResponse),
        (status = 404, description = "Specialist not found")
    )
)]
pub async fn get_specialist_by_wallet(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let specialist =
        specialist_service::get_specialist_by_wallet(state.specialists.as_ref(), &path).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": SpecialistResponse::from(specialist)
    })))
}

/// PATCH /api/specialists/{id}/status - Update only the status
#[utoipa::path(
    patch,
    path = "/api/specialists/{id}/status",
    tag = "Specialists",
    params(("id" = String, Path, description = "Store ObjectId")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status applied (Verified falls back to Under Review without both documents)", body = SpecialistResponse),
        (status = 400, description = "Missing/invalid status or invalid ID"),
        (status = 404, description = "Specialist not found")
    )
)]
pub async fn update_specialist_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔄 PATCH /specialists/{}/status - {:?}", path.as_str(), body.status);

    let specialist = specialist_service::update_specialist_status(
        state.specialists.as_ref(),
        &path,
        body.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": SpecialistResponse::from(specialist),
        "message": "Status updated successfully"
    })))
}

/// PUT /api/specialists/{id} - Update the full profile
#[utoipa::path(
    put,
    path = "/api/specialists/{id}",
    tag = "Specialists",
    params(("id" = String, Path, description = "privyWallet of the specialist")),
    request_body = UpdateSpecialistRequest,
    responses(
        (status = 200, description = "Specialist updated; status recomputed", body = SpecialistResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Specialist not found"),
        (status = 409, description = "Wallet already registered")
    )
)]
pub async fn update_specialist(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateSpecialistRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("✏️ PUT /specialists/{}", path.as_str());

    let specialist = specialist_service::update_specialist_by_wallet(
        state.specialists.as_ref(),
        &path,
        body.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": SpecialistResponse::from(specialist),
        "message": "Specialist updated successfully"
    })))
}

/// DELETE /api/specialists/{id} - Delete a specialist
#[utoipa::path(
    delete,
    path = "/api/specialists/{id}",
    tag = "Specialists",
    params(("id" = String, Path, description = "Store ObjectId")),
    responses(
        (status = 200, description = "Specialist deleted"),
        (status = 400, description = "Invalid specialist ID"),
        (status = 404, description = "Specialist not found")
    )
)]
pub async fn delete_specialist(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️ DELETE /specialists/{}", path.as_str());

    specialist_service::delete_specialist(state.specialists.as_ref(), &path).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Specialist deleted successfully"
    })))
}
