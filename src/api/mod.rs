pub mod health;
pub mod specialists;
pub mod consultations;
pub mod swagger;


use actix_web::{error::InternalError, web, HttpResponse, Responder};

/// Route table for both resource domains plus the service endpoints
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/specialists")
                .route("", web::post().to(specialists::create_specialist))
                .route("/", web::post().to(specialists::create_specialist))
                .route("", web::get().to(specialists::list_specialists))
                .route("/", web::get().to(specialists::list_specialists))
                .route("/identifier/{identifier}", web::get().to(specialists::get_specialist_by_identifier))
                .route("/by-document-id/{id}", web::get().to(specialists::get_specialist_by_id))
                .route("/{id}/status", web::patch().to(specialists::update_specialist_status))
                .route("/{id}", web::get().to(specialists::get_specialist_by_wallet))
                .route("/{id}", web::put().to(specialists::update_specialist))
                .route("/{id}", web::delete().to(specialists::delete_specialist)),
        )
        .service(
            web::scope("/api/consultations")
                .route("", web::post().to(consultations::create_consultation))
                .route("/", web::post().to(consultations::create_consultation))
                .route("/specialist/{account}", web::get().to(consultations::list_by_specialist))
                .route("/patient/{account}", web::get().to(consultations::list_by_patient))
                .route("/{id}", web::get().to(consultations::get_consultation))
                .route("/{id}", web::patch().to(consultations::update_consultation)),
        );
}

/// Malformed JSON bodies answer with the standard envelope instead of actix's plain text
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "message": format!("Invalid request body: {}", err)
        }));
        InternalError::from_response(err, response).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "message": format!("Invalid query string: {}", err)
        }));
        InternalError::from_response(err, response).into()
    })
}

/// GET / - Service description
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Static description of the available routes"))
)]
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Veridoc API - backend running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "specialists": "/api/specialists",
            "consultations": "/api/consultations",
            "documentation": {
                "POST /api/specialists": "Register a specialist",
                "GET /api/specialists": "List specialists (?status, ?specialty, ?city)",
                "GET /api/specialists/identifier/:identifier": "Find by store id, account identifier or wallet",
                "GET /api/specialists/by-document-id/:id": "Get specialist by store id",
                "GET /api/specialists/:id": "Get specialist by wallet",
                "PATCH /api/specialists/:id/status": "Update verification status",
                "PUT /api/specialists/:id": "Update specialist by wallet",
                "DELETE /api/specialists/:id": "Delete specialist",
                "POST /api/consultations": "Create a consultation request",
                "GET /api/consultations/specialist/:account": "List consultations for a specialist",
                "GET /api/consultations/patient/:account": "List consultations for a patient",
                "GET /api/consultations/:id": "Get consultation by id",
                "PATCH /api/consultations/:id": "Update consultation status and comments",
                "GET /swagger-ui/": "Interactive API documentation"
            }
        }
    }))
}

/// Fallback for unmatched routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "success": false,
        "message": "Route not found"
    }))
}
