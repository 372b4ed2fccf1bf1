use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Veridoc API",
        version = "1.0.0",
        description = "Specialist profiles with document-based verification, and patient consultation requests.\n\n**Verification:** a specialist is `Verified` only while both the license and the degree document URLs are present; any status sent by the client is overridden by that rule."
    ),
    paths(
        crate::api::root,
        crate::api::health::health_check,

        // Specialists
        crate::api::specialists::create_specialist,
        crate::api::specialists::list_specialists,
        crate::api::specialists::get_specialist_by_identifier,
        crate::api::specialists::get_specialist_by_id,
        crate::api::specialists::get_specialist_by_wallet,
        crate::api::specialists::update_specialist_status,
        crate::api::specialists::update_specialist,
        crate::api::specialists::delete_specialist,

        // Consultations
        crate::api::consultations::create_consultation,
        crate::api::consultations::list_by_specialist,
        crate::api::consultations::list_by_patient,
        crate::api::consultations::get_consultation,
        crate::api::consultations::update_consultation,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,

            crate::models::SpecialistResponse,
            crate::models::SpecialistStatus,
            crate::models::Location,
            crate::models::LocationInput,
            crate::models::CreateSpecialistRequest,
            crate::models::UpdateSpecialistRequest,
            crate::models::UpdateStatusRequest,

            crate::models::ConsultationResponse,
            crate::models::ConsultationStatus,
            crate::models::CreateConsultationRequest,
            crate::models::UpdateConsultationRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service description and health check."),
        (name = "Specialists", description = "Specialist registration, lookup by id or wallet, verification status and profile updates."),
        (name = "Consultations", description = "Patient-to-specialist document review requests."),
    )
)]
pub struct ApiDoc;
