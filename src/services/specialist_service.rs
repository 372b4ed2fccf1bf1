// ==================== SPECIALIST PROFILES ====================
// Verification status is never stored as sent by the client: every write
// path recomputes it from the license / degree document URLs.

use crate::{
    database::{Clause, DocumentStore, Filter},
    models::{
        resolve_requested_status, CreateSpecialistRequest, Specialist, SpecialistQuery,
        SpecialistStatus, UpdateSpecialistRequest, UpdateStatusRequest,
    },
    utils::error::{AppError, WALLET_TAKEN},
};
use mongodb::bson::oid::ObjectId;
use validator::Validate;

const NOT_FOUND: &str = "Specialist not found";
const INVALID_ID: &str = "Invalid specialist ID";

/// Outcome of an identifier lookup that may hit the store id or a wallet field
#[derive(Debug)]
pub enum IdentifierMatch {
    Primary(Specialist),
    Alternate(Specialist),
    NotFound,
}

impl IdentifierMatch {
    pub fn into_specialist(self) -> Option<Specialist> {
        match self {
            IdentifierMatch::Primary(s) | IdentifierMatch::Alternate(s) => Some(s),
            IdentifierMatch::NotFound => None,
        }
    }
}

pub fn parse_specialist_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| AppError::InvalidIdentifier(INVALID_ID.to_string()))
}

pub async fn create_specialist(
    store: &dyn DocumentStore<Specialist>,
    request: CreateSpecialistRequest,
) -> Result<Specialist, AppError> {
    let specialist = Specialist::from(request);
    specialist.validate()?;
    ensure_wallet_free(store, &specialist.privy_wallet, None).await?;

    store.insert(specialist).await
}

pub async fn list_specialists(
    store: &dyn DocumentStore<Specialist>,
    query: &SpecialistQuery,
) -> Result<Vec<Specialist>, AppError> {
    store.find(&list_filter(query)).await
}

/// Blank query values are treated as absent
pub fn list_filter(query: &SpecialistQuery) -> Filter {
    fn present(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    let mut filter = Filter::new();
    if let Some(status) = present(&query.status) {
        filter = filter.eq("status", status);
    }
    if let Some(specialty) = present(&query.specialty) {
        filter = filter.contains_ignore_case("specialty", specialty);
    }
    if let Some(city) = present(&query.city) {
        filter = filter.contains_ignore_case("location.city", city);
    }
    filter
}

pub async fn get_specialist_by_id(
    store: &dyn DocumentStore<Specialist>,
    raw_id: &str,
) -> Result<Specialist, AppError> {
    let id = parse_specialist_id(raw_id)?;

    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

/// Exact match on `privyWallet`
pub async fn get_specialist_by_wallet(
    store: &dyn DocumentStore<Specialist>,
    wallet: &str,
) -> Result<Specialist, AppError> {
    find_by_wallet(store, wallet)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

async fn find_by_wallet(
    store: &dyn DocumentStore<Specialist>,
    wallet: &str,
) -> Result<Option<Specialist>, AppError> {
    let wallet = wallet.trim();
    if wallet.is_empty() {
        return Ok(None);
    }

    store.find_one(&Filter::new().eq("privyWallet", wallet)).await
}

/// A non-empty wallet may belong to at most one profile (`owner` excluded)
async fn ensure_wallet_free(
    store: &dyn DocumentStore<Specialist>,
    wallet: &str,
    owner: Option<ObjectId>,
) -> Result<(), AppError> {
    match find_by_wallet(store, wallet).await? {
        Some(other) if other.id != owner => Err(AppError::Conflict(WALLET_TAKEN.to_string())),
        _ => Ok(()),
    }
}

/// Tries the store id first when `identifier` parses as one, then falls back
/// to `accountIdentifier` / `privyWallet`.
pub async fn resolve_identifier(
    store: &dyn DocumentStore<Specialist>,
    identifier: &str,
) -> Result<IdentifierMatch, AppError> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Ok(IdentifierMatch::NotFound);
    }

    if let Ok(id) = ObjectId::parse_str(identifier) {
        if let Some(specialist) = store.find_by_id(id).await? {
            return Ok(IdentifierMatch::Primary(specialist));
        }
    }

    let filter = Filter::new().any_of(vec![
        Clause::Equals("accountIdentifier".to_string(), identifier.to_string()),
        Clause::Equals("privyWallet".to_string(), identifier.to_string()),
    ]);

    Ok(match store.find_one(&filter).await? {
        Some(specialist) => IdentifierMatch::Alternate(specialist),
        None => IdentifierMatch::NotFound,
    })
}

pub async fn update_specialist_status(
    store: &dyn DocumentStore<Specialist>,
    raw_id: &str,
    request: UpdateStatusRequest,
) -> Result<Specialist, AppError> {
    let requested = match request.status.as_deref().map(str::trim) {
        None | Some("") => return Err(AppError::InvalidRequest("Status is required".to_string())),
        Some(raw) => raw.parse::<SpecialistStatus>().map_err(|_| {
            AppError::InvalidRequest(
                "Invalid status. Use \"Under Review\" or \"Verified\"".to_string(),
            )
        })?,
    };

    let id = parse_specialist_id(raw_id)?;
    let mut specialist = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    let applied = resolve_requested_status(
        requested,
        &specialist.license_document_url,
        &specialist.degree_document_url,
    );
    if applied != requested {
        log::warn!(
            "⚠️ Specialist {} lacks documents; requested '{}' stored as '{}'",
            id.to_hex(),
            requested,
            applied
        );
    }
    specialist.status = applied;
    specialist.validate()?;

    store
        .update_by_id(id, specialist)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

/// PUT keyed by wallet: merge, recompute status from the merged URLs, replace
pub async fn update_specialist_by_wallet(
    store: &dyn DocumentStore<Specialist>,
    wallet: &str,
    request: UpdateSpecialistRequest,
) -> Result<Specialist, AppError> {
    let existing = find_by_wallet(store, wallet)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
    let id = existing
        .id
        .ok_or_else(|| AppError::DatabaseError("Stored specialist has no _id".to_string()))?;

    let merged = request.merge_into(existing);
    merged.validate()?;
    ensure_wallet_free(store, &merged.privy_wallet, Some(id)).await?;

    store
        .update_by_id(id, merged)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

pub async fn delete_specialist(
    store: &dyn DocumentStore<Specialist>,
    raw_id: &str,
) -> Result<Specialist, AppError> {
    let id = parse_specialist_id(raw_id)?;

    store
        .delete_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_store::MemoryStore;

    fn registration(name: &str, wallet: &str) -> CreateSpecialistRequest {
        CreateSpecialistRequest {
            full_name: name.to_string(),
            specialty: "Cardiology".to_string(),
            privy_wallet: wallet.to_string(),
            license_document_url: "l.pdf".to_string(),
            degree_document_url: "d.pdf".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_forces_status_and_assigns_id() {
        let store = MemoryStore::<Specialist>::new();

        let mut req = registration("Ana", "0xana");
        req.degree_document_url = "   ".to_string();
        let created = create_specialist(&store, req).await.unwrap();

        assert!(created.id.is_some());
        assert!(created.created_at > 0);
        assert_eq!(created.status, SpecialistStatus::UnderReview);
    }

    #[tokio::test]
    async fn test_create_with_blank_name_is_a_validation_error() {
        let store = MemoryStore::<Specialist>::new();

        let err = create_specialist(&store, registration("  ", "0xana")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(store.find(&Filter::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_newest_first() {
        let store = MemoryStore::<Specialist>::new();

        let mut first = registration("Ana", "0xana");
        first.location.city = Some("CDMX".to_string());
        create_specialist(&store, first).await.unwrap();

        let mut second = registration("Luis", "0xluis");
        second.location.city = Some("Guadalajara".to_string());
        second.specialty = "Dermatology".to_string();
        create_specialist(&store, second).await.unwrap();

        let mut third = registration("Eva", "0xeva");
        third.location.city = Some("Ciudad de México (CDMX)".to_string());
        third.license_document_url = String::new();
        create_specialist(&store, third).await.unwrap();

        let all = list_specialists(&store, &SpecialistQuery::default()).await.unwrap();
        let names: Vec<&str> = all.iter().map(|s| s.full_name.as_str()).collect();
        assert_eq!(names, vec!["Eva", "Luis", "Ana"]);

        let query = SpecialistQuery { city: Some("cdmx".to_string()), ..Default::default() };
        let in_cdmx = list_specialists(&store, &query).await.unwrap();
        assert_eq!(in_cdmx.len(), 2);

        let query = SpecialistQuery {
            city: Some("cdmx".to_string()),
            status: Some("Verified".to_string()),
            ..Default::default()
        };
        let verified = list_specialists(&store, &query).await.unwrap();
        assert_eq!(verified.len(), 1);
        assert_eq!(verified[0].full_name, "Ana");

        let query = SpecialistQuery { specialty: Some("DERMA".to_string()), ..Default::default() };
        let derm = list_specialists(&store, &query).await.unwrap();
        assert_eq!(derm.len(), 1);
        assert_eq!(derm[0].full_name, "Luis");
    }

    #[test]
    fn test_blank_query_values_are_ignored() {
        let query = SpecialistQuery {
            status: Some("".to_string()),
            specialty: Some("  ".to_string()),
            city: None,
        };
        assert_eq!(list_filter(&query), Filter::new());
    }

    #[tokio::test]
    async fn test_get_by_id_distinguishes_malformed_from_missing() {
        let store = MemoryStore::<Specialist>::new();

        let err = get_specialist_by_id(&store, "not-an-id").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidIdentifier(_)));

        let err = get_specialist_by_id(&store, &ObjectId::new().to_hex()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_resolve_identifier_paths() {
        let store = MemoryStore::<Specialist>::new();

        let mut req = registration("Ana", "did:privy:ana");
        // An id-shaped account identifier that is not any record's _id
        let shaped = ObjectId::new().to_hex();
        req.account_identifier = shaped.clone();
        let created = create_specialist(&store, req).await.unwrap();
        let id = created.id.unwrap().to_hex();

        match resolve_identifier(&store, &id).await.unwrap() {
            IdentifierMatch::Primary(s) => assert_eq!(s.full_name, "Ana"),
            other => panic!("expected primary match, got {:?}", other),
        }

        match resolve_identifier(&store, &shaped).await.unwrap() {
            IdentifierMatch::Alternate(s) => assert_eq!(s.full_name, "Ana"),
            other => panic!("expected alternate match, got {:?}", other),
        }

        match resolve_identifier(&store, "did:privy:ana").await.unwrap() {
            IdentifierMatch::Alternate(s) => assert_eq!(s.full_name, "Ana"),
            other => panic!("expected alternate match, got {:?}", other),
        }

        assert!(matches!(
            resolve_identifier(&store, "nobody.near").await.unwrap(),
            IdentifierMatch::NotFound
        ));
        assert!(matches!(resolve_identifier(&store, "  ").await.unwrap(), IdentifierMatch::NotFound));
    }

    #[tokio::test]
    async fn test_blank_wallet_never_matches_profiles_without_wallet() {
        let store = MemoryStore::<Specialist>::new();
        create_specialist(&store, registration("Ana", "")).await.unwrap();

        let err = get_specialist_by_wallet(&store, " ").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_status_update_rules() {
        let store = MemoryStore::<Specialist>::new();

        let mut req = registration("Ana", "0xana");
        req.degree_document_url = String::new();
        let created = create_specialist(&store, req).await.unwrap();
        let id = created.id.unwrap().to_hex();

        let updated = update_specialist_status(
            &store,
            &id,
            UpdateStatusRequest { status: Some("Verified".to_string()) },
        )
        .await
        .unwrap();
        assert_eq!(updated.status, SpecialistStatus::UnderReview);

        let err = update_specialist_status(
            &store,
            &id,
            UpdateStatusRequest { status: Some("Approved".to_string()) },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));

        let err = update_specialist_status(&store, &id, UpdateStatusRequest { status: None })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));

        let err = update_specialist_status(
            &store,
            &ObjectId::new().to_hex(),
            UpdateStatusRequest { status: Some("Verified".to_string()) },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_verified_profile_can_be_put_back_under_review() {
        let store = MemoryStore::<Specialist>::new();
        let created = create_specialist(&store, registration("Ana", "0xana")).await.unwrap();
        assert_eq!(created.status, SpecialistStatus::Verified);

        let updated = update_specialist_status(
            &store,
            &created.id.unwrap().to_hex(),
            UpdateStatusRequest { status: Some("Under Review".to_string()) },
        )
        .await
        .unwrap();
        assert_eq!(updated.status, SpecialistStatus::UnderReview);
    }

    #[tokio::test]
    async fn test_full_update_by_wallet() {
        let store = MemoryStore::<Specialist>::new();

        let mut req = registration("Ana", "0xana");
        req.license_document_url = String::new();
        let created = create_specialist(&store, req).await.unwrap();
        assert_eq!(created.status, SpecialistStatus::UnderReview);

        let updated = update_specialist_by_wallet(
            &store,
            "0xana",
            UpdateSpecialistRequest {
                license_document_url: Some("l.pdf".to_string()),
                biography: Some("Interventional cardiologist".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.status, SpecialistStatus::Verified);
        assert_eq!(updated.biography, "Interventional cardiologist");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let err = update_specialist_by_wallet(
            &store,
            "0xana",
            UpdateSpecialistRequest { consultation_price: Some(-5.0), ..Default::default() },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let err = update_specialist_by_wallet(&store, "0xnobody", UpdateSpecialistRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_wallet_belongs_to_one_profile() {
        let store = MemoryStore::<Specialist>::new();
        create_specialist(&store, registration("Ana", "0xana")).await.unwrap();
        create_specialist(&store, registration("Luis", "0xluis")).await.unwrap();

        let err = create_specialist(&store, registration("Impostor", " 0xana ")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let err = update_specialist_by_wallet(
            &store,
            "0xluis",
            UpdateSpecialistRequest { privy_wallet: Some("0xana".to_string()), ..Default::default() },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // Re-sending its own wallet is not a conflict
        let updated = update_specialist_by_wallet(
            &store,
            "0xana",
            UpdateSpecialistRequest { privy_wallet: Some("0xana".to_string()), ..Default::default() },
        )
        .await
        .unwrap();
        assert_eq!(updated.full_name, "Ana");

        // Profiles without a wallet never collide
        create_specialist(&store, registration("Eva", "")).await.unwrap();
        create_specialist(&store, registration("Leo", "")).await.unwrap();

        assert_eq!(store.find(&Filter::new()).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = MemoryStore::<Specialist>::new();
        let created = create_specialist(&store, registration("Ana", "0xana")).await.unwrap();
        let id = created.id.unwrap().to_hex();

        delete_specialist(&store, &id).await.unwrap();

        assert!(matches!(get_specialist_by_id(&store, &id).await, Err(AppError::NotFound(_))));
        assert!(matches!(delete_specialist(&store, &id).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            delete_specialist(&store, "xyz").await,
            Err(AppError::InvalidIdentifier(_))
        ));
    }
}
