use crate::database::Record;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Verification state of a specialist profile.
///
/// Never taken from the client as-is: see [`derive_status`] and [`resolve_requested_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum SpecialistStatus {
    #[default]
    #[serde(rename = "Under Review")]
    UnderReview,
    #[serde(rename = "Verified")]
    Verified,
}

impl SpecialistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialistStatus::UnderReview => "Under Review",
            SpecialistStatus::Verified => "Verified",
        }
    }
}

impl fmt::Display for SpecialistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecialistStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Under Review" => Ok(SpecialistStatus::UnderReview),
            "Verified" => Ok(SpecialistStatus::Verified),
            other => Err(format!("Unknown specialist status '{}'", other)),
        }
    }
}

/// Verified only when both documents are present (ignoring surrounding whitespace)
pub fn derive_status(license_document_url: &str, degree_document_url: &str) -> SpecialistStatus {
    if !license_document_url.trim().is_empty() && !degree_document_url.trim().is_empty() {
        SpecialistStatus::Verified
    } else {
        SpecialistStatus::UnderReview
    }
}

/// Status-only updates may ask for either value, but a `Verified` request on a
/// record missing a document is downgraded to `UnderReview` instead of rejected.
pub fn resolve_requested_status(
    requested: SpecialistStatus,
    license_document_url: &str,
    degree_document_url: &str,
) -> SpecialistStatus {
    match requested {
        SpecialistStatus::Verified => derive_status(license_document_url, degree_document_url),
        SpecialistStatus::UnderReview => SpecialistStatus::UnderReview,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

/// Specialist profile (stored in MongoDB)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Specialist {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,

    #[serde(default)]
    pub professional_title: String,

    #[serde(default)]
    pub specialty: String,

    #[serde(default)]
    pub biography: String,

    #[serde(default)]
    pub profile_image_url: String,

    #[serde(default)]
    pub location: Location,

    #[validate(range(min = 0, message = "Years of experience cannot be negative"))]
    #[serde(default)]
    pub years_of_experience: i32,

    #[validate(range(min = 0.0, message = "Consultation price cannot be negative"))]
    #[serde(default)]
    pub consultation_price: f64,

    #[serde(default)]
    pub languages: Vec<String>,

    #[serde(default)]
    pub license_document_url: String,

    #[serde(default)]
    pub degree_document_url: String,

    #[serde(default)]
    pub status: SpecialistStatus,

    /// NEAR Protocol account
    #[serde(default)]
    pub near_address: String,

    /// Wallet key used by the public per-record endpoints
    #[serde(default)]
    pub privy_wallet: String,

    #[serde(default)]
    pub account_identifier: String,

    #[serde(default)]
    pub created_at: i64,

    #[serde(default)]
    pub updated_at: i64,
}

impl Specialist {
    /// Re-applies the document rule; every create and full update goes through here
    pub fn refresh_status(&mut self) {
        self.status = derive_status(&self.license_document_url, &self.degree_document_url);
    }
}

impl Record for Specialist {
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

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LocationInput {
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Registration payload. A `status` field, if sent, is ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSpecialistRequest {
    pub full_name: String,
    pub professional_title: String,
    pub specialty: String,
    pub biography: String,
    pub profile_image_url: String,
    pub location: LocationInput,
    pub years_of_experience: i32,
    pub consultation_price: f64,
    pub languages: Vec<String>,
    pub license_document_url: String,
    pub degree_document_url: String,
    pub near_address: String,
    pub privy_wallet: String,
    pub account_identifier: String,
}

impl From<CreateSpecialistRequest> for Specialist {
    fn from(req: CreateSpecialistRequest) -> Self {
        let mut specialist = Specialist {
            id: None,
            full_name: req.full_name.trim().to_string(),
            professional_title: req.professional_title.trim().to_string(),
            specialty: req.specialty.trim().to_string(),
            biography: req.biography.trim().to_string(),
            profile_image_url: req.profile_image_url.trim().to_string(),
            location: Location {
                city: trimmed_or_empty(req.location.city),
                state: trimmed_or_empty(req.location.state),
            },
            years_of_experience: req.years_of_experience,
            consultation_price: req.consultation_price,
            languages: clean_languages(req.languages),
            license_document_url: req.license_document_url.trim().to_string(),
            degree_document_url: req.degree_document_url.trim().to_string(),
            status: SpecialistStatus::UnderReview,
            near_address: req.near_address.trim().to_string(),
            privy_wallet: req.privy_wallet.trim().to_string(),
            account_identifier: req.account_identifier.trim().to_string(),
            created_at: 0,
            updated_at: 0,
        };
        specialist.refresh_status();
        specialist
    }
}

/// Full update payload (PUT). Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSpecialistRequest {
    pub full_name: Option<String>,
    pub professional_title: Option<String>,
    pub specialty: Option<String>,
    pub biography: Option<String>,
    pub profile_image_url: Option<String>,
    pub location: Option<LocationInput>,
    pub years_of_experience: Option<i32>,
    pub consultation_price: Option<f64>,
    pub languages: Option<Vec<String>>,
    pub license_document_url: Option<String>,
    pub degree_document_url: Option<String>,
    pub near_address: Option<String>,
    pub privy_wallet: Option<String>,
    pub account_identifier: Option<String>,
}

impl UpdateSpecialistRequest {
    /// Overlays the supplied fields on `existing` and recomputes the status from the merged URLs
    pub fn merge_into(self, mut existing: Specialist) -> Specialist {
        fn overlay(target: &mut String, incoming: Option<String>) {
            if let Some(value) = incoming {
                *target = value.trim().to_string();
            }
        }

        overlay(&mut existing.full_name, self.full_name);
        overlay(&mut existing.professional_title, self.professional_title);
        overlay(&mut existing.specialty, self.specialty);
        overlay(&mut existing.biography, self.biography);
        overlay(&mut existing.profile_image_url, self.profile_image_url);
        overlay(&mut existing.license_document_url, self.license_document_url);
        overlay(&mut existing.degree_document_url, self.degree_document_url);
        overlay(&mut existing.near_address, self.near_address);
        overlay(&mut existing.privy_wallet, self.privy_wallet);
        overlay(&mut existing.account_identifier, self.account_identifier);

        if let Some(location) = self.location {
            overlay(&mut existing.location.city, location.city);
            overlay(&mut existing.location.state, location.state);
        }
        if let Some(years) = self.years_of_experience {
            existing.years_of_experience = years;
        }
        if let Some(price) = self.consultation_price {
            existing.consultation_price = price;
        }
        if let Some(languages) = self.languages {
            existing.languages = clean_languages(languages);
        }

        existing.refresh_status();
        existing
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SpecialistQuery {
    /// Exact status, e.g. `Verified`
    pub status: Option<String>,
    /// Case-insensitive substring of the specialty
    pub specialty: Option<String>,
    /// Case-insensitive substring of `location.city`
    pub city: Option<String>,
}

/// Specialist as returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecialistResponse {
    pub id: String,
    pub full_name: String,
    pub professional_title: String,
    pub specialty: String,
    pub biography: String,
    pub profile_image_url: String,
    pub location: Location,
    pub years_of_experience: i32,
    pub consultation_price: f64,
    pub languages: Vec<String>,
    pub license_document_url: String,
    pub degree_document_url: String,
    pub status: SpecialistStatus,
    pub near_address: String,
    pub privy_wallet: String,
    pub account_identifier: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Specialist> for SpecialistResponse {
    fn from(s: Specialist) -> Self {
        SpecialistResponse {
            id: s.id.map(|id| id.to_hex()).unwrap_or_default(),
            full_name: s.full_name,
            professional_title: s.professional_title,
            specialty: s.specialty,
            biography: s.biography,
            profile_image_url: s.profile_image_url,
            location: s.location,
            years_of_experience: s.years_of_experience,
            consultation_price: s.consultation_price,
            languages: s.languages,
            license_document_url: s.license_document_url,
            degree_document_url: s.degree_document_url,
            status: s.status,
            near_address: s.near_address,
            privy_wallet: s.privy_wallet,
            account_identifier: s.account_identifier,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

fn trimmed_or_empty(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn clean_languages(languages: Vec<String>) -> Vec<String> {
    languages
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}
