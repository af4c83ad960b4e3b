use axum_helpers::JwtClaims;
use regex::Regex;
use sea_orm::entity::prelude::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

/// Regex pattern for alphanumeric characters with hyphens and underscores
static ALPHANUMERIC_HYPHEN_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());

/// Custom validator for usernames
fn validate_username(username: &str) -> Result<(), validator::ValidationError> {
    if !ALPHANUMERIC_HYPHEN_UNDERSCORE.is_match(username) {
        return Err(validator::ValidationError::new("invalid_username"));
    }
    Ok(())
}

/// Risk classification of a city
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskLevel {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
}

/// User entity - a registered citizen account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier
    pub id: i32,
    /// Unique login name
    pub username: String,
    /// Contact phone number
    pub phone: String,
    /// Contact e-mail address
    pub email: String,
    /// City of residence; joins to the risk-zone classification
    pub city: String,
    /// Assigned role id
    pub role_id: i32,
}

/// Summary projection used by list and get endpoints (excludes phone)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub city: String,
    pub role_id: i32,
}

/// One row of the high-risk-zone report.
///
/// Field order is fixed: username, phone, email, city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HighRiskUser {
    pub username: String,
    pub phone: String,
    pub email: String,
    pub city: String,
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 100), custom(function = "validate_username"))]
    pub username: String,
    #[serde(default)]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub city: String,
    pub role_id: i32,
}

/// DTO for updating an existing user. All mutable fields are overwritten.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 100), custom(function = "validate_username"))]
    pub username: String,
    #[serde(default)]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub city: String,
    pub role_id: i32,
}

/// Capability token proving the caller may read the high-risk report.
///
/// Cannot be constructed outside this module; the only way to obtain one
/// is [`ReportAccess::from_claims`] over verified JWT claims. The service
/// consumes the token and never re-checks roles.
#[derive(Debug)]
pub struct ReportAccess(());

impl ReportAccess {
    /// Grant report access if the claims carry the admin role.
    pub fn from_claims(claims: &JwtClaims) -> Option<Self> {
        claims.has_role("admin").then_some(Self(()))
    }
}

impl User {
    /// Create a user from a CreateUser DTO and an assigned id
    pub fn new(id: i32, input: CreateUser) -> Self {
        Self {
            id,
            username: input.username,
            phone: input.phone,
            email: input.email,
            city: input.city,
            role_id: input.role_id,
        }
    }

    /// Apply a full overwrite from an UpdateUser DTO
    pub fn apply_update(&mut self, update: UpdateUser) {
        self.username = update.username;
        self.phone = update.phone;
        self.email = update.email;
        self.city = update.city;
        self.role_id = update.role_id;
    }
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            city: user.city,
            role_id: user.role_id,
        }
    }
}

impl From<User> for HighRiskUser {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            phone: user.phone,
            email: user.email,
            city: user.city,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with_roles(roles: &[&str]) -> JwtClaims {
        JwtClaims {
            sub: "1".to_string(),
            email: "claims@example.com".to_string(),
            name: "Claims".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: 0,
            iat: 0,
            jti: String::new(),
        }
    }

    #[test]
    fn test_report_access_granted_for_admin() {
        let claims = claims_with_roles(&["admin"]);
        assert!(ReportAccess::from_claims(&claims).is_some());
    }

    #[test]
    fn test_report_access_case_insensitive() {
        let claims = claims_with_roles(&["Admin"]);
        assert!(ReportAccess::from_claims(&claims).is_some());
    }

    #[test]
    fn test_report_access_denied_for_regular_user() {
        let claims = claims_with_roles(&["user"]);
        assert!(ReportAccess::from_claims(&claims).is_none());
    }

    #[test]
    fn test_summary_excludes_phone() {
        let user = User {
            id: 1,
            username: "casey".to_string(),
            phone: "+1-555-0000".to_string(),
            email: "casey@example.com".to_string(),
            city: "Riverton".to_string(),
            role_id: 2,
        };

        let summary: UserSummary = user.clone().into();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["username"], "casey");
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn test_high_risk_row_field_order() {
        let user = User {
            id: 1,
            username: "casey".to_string(),
            phone: "+1-555-0000".to_string(),
            email: "casey@example.com".to_string(),
            city: "Riverton".to_string(),
            role_id: 2,
        };

        let row: HighRiskUser = user.into();
        let json = serde_json::to_string(&row).unwrap();

        // Serialized field order matches the report contract
        let username_pos = json.find("username").unwrap();
        let phone_pos = json.find("phone").unwrap();
        let email_pos = json.find("email").unwrap();
        let city_pos = json.find("city").unwrap();
        assert!(username_pos < phone_pos && phone_pos < email_pos && email_pos < city_pos);
    }
}
