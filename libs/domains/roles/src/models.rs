use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Role entity - a named permission group users are assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Role {
    /// Unique identifier
    pub id: i32,
    /// Role name (e.g. "admin", "user")
    pub name: String,
    /// Human-readable description, may be empty
    pub description: String,
}

/// DTO for creating a new role
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRole {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// DTO for updating an existing role. All mutable fields are overwritten.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateRole {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Role {
    /// Create a role from a CreateRole DTO and an assigned id
    pub fn new(id: i32, input: CreateRole) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
        }
    }

    /// Apply a full overwrite from an UpdateRole DTO
    pub fn apply_update(&mut self, update: UpdateRole) {
        self.name = update.name;
        self.description = update.description;
    }
}
