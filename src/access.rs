//! Role-scoped visibility rules
//!
//! One table decides which rows and which fields of each resource a role may
//! read. Services look the rule up instead of branching on the role inline.

use crate::models::enums::Role;

/// Resources subject to read scoping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Asset,
    Request,
    Maintenance,
    Audit,
}

/// Which rows are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowScope {
    All,
    /// Only rows tied to the principal: requests they filed, tickets on assets they hold
    Own,
}

/// Which fields are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldScope {
    Full,
    /// Purchasing fields (`cost`, `purchaseDate`) are removed
    Restricted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub rows: RowScope,
    pub fields: FieldScope,
}

const FULL: Visibility = Visibility { rows: RowScope::All, fields: FieldScope::Full };

/// Look up the visibility rule for `role` on `resource`
pub fn visibility(role: Role, resource: Resource) -> Visibility {
    match (role, resource) {
        (Role::Admin, _) => FULL,
        (Role::Employee, Resource::Asset) => Visibility {
            rows: RowScope::All,
            fields: FieldScope::Restricted,
        },
        (Role::Employee, Resource::Request) | (Role::Employee, Resource::Maintenance) => Visibility {
            rows: RowScope::Own,
            fields: FieldScope::Full,
        },
        (Role::Employee, Resource::Audit) => FULL,
    }
}
