//! Shared domain enums, stored as TEXT columns

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Declares an enum whose wire and database representation is a fixed string.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($name), s)),
                }
            }
        }

        impl sqlx::Type<Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s: &str = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

text_enum! {
    /// Principal role
    Role {
        Admin => "ADMIN",
        Employee => "EMPLOYEE",
    }
}

text_enum! {
    /// Asset category
    AssetCategory {
        Laptop => "Laptop",
        Desktop => "Desktop",
        Monitor => "Monitor",
        Phone => "Phone",
        Server => "Server",
        Other => "Other",
    }
}

text_enum! {
    /// Asset lifecycle status
    AssetStatus {
        Available => "available",
        InUse => "in-use",
        Maintenance => "maintenance",
        Retired => "retired",
    }
}

text_enum! {
    /// Asset request status
    RequestStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

text_enum! {
    MaintenancePriority {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

text_enum! {
    /// Maintenance ticket status
    MaintenanceStatus {
        Scheduled => "scheduled",
        InProgress => "in-progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

text_enum! {
    /// Kind of event recorded in the audit log
    AuditAction {
        CheckIn => "Check-In",
        CheckOut => "Check-Out",
        Audit => "Audit",
        Verification => "Verification",
    }
}

text_enum! {
    /// Outcome recorded in the audit log
    AuditStatus {
        Verified => "Verified",
        Pending => "Pending",
        Missing => "Missing",
        Concern => "Concern",
    }
}

impl Role {
    /// Parse a role as typed by a user ("admin", "Employee", ...)
    pub fn parse_loose(s: &str) -> Option<Role> {
        s.trim().to_uppercase().parse().ok()
    }
}

impl RequestStatus {
    /// Decisions an administrator may record on a pending request
    pub fn is_decision(&self) -> bool {
        matches!(self, RequestStatus::Approved | RequestStatus::Rejected)
    }
}

impl MaintenanceStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, MaintenanceStatus::Completed | MaintenanceStatus::Cancelled)
    }

    /// Allowed ticket transitions: scheduled -> in-progress -> completed,
    /// and any open state -> completed | cancelled.
    pub fn can_transition_to(&self, next: MaintenanceStatus) -> bool {
        use MaintenanceStatus::*;
        matches!(
            (self, next),
            (Scheduled, InProgress)
                | (Scheduled, Completed)
                | (Scheduled, Cancelled)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_status_wire_format() {
        assert_eq!(AssetStatus::InUse.as_str(), "in-use");
        assert_eq!("in-use".parse::<AssetStatus>(), Ok(AssetStatus::InUse));
        assert!("In-Use".parse::<AssetStatus>().is_err());
        assert_eq!(serde_json::to_string(&AssetStatus::InUse).unwrap(), "\"in-use\"");
    }

    #[test]
    fn test_audit_action_wire_format() {
        let action: AuditAction = serde_json::from_str("\"Check-Out\"").unwrap();
        assert_eq!(action, AuditAction::CheckOut);
    }

    #[test]
    fn test_role_parse_loose() {
        assert_eq!(Role::parse_loose("admin"), Some(Role::Admin));
        assert_eq!(Role::parse_loose(" Employee "), Some(Role::Employee));
        assert_eq!(Role::parse_loose("manager"), None);
    }

    #[test]
    fn test_request_decisions() {
        assert!(RequestStatus::Approved.is_decision());
        assert!(RequestStatus::Rejected.is_decision());
        assert!(!RequestStatus::Pending.is_decision());
    }

    #[test]
    fn test_maintenance_graph() {
        use MaintenanceStatus::*;
        assert!(Scheduled.can_transition_to(InProgress));
        assert!(Scheduled.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Cancelled));
        assert!(!InProgress.can_transition_to(Scheduled));
        for next in MaintenanceStatus::ALL {
            assert!(!Completed.can_transition_to(*next));
            assert!(!Cancelled.can_transition_to(*next));
        }
    }
}
