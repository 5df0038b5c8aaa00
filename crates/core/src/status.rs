//! Status enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based) in
//! the corresponding `*_statuses` database table. `name()`/`from_name()` give
//! the snake_case wire form used in API filters and seed rows.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Return the snake_case wire name.
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }

            /// Parse a snake_case wire name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $wire => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Look up a variant by its database status ID.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Student/company verification status.
    VerificationStatus {
        Pending = 1 => "pending",
        Approved = 2 => "approved",
        Rejected = 3 => "rejected",
    }
}

define_status_enum! {
    /// Project lifecycle status.
    ProjectStatus {
        Draft = 1 => "draft",
        PendingReview = 2 => "pending_review",
        Rejected = 3 => "rejected",
        Open = 4 => "open",
        InProgress = 5 => "in_progress",
        Completed = 6 => "completed",
        Cancelled = 7 => "cancelled",
    }
}

define_status_enum! {
    /// Project application status.
    ApplicationStatus {
        Pending = 1 => "pending",
        Shortlisted = 2 => "shortlisted",
        Accepted = 3 => "accepted",
        Rejected = 4 => "rejected",
        Withdrawn = 5 => "withdrawn",
    }
}

define_status_enum! {
    /// Milestone delivery status.
    MilestoneStatus {
        Pending = 1 => "pending",
        InProgress = 2 => "in_progress",
        Submitted = 3 => "submitted",
        Approved = 4 => "approved",
        RevisionRequired = 5 => "revision_required",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_match_seed_order() {
        assert_eq!(ProjectStatus::Draft.id(), 1);
        assert_eq!(ProjectStatus::Cancelled.id(), 7);
        assert_eq!(ApplicationStatus::Withdrawn.id(), 5);
        assert_eq!(MilestoneStatus::RevisionRequired.id(), 5);
        assert_eq!(VerificationStatus::Rejected.id(), 3);
    }

    #[test]
    fn test_wire_name_round_trip() {
        assert_eq!(
            ProjectStatus::from_name("pending_review"),
            Some(ProjectStatus::PendingReview)
        );
        assert_eq!(ProjectStatus::PendingReview.name(), "pending_review");
        assert_eq!(ProjectStatus::from_name("bogus"), None);
    }

    #[test]
    fn test_from_id() {
        assert_eq!(ProjectStatus::from_id(4), Some(ProjectStatus::Open));
        assert_eq!(ProjectStatus::from_id(99), None);
    }
}
