//! Closed string vocabularies used by tenders and bids.
//!
//! Every enum serializes to (and parses from) its capitalised variant name,
//! which is also the value stored in the database.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// All accepted values, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok($name::$variant),)+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        stringify!($name),
                        [$(stringify!($variant)),+].join(", ")
                    ))),
                }
            }
        }
    };
}

string_enum! {
    /// Lifecycle of a tender.
    TenderStatus { Created, Published, Closed }
}

string_enum! {
    /// Lifecycle of a bid as set through a direct status change.
    BidStatus { Created, Published, Canceled }
}

string_enum! {
    /// Outcome submitted by the tender owner for a bid. Never stored on the bid.
    Decision { Approved, Rejected }
}

string_enum! {
    /// Kind of service a tender procures.
    ServiceType { Construction, Delivery, Manufacture }
}

string_enum! {
    /// Whether a bid was authored by an individual or on behalf of an organization.
    AuthorType { User, Organization }
}

string_enum! {
    /// Legal form of an organization.
    OrganizationType { IE, LLC, JSC }
}
