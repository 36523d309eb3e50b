//! The lead entity and its enumerated field sets.
//!
//! Every enum round-trips through one canonical display string; the same
//! string appears in JSON payloads, in the database TEXT columns, and in
//! validation error messages.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

macro_rules! define_str_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// All members of the enumerated set, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Canonical display strings, for validation messages.
            pub const LABELS: &'static [&'static str] = &[ $( $label ),+ ];

            /// The canonical display string.
            pub fn as_str(self) -> &'static str {
                match self { $( $name::$variant => $label ),+ }
            }

            /// Parse a canonical display string. Returns `None` for anything
            /// outside the enumerated set (including the empty string).
            pub fn parse(value: &str) -> Option<$name> {
                match value {
                    $( $label => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<$name, D::Error> {
                let value = String::deserialize(deserializer)?;
                $name::parse(&value)
                    .ok_or_else(|| serde::de::Error::unknown_variant(&value, &[$( $label ),+]))
            }
        }
    };
}

define_str_enum! {
    /// Acquisition channel through which a lead arrived.
    LeadSource {
        SmartFinancial => "Smart Financial",
        MediaAlpha => "Media Alpha",
        Website => "Website",
        Referral => "Referral",
        SocialMedia => "Social Media",
        Email => "Email",
        Phone => "Phone",
        Other => "Other",
    }
}

define_str_enum! {
    /// Where the quote stands with the prospect.
    QuoteStatus {
        Requested => "Requested",
        Sent => "Sent",
        Negotiating => "Negotiating",
        Accepted => "Accepted",
        Declined => "Declined",
    }
}

define_str_enum! {
    /// Lead temperature; drives the follow-up cadence.
    Temperature {
        Hot => "Hot",
        Warm => "Warm",
        Cold => "Cold",
    }
}

define_str_enum! {
    /// Lifecycle state. Closed and Lost are terminal.
    LeadStatus {
        Active => "Active",
        Closed => "Closed",
        Lost => "Lost",
    }
}

/// A prospective customer record tracked through the sales pipeline.
///
/// Invariants (enforced by the lifecycle engine and the store contract):
/// - `id` is unique and never reassigned.
/// - `created_at <= next_followup`.
/// - `status` only ever moves Active -> Closed or Active -> Lost.
/// - `quoted_price` is non-negative when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub source: LeadSource,
    pub contact_method: String,
    pub quote_status: QuoteStatus,
    /// Temperature, `lead_status` in the wire and storage formats.
    pub lead_status: Temperature,
    pub quoted_price: Option<f64>,
    pub created_at: Timestamp,
    pub next_followup: Timestamp,
    pub status: LeadStatus,
}
