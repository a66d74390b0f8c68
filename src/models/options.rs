use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A categorical answer that is not one of the question's options
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid option for {field}")]
pub struct UnknownOption {
    pub field: &'static str,
    pub value: String,
}

/// Declares one questionnaire question with a closed set of answers.
///
/// Each answer has the value stored in the table and sent over the wire,
/// plus the label the questionnaire shows for it.
macro_rules! question {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal, $prompt:literal) {
            $($variant:ident => $value:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Placeholder text shown before an answer is picked
            pub const PROMPT: &'static str = $prompt;

            /// `(value, label)` for every answer, in display order
            pub const OPTIONS: &'static [(&'static str, &'static str)] = &[$(($value, $label)),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(UnknownOption {
                        field: $field,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

question! {
    /// How soon the buyer wants to purchase
    Timeline("timeline", "When are you looking to buy?") {
        Immediate => "Immediate", "Immediately / Within 3 months";
        Short => "Short", "3 to 6 months";
        Medium => "Medium", "6 to 12 months";
        Long => "Long", "Just browsing / 12+ months";
    }
}

question! {
    /// Where the buyer stands on funding the purchase
    Financing("financing", "Select financing status") {
        Ready => "Ready", "Cash buyer / Pre-approved";
        InProgress => "In Progress", "In talks with a lender";
        Contingent => "Contingent", "Need to sell current property";
        Early => "Early", "Haven't started financing yet";
    }
}

question! {
    Purpose("purpose", "Primary goal for this purchase") {
        Residence => "Residence", "Primary Residence (End-user)";
        Investment => "Investment", "Investment (Rental/Resale)";
        Research => "Research", "General market research";
    }
}

question! {
    DecisionMaker("decision_maker", "Are you the primary decision-maker?") {
        Sole => "Sole", "Yes, I am the sole decision-maker";
        Partner => "Partner", "Yes, deciding with a partner";
        Other => "Other", "No, researching for someone else";
    }
}

question! {
    Activity("activity", "Your recent activity level") {
        Active => "Active", "Actively visiting properties";
        Online => "Online", "Searching online for 1 month+";
        New => "New", "Just started looking";
    }
}

question! {
    /// Estimated budget band (INR)
    Budget("budget", "Select estimated budget") {
        Premium => "Premium", "Above ₹1.5 Crore";
        High => "High", "₹1 Crore - ₹1.5 Crore";
        Mid => "Mid", "₹60 Lakhs - ₹1 Crore";
        Entry => "Entry", "Below ₹60 Lakhs";
    }
}

question! {
    SiteVisit("site_visit", "When can you visit a site?") {
        Immediate => "Immediate", "Ready this week";
        Near => "Near", "Within next 2 weeks";
        NotReady => "Not ready", "Not ready for a visit yet";
    }
}
