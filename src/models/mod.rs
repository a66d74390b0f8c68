pub mod options;

use serde::{Deserialize, Serialize};

pub use options::{
    Activity, Budget, DecisionMaker, Financing, Purpose, SiteVisit, Timeline, UnknownOption,
};

/// One buyer-qualification enquiry, as written to the enquiries table.
///
/// Carries no identifier or timestamp: the store assigns both on arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnquiryRecord {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub timeline: Timeline,
    pub financing: Financing,
    pub purpose: Purpose,
    pub decision_maker: DecisionMaker,
    pub activity: Activity,
    pub budget: Budget,
    pub site_visit: SiteVisit,
}

#[cfg(test)]
pub(crate) fn sample_record() -> EnquiryRecord {
    EnquiryRecord {
        name: "Asha Menon".to_string(),
        email: "asha@example.com".to_string(),
        mobile: "+91 98450 12345".to_string(),
        timeline: Timeline::Short,
        financing: Financing::InProgress,
        purpose: Purpose::Residence,
        decision_maker: DecisionMaker::Partner,
        activity: Activity::Active,
        budget: Budget::Mid,
        site_visit: SiteVisit::NotReady,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_serializes_to_table_shape() {
        let value = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Asha Menon",
                "email": "asha@example.com",
                "mobile": "+91 98450 12345",
                "timeline": "Short",
                "financing": "In Progress",
                "purpose": "Residence",
                "decision_maker": "Partner",
                "activity": "Active",
                "budget": "Mid",
                "site_visit": "Not ready"
            })
        );
    }
}
