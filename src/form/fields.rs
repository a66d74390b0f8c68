use crate::models::{
    Activity, Budget, DecisionMaker, EnquiryRecord, Financing, Purpose, SiteVisit, Timeline,
    UnknownOption,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown form field '{0}'")]
    UnknownField(String),
    #[error("{} is required", .0.label())]
    Missing(FormField),
    #[error(transparent)]
    InvalidOption(#[from] UnknownOption),
}

/// One input on the enquiry form, in the order the form shows them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Mobile,
    Timeline,
    Financing,
    Purpose,
    DecisionMaker,
    Activity,
    Budget,
    SiteVisit,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::Name,
        FormField::Email,
        FormField::Mobile,
        FormField::Timeline,
        FormField::Financing,
        FormField::Purpose,
        FormField::DecisionMaker,
        FormField::Activity,
        FormField::Budget,
        FormField::SiteVisit,
    ];

    /// Input name, matching the stored column
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Mobile => "mobile",
            FormField::Timeline => "timeline",
            FormField::Financing => "financing",
            FormField::Purpose => "purpose",
            FormField::DecisionMaker => "decision_maker",
            FormField::Activity => "activity",
            FormField::Budget => "budget",
            FormField::SiteVisit => "site_visit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Full Name",
            FormField::Email => "Email Address",
            FormField::Mobile => "Mobile Number",
            FormField::Timeline => "Purchase Timeline",
            FormField::Financing => "Financing Situation",
            FormField::Purpose => "Property Goal",
            FormField::DecisionMaker => "Decision Power",
            FormField::Activity => "Market Activity",
            FormField::Budget => "Budget Range (INR)",
            FormField::SiteVisit => "Consultation Readiness",
        }
    }

    /// Placeholder shown in the empty input
    pub fn prompt(&self) -> &'static str {
        match self {
            FormField::Name => "Enter your full name",
            FormField::Email => "Enter your email address",
            FormField::Mobile => "Enter your mobile number",
            FormField::Timeline => Timeline::PROMPT,
            FormField::Financing => Financing::PROMPT,
            FormField::Purpose => Purpose::PROMPT,
            FormField::DecisionMaker => DecisionMaker::PROMPT,
            FormField::Activity => Activity::PROMPT,
            FormField::Budget => Budget::PROMPT,
            FormField::SiteVisit => SiteVisit::PROMPT,
        }
    }

    /// `(value, label)` choices for select inputs, `None` for free text
    pub fn options(&self) -> Option<&'static [(&'static str, &'static str)]> {
        match self {
            FormField::Name | FormField::Email | FormField::Mobile => None,
            FormField::Timeline => Some(Timeline::OPTIONS),
            FormField::Financing => Some(Financing::OPTIONS),
            FormField::Purpose => Some(Purpose::OPTIONS),
            FormField::DecisionMaker => Some(DecisionMaker::OPTIONS),
            FormField::Activity => Some(Activity::OPTIONS),
            FormField::Budget => Some(Budget::OPTIONS),
            FormField::SiteVisit => Some(SiteVisit::OPTIONS),
        }
    }
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw values of every input, exactly as typed or picked.
/// Treated as an immutable value: a change produces a new snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub timeline: String,
    pub financing: String,
    pub purpose: String,
    pub decision_maker: String,
    pub activity: String,
    pub budget: String,
    pub site_visit: String,
}

impl FormSnapshot {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Mobile => &self.mobile,
            FormField::Timeline => &self.timeline,
            FormField::Financing => &self.financing,
            FormField::Purpose => &self.purpose,
            FormField::DecisionMaker => &self.decision_maker,
            FormField::Activity => &self.activity,
            FormField::Budget => &self.budget,
            FormField::SiteVisit => &self.site_visit,
        }
    }

    /// A copy of this snapshot with `field` set to `value`
    pub fn with(&self, field: FormField, value: String) -> Self {
        let mut next = self.clone();
        let slot = match field {
            FormField::Name => &mut next.name,
            FormField::Email => &mut next.email,
            FormField::Mobile => &mut next.mobile,
            FormField::Timeline => &mut next.timeline,
            FormField::Financing => &mut next.financing,
            FormField::Purpose => &mut next.purpose,
            FormField::DecisionMaker => &mut next.decision_maker,
            FormField::Activity => &mut next.activity,
            FormField::Budget => &mut next.budget,
            FormField::SiteVisit => &mut next.site_visit,
        };
        *slot = value;
        next
    }

    /// First required input that is still empty, in form order
    pub fn first_missing(&self) -> Option<FormField> {
        FormField::ALL
            .into_iter()
            .find(|field| self.get(*field).is_empty())
    }
}

impl TryFrom<&FormSnapshot> for EnquiryRecord {
    type Error = FormError;

    fn try_from(snapshot: &FormSnapshot) -> Result<Self, Self::Error> {
        if let Some(field) = snapshot.first_missing() {
            return Err(FormError::Missing(field));
        }

        Ok(EnquiryRecord {
            name: snapshot.name.clone(),
            email: snapshot.email.clone(),
            mobile: snapshot.mobile.clone(),
            timeline: snapshot.timeline.parse()?,
            financing: snapshot.financing.parse()?,
            purpose: snapshot.purpose.parse()?,
            decision_maker: snapshot.decision_maker.parse()?,
            activity: snapshot.activity.parse()?,
            budget: snapshot.budget.parse()?,
            site_visit: snapshot.site_visit.parse()?,
        })
    }
}

#[cfg(test)]
pub(crate) fn filled_snapshot() -> FormSnapshot {
    FormSnapshot {
        name: "Asha Menon".to_string(),
        email: "asha@example.com".to_string(),
        mobile: "+91 98450 12345".to_string(),
        timeline: "Short".to_string(),
        financing: "In Progress".to_string(),
        purpose: "Residence".to_string(),
        decision_maker: "Partner".to_string(),
        activity: "Active".to_string(),
        budget: "Mid".to_string(),
        site_visit: "Not ready".to_string(),
    }
}
