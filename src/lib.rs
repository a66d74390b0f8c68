//! Property enquiry intake: the buyer-qualification form, the stores it
//! writes to, and the relay that hands enquiries on to workflow automation.

pub mod form;
pub mod models;
pub mod relay;
pub mod settings;
pub mod store;
pub mod validation;
