pub mod billing;
pub mod ids;
pub mod registry;

pub use crate::domain::model::{
    Appointment, AppointmentListing, AppointmentStatus, AppointmentView, BillSummary, Doctor,
    Patient,
};
pub use crate::domain::ports::{Clock, LedgerSettings};
pub use crate::utils::error::Result;
