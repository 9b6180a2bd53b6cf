pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::clock::{FixedClock, SystemClock};
pub use app::handler::{handle, Request, Response};
pub use app::menu::Menu;
pub use config::ClinicConfig;
pub use core::registry::Registry;
pub use domain::model::{
    Appointment, AppointmentListing, AppointmentStatus, AppointmentView, BillSummary, Doctor,
    Patient,
};
pub use domain::ports::{Clock, LedgerSettings};
pub use utils::error::{AppError, LedgerError, Result};
