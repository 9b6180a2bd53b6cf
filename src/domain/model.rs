use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub patient_id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    /// Appointment IDs in booking order, cancelled ones included.
    pub appointments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub doctor_id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub specialty: String,
    pub schedule: Vec<String>,
}

impl Doctor {
    pub fn is_available(&self, time: &str) -> bool {
        self.schedule.iter().any(|slot| slot == time)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    Confirmed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Confirmed => write!(f, "Confirmed"),
            AppointmentStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub appointment_id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn is_confirmed(&self) -> bool {
        self.status == AppointmentStatus::Confirmed
    }

    /// True when this appointment holds the (doctor, date, time) slot.
    pub fn occupies(&self, doctor_id: &str, date: NaiveDate, time: &str) -> bool {
        self.is_confirmed() && self.doctor_id == doctor_id && self.date == date && self.time == time
    }
}

/// Read-only projection of an appointment joined with patient and doctor names.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AppointmentView {
    pub appointment_id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppointmentListing {
    Empty,
    Appointments(Vec<AppointmentView>),
}

impl AppointmentListing {
    pub fn len(&self) -> usize {
        match self {
            AppointmentListing::Empty => 0,
            AppointmentListing::Appointments(views) => views.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, AppointmentListing::Empty)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BillSummary {
    pub appointment_id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub doctor_name: String,
    pub specialty: String,
    pub date: NaiveDate,
    pub time: String,
    pub consultation_fee: f64,
    pub extra_fee: f64,
    pub total: f64,
    /// Set when the requested extra fee was negative or not a number and got replaced by 0.
    pub extra_fee_clamped: bool,
}
