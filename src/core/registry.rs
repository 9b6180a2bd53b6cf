use crate::core::billing::{compute_charges, CONSULTATION_FEE};
use crate::core::ids::IdSequence;
use crate::domain::model::{
    Appointment, AppointmentListing, AppointmentStatus, AppointmentView, BillSummary, Doctor,
    Patient,
};
use crate::domain::ports::Clock;
use crate::utils::error::{LedgerError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Insertion-ordered store keyed by generated identifier.
#[derive(Debug, Clone)]
struct Table<T> {
    rows: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn insert(&mut self, id: String, row: T) {
        self.index.insert(id, self.rows.len());
        self.rows.push(row);
    }

    fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&i| &self.rows[i])
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        match self.index.get(id) {
            Some(&i) => self.rows.get_mut(i),
            None => None,
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parses `YYYY-MM-DD`. Month and day may drop their leading zero; signs,
/// padding and wider years are rejected before chrono sees the text.
fn parse_date(raw: &str) -> Result<NaiveDate> {
    static DATE_SHAPE: OnceLock<Regex> = OnceLock::new();
    let re = DATE_SHAPE.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$").expect("date pattern is valid")
    });

    if !re.is_match(raw) {
        return Err(LedgerError::InvalidDateFormat(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| LedgerError::InvalidDateFormat(raw.to_string()))
}

/// In-memory owner of every patient, doctor and appointment.
pub struct Registry<C: Clock> {
    clock: C,
    consultation_fee: f64,
    patients: Table<Patient>,
    doctors: Table<Doctor>,
    appointments: Table<Appointment>,
    patient_ids: IdSequence,
    doctor_ids: IdSequence,
    appointment_ids: IdSequence,
}

impl<C: Clock> Registry<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            consultation_fee: CONSULTATION_FEE,
            patients: Table::new(),
            doctors: Table::new(),
            appointments: Table::new(),
            patient_ids: IdSequence::new('P'),
            doctor_ids: IdSequence::new('D'),
            appointment_ids: IdSequence::new('A'),
        }
    }

    pub fn with_consultation_fee(mut self, fee: f64) -> Self {
        self.consultation_fee = fee;
        self
    }

    pub fn consultation_fee(&self) -> f64 {
        self.consultation_fee
    }

    pub fn add_patient(&mut self, name: &str, age: u32, gender: &str) -> String {
        let patient_id = self.patient_ids.next_id();
        let patient = Patient {
            patient_id: patient_id.clone(),
            name: name.to_string(),
            age,
            gender: gender.to_string(),
            appointments: Vec::new(),
        };
        self.patients.insert(patient_id.clone(), patient);

        info!("Patient {} added with ID: {}", name, patient_id);
        patient_id
    }

    /// Registers a doctor. Repeated schedule labels keep only their first occurrence.
    pub fn add_doctor<S: AsRef<str>>(
        &mut self,
        name: &str,
        age: u32,
        gender: &str,
        specialty: &str,
        schedule: &[S],
    ) -> String {
        let mut slots: Vec<String> = Vec::with_capacity(schedule.len());
        for label in schedule {
            let label = label.as_ref();
            if !slots.iter().any(|s| s == label) {
                slots.push(label.to_string());
            }
        }
        if slots.is_empty() {
            warn!("Doctor {} registered with an empty schedule", name);
        }

        let doctor_id = self.doctor_ids.next_id();
        let doctor = Doctor {
            doctor_id: doctor_id.clone(),
            name: name.to_string(),
            age,
            gender: gender.to_string(),
            specialty: specialty.to_string(),
            schedule: slots,
        };
        self.doctors.insert(doctor_id.clone(), doctor);

        info!("Doctor {} added with ID: {}", name, doctor_id);
        doctor_id
    }

    pub fn book_appointment(
        &mut self,
        patient_id: &str,
        doctor_id: &str,
        date: &str,
        time: &str,
    ) -> Result<String> {
        let date = self
            .check_booking(patient_id, doctor_id, date, time)
            .inspect_err(|e| warn!("Booking rejected: {}", e))?;

        let appointment_id = self.appointment_ids.next_id();
        let appointment = Appointment {
            appointment_id: appointment_id.clone(),
            patient_id: patient_id.to_string(),
            doctor_id: doctor_id.to_string(),
            date,
            time: time.to_string(),
            status: AppointmentStatus::Confirmed,
        };
        self.appointments.insert(appointment_id.clone(), appointment);
        if let Some(patient) = self.patients.get_mut(patient_id) {
            patient.appointments.push(appointment_id.clone());
        }

        info!(
            "Appointment booked with ID: {} ({} with {} on {} at {})",
            appointment_id, patient_id, doctor_id, date, time
        );
        Ok(appointment_id)
    }

    // 依序檢查，第一個失敗即返回
    fn check_booking(
        &self,
        patient_id: &str,
        doctor_id: &str,
        date: &str,
        time: &str,
    ) -> Result<NaiveDate> {
        if patient_id.trim().is_empty() || doctor_id.trim().is_empty() {
            return Err(LedgerError::InvalidIdentifier);
        }
        if !self.patients.contains(patient_id) {
            return Err(LedgerError::PatientNotFound(patient_id.to_string()));
        }
        let doctor = self
            .doctors
            .get(doctor_id)
            .ok_or_else(|| LedgerError::DoctorNotFound(doctor_id.to_string()))?;

        let date = parse_date(date)?;
        if date < self.clock.today() {
            return Err(LedgerError::PastDate(date));
        }

        if !doctor.is_available(time) {
            return Err(LedgerError::SlotNotAvailable {
                doctor_id: doctor_id.to_string(),
                time: time.to_string(),
            });
        }
        if self
            .appointments
            .iter()
            .any(|a| a.occupies(doctor_id, date, time))
        {
            return Err(LedgerError::SlotAlreadyBooked {
                doctor_id: doctor_id.to_string(),
                date,
                time: time.to_string(),
            });
        }

        Ok(date)
    }

    /// Marks the appointment cancelled. Cancelling twice is not an error.
    pub fn cancel_appointment(&mut self, appointment_id: &str) -> Result<()> {
        let appointment = self
            .appointments
            .get_mut(appointment_id)
            .ok_or_else(|| LedgerError::AppointmentNotFound(appointment_id.to_string()))?;

        if appointment.status == AppointmentStatus::Cancelled {
            debug!("Appointment {} was already cancelled", appointment_id);
        }
        appointment.status = AppointmentStatus::Cancelled;

        info!("Appointment {} has been cancelled", appointment_id);
        Ok(())
    }

    pub fn list_appointments(&self) -> AppointmentListing {
        if self.appointments.is_empty() {
            return AppointmentListing::Empty;
        }
        AppointmentListing::Appointments(self.appointments.iter().map(|a| self.view(a)).collect())
    }

    pub fn compute_bill(&self, appointment_id: &str, extra_fee: f64) -> Result<BillSummary> {
        let appointment = self
            .appointments
            .get(appointment_id)
            .ok_or_else(|| LedgerError::AppointmentNotFound(appointment_id.to_string()))?;

        if !appointment.is_confirmed() {
            return Err(LedgerError::InvalidAppointmentState {
                appointment_id: appointment_id.to_string(),
                status: appointment.status,
            });
        }

        let charges = compute_charges(self.consultation_fee, extra_fee);
        if charges.extra_fee_clamped {
            debug!("Extra fee {} clamped to 0 for {}", extra_fee, appointment_id);
        }

        let patient_name = self.patient_name(&appointment.patient_id);
        let (doctor_name, specialty) = match self.doctors.get(&appointment.doctor_id) {
            Some(d) => (d.name.clone(), d.specialty.clone()),
            None => (String::new(), String::new()),
        };

        debug!("Bill for {}: total {:.2}", appointment_id, charges.total);
        Ok(BillSummary {
            appointment_id: appointment.appointment_id.clone(),
            patient_id: appointment.patient_id.clone(),
            patient_name,
            doctor_name,
            specialty,
            date: appointment.date,
            time: appointment.time.clone(),
            consultation_fee: charges.consultation_fee,
            extra_fee: charges.extra_fee,
            total: charges.total,
            extra_fee_clamped: charges.extra_fee_clamped,
        })
    }

    pub fn patient(&self, patient_id: &str) -> Option<&Patient> {
        self.patients.get(patient_id)
    }

    pub fn doctor(&self, doctor_id: &str) -> Option<&Doctor> {
        self.doctors.get(doctor_id)
    }

    pub fn appointment(&self, appointment_id: &str) -> Option<&Appointment> {
        self.appointments.get(appointment_id)
    }

    pub fn patient_appointments(&self, patient_id: &str) -> Result<Vec<AppointmentView>> {
        let patient = self
            .patients
            .get(patient_id)
            .ok_or_else(|| LedgerError::PatientNotFound(patient_id.to_string()))?;

        Ok(patient
            .appointments
            .iter()
            .filter_map(|id| self.appointments.get(id))
            .map(|a| self.view(a))
            .collect())
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    pub fn doctor_count(&self) -> usize {
        self.doctors.len()
    }

    pub fn appointment_count(&self) -> usize {
        self.appointments.len()
    }

    fn patient_name(&self, patient_id: &str) -> String {
        self.patients
            .get(patient_id)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    fn view(&self, appointment: &Appointment) -> AppointmentView {
        let patient_name = self.patient_name(&appointment.patient_id);
        let doctor_name = self
            .doctors
            .get(&appointment.doctor_id)
            .map(|d| d.name.clone())
            .unwrap_or_default();

        AppointmentView {
            appointment_id: appointment.appointment_id.clone(),
            patient_id: appointment.patient_id.clone(),
            patient_name,
            doctor_id: appointment.doctor_id.clone(),
            doctor_name,
            date: appointment.date,
            time: appointment.time.clone(),
            status: appointment.status,
        }
    }
}
