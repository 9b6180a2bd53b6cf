use crate::app::handler::Response;
use crate::domain::model::{AppointmentListing, AppointmentView, BillSummary, Doctor, Patient};
use crate::domain::ports::LedgerSettings;

const RULE_WIDTH: usize = 40;

pub fn appointment_line(view: &AppointmentView) -> String {
    format!(
        "{}: Patient {}, Doctor {}, {} at {}, Status: {}",
        view.appointment_id,
        view.patient_name,
        view.doctor_name,
        view.date.format("%Y-%m-%d"),
        view.time,
        view.status
    )
}

pub fn listing(listing: &AppointmentListing) -> String {
    match listing {
        AppointmentListing::Empty => "No appointments scheduled.".to_string(),
        AppointmentListing::Appointments(views) => {
            let mut lines = vec!["--- All Appointments ---".to_string()];
            lines.extend(views.iter().map(appointment_line));
            lines.join("\n")
        }
    }
}

pub fn patient_profile(patient: &Patient, appointments: &[AppointmentView]) -> String {
    let mut lines = vec![format!(
        "Patient ID: {}, Name: {}, Age: {}, Gender: {}",
        patient.patient_id, patient.name, patient.age, patient.gender
    )];
    if appointments.is_empty() {
        lines.push("No appointments booked.".to_string());
    } else {
        lines.extend(appointments.iter().map(appointment_line));
    }
    lines.join("\n")
}

pub fn doctor_schedule(doctor: &Doctor) -> String {
    let times = if doctor.schedule.is_empty() {
        "(none)".to_string()
    } else {
        doctor.schedule.join(", ")
    };
    format!(
        "Doctor ID: {}, Name: {}, Specialty: {}\nAvailable Times: {}",
        doctor.doctor_id, doctor.name, doctor.specialty, times
    )
}

/// Printable receipt in the clinic's currency.
pub fn receipt<S: LedgerSettings + ?Sized>(bill: &BillSummary, settings: &S) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let currency = settings.currency();
    let title = format!("{} BILLING", settings.clinic_name().to_uppercase());

    let mut lines = vec![
        heavy.clone(),
        format!("{:^width$}", title, width = RULE_WIDTH).trim_end().to_string(),
        heavy.clone(),
        format!("Appointment ID: {}", bill.appointment_id),
        format!("Patient: {} (ID: {})", bill.patient_name, bill.patient_id),
        format!("Doctor: {} ({})", bill.doctor_name, bill.specialty),
        format!("Date: {}", bill.date.format("%Y-%m-%d")),
        format!("Time: {}", bill.time),
        light.clone(),
        format!("Consultation Fee: {} ${:.2}", currency, bill.consultation_fee),
        format!("Additional Fees: {} ${:.2}", currency, bill.extra_fee),
        light,
        format!("TOTAL BILL: {} ${:.2}", currency, bill.total),
        heavy,
    ];
    lines.push(format!("Thank you for choosing {}!", settings.clinic_name()));
    lines.join("\n")
}

/// Text the menu prints for a handler response.
pub fn response<S: LedgerSettings + ?Sized>(response: &Response, settings: &S) -> String {
    match response {
        Response::PatientAdded { patient_id, name } => {
            format!("Patient {} added with ID: {}", name, patient_id)
        }
        Response::DoctorAdded { doctor_id, name } => {
            format!("Doctor {} added with ID: {}", name, doctor_id)
        }
        Response::AppointmentBooked { appointment_id } => {
            format!("Appointment booked with ID: {}", appointment_id)
        }
        Response::AppointmentCancelled { appointment_id } => {
            format!("Appointment {} has been cancelled.", appointment_id)
        }
        Response::Listing(l) => listing(l),
        Response::Bill(bill) => receipt(bill, settings),
        Response::PatientProfile {
            patient,
            appointments,
        } => patient_profile(patient, appointments),
        Response::DoctorSchedule(doctor) => doctor_schedule(doctor),
        Response::Failed(e) => e.to_string(),
    }
}
