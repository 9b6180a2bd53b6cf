use crate::core::registry::Registry;
use crate::domain::model::{AppointmentListing, AppointmentView, BillSummary, Doctor, Patient};
use crate::domain::ports::Clock;
use crate::utils::error::LedgerError;

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    AddPatient {
        name: String,
        age: u32,
        gender: String,
    },
    AddDoctor {
        name: String,
        age: u32,
        gender: String,
        specialty: String,
        schedule: Vec<String>,
    },
    BookAppointment {
        patient_id: String,
        doctor_id: String,
        date: String,
        time: String,
    },
    CancelAppointment {
        appointment_id: String,
    },
    ListAppointments,
    ComputeBill {
        appointment_id: String,
        extra_fee: f64,
    },
    ViewPatient {
        patient_id: String,
    },
    ViewDoctor {
        doctor_id: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    PatientAdded { patient_id: String, name: String },
    DoctorAdded { doctor_id: String, name: String },
    AppointmentBooked { appointment_id: String },
    AppointmentCancelled { appointment_id: String },
    Listing(AppointmentListing),
    Bill(BillSummary),
    PatientProfile {
        patient: Patient,
        appointments: Vec<AppointmentView>,
    },
    DoctorSchedule(Doctor),
    Failed(LedgerError),
}

impl Response {
    pub fn is_failure(&self) -> bool {
        matches!(self, Response::Failed(_))
    }
}

/// Applies one request to the registry. Failures come back as `Response::Failed`.
pub fn handle<C: Clock>(registry: &mut Registry<C>, request: Request) -> Response {
    match request {
        Request::AddPatient { name, age, gender } => {
            let patient_id = registry.add_patient(&name, age, &gender);
            Response::PatientAdded { patient_id, name }
        }
        Request::AddDoctor {
            name,
            age,
            gender,
            specialty,
            schedule,
        } => {
            let doctor_id = registry.add_doctor(&name, age, &gender, &specialty, &schedule);
            Response::DoctorAdded { doctor_id, name }
        }
        Request::BookAppointment {
            patient_id,
            doctor_id,
            date,
            time,
        } => match registry.book_appointment(&patient_id, &doctor_id, &date, &time) {
            Ok(appointment_id) => Response::AppointmentBooked { appointment_id },
            Err(e) => Response::Failed(e),
        },
        Request::CancelAppointment { appointment_id } => {
            match registry.cancel_appointment(&appointment_id) {
                Ok(()) => Response::AppointmentCancelled { appointment_id },
                Err(e) => Response::Failed(e),
            }
        }
        Request::ListAppointments => Response::Listing(registry.list_appointments()),
        Request::ComputeBill {
            appointment_id,
            extra_fee,
        } => match registry.compute_bill(&appointment_id, extra_fee) {
            Ok(bill) => Response::Bill(bill),
            Err(e) => Response::Failed(e),
        },
        Request::ViewPatient { patient_id } => {
            let Some(patient) = registry.patient(&patient_id).cloned() else {
                return Response::Failed(LedgerError::PatientNotFound(patient_id));
            };
            match registry.patient_appointments(&patient_id) {
                Ok(appointments) => Response::PatientProfile {
                    patient,
                    appointments,
                },
                Err(e) => Response::Failed(e),
            }
        }
        Request::ViewDoctor { doctor_id } => match registry.doctor(&doctor_id) {
            Some(doctor) => Response::DoctorSchedule(doctor.clone()),
            None => Response::Failed(LedgerError::DoctorNotFound(doctor_id)),
        },
    }
}
