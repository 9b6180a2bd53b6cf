use crate::domain::model::AppointmentStatus;
use chrono::NaiveDate;
use thiserror::Error;

/// Booking, cancellation and billing failures. All of them are recoverable:
/// the caller reports the message and carries on with the next request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Patient or Doctor ID cannot be empty.")]
    InvalidIdentifier,

    #[error("Patient ID not found: {0}")]
    PatientNotFound(String),

    #[error("Doctor ID not found: {0}")]
    DoctorNotFound(String),

    #[error("Invalid date format '{0}'. Please use YYYY-MM-DD.")]
    InvalidDateFormat(String),

    #[error("You cannot book an appointment in the past ({0}).")]
    PastDate(NaiveDate),

    #[error("Doctor {doctor_id} is not available at {time}.")]
    SlotNotAvailable { doctor_id: String, time: String },

    #[error("This time slot is already booked ({doctor_id}, {date} at {time}).")]
    SlotAlreadyBooked {
        doctor_id: String,
        date: NaiveDate,
        time: String,
    },

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    #[error("Cannot bill appointment {appointment_id}: status is {status}.")]
    InvalidAppointmentState {
        appointment_id: String,
        status: AppointmentStatus,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    High,
    Critical,
}

/// Errors raised by the shell around the registry: configuration and console I/O.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Ledger(_) => ErrorSeverity::Low,
            AppError::ConfigParse { .. } | AppError::InvalidConfigValue { .. } => {
                ErrorSeverity::High
            }
            AppError::Io(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::Io(_) => "Check that the config file exists and stdin/stdout are usable",
            AppError::ConfigParse { .. } => "Make sure the config file is valid TOML",
            AppError::InvalidConfigValue { .. } => {
                "Fix the offending value in the config file or the command-line override"
            }
            AppError::Ledger(_) => "Correct the request and try again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::Io(e) => format!("Could not read or write: {}", e),
            AppError::ConfigParse { message } => format!("The configuration is not valid: {}", message),
            AppError::InvalidConfigValue { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            AppError::Ledger(e) => e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_messages_are_user_facing() {
        assert_eq!(
            LedgerError::InvalidIdentifier.to_string(),
            "Patient or Doctor ID cannot be empty."
        );
        let err = LedgerError::InvalidAppointmentState {
            appointment_id: "A001".to_string(),
            status: AppointmentStatus::Cancelled,
        };
        assert_eq!(
            err.to_string(),
            "Cannot bill appointment A001: status is Cancelled."
        );
    }

    #[test]
    fn test_app_error_severity() {
        let ledger: AppError = LedgerError::AppointmentNotFound("A009".to_string()).into();
        assert_eq!(ledger.severity(), ErrorSeverity::Low);
        assert_eq!(ledger.user_friendly_message(), "Appointment not found: A009");

        let config = AppError::InvalidConfigValue {
            field: "billing.consultation_fee".to_string(),
            value: "-1".to_string(),
            reason: "Fee cannot be negative".to_string(),
        };
        assert_eq!(config.severity(), ErrorSeverity::High);

        let io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }
}
