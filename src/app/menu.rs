use crate::app::handler::{handle, Request, Response};
use crate::app::render;
use crate::core::registry::Registry;
use crate::domain::ports::{Clock, LedgerSettings};
use crate::utils::error::AppResult;
use std::io::{BufRead, Write};

const MENU: &str = "\
===== Hospital Management System =====
1. Add Patient
2. Add Doctor
3. Book Appointment
4. View Appointments
5. Cancel Appointment
6. Generate Bill
7. View Patient Profile
8. View Doctor Schedule
9. Exit";

enum Flow {
    Continue,
    Exit,
}

/// Interactive text menu over any line-based input and output.
pub struct Menu<'a, R, W, S: ?Sized> {
    input: R,
    output: W,
    settings: &'a S,
}

impl<'a, R: BufRead, W: Write, S: LedgerSettings + ?Sized> Menu<'a, R, W, S> {
    pub fn new(input: R, output: W, settings: &'a S) -> Self {
        Self {
            input,
            output,
            settings,
        }
    }

    /// Runs until the user picks Exit or the input ends.
    pub fn run<C: Clock>(&mut self, registry: &mut Registry<C>) -> AppResult<()> {
        loop {
            writeln!(self.output, "\n{}", MENU)?;
            let Some(choice) = self.prompt("Enter your choice (1-9): ")? else {
                break;
            };
            tracing::debug!("Menu choice: {:?}", choice);

            let flow = match choice.trim() {
                "1" => self.add_patient(registry)?,
                "2" => self.add_doctor(registry)?,
                "3" => self.book_appointment(registry)?,
                "4" => self.dispatch(registry, Request::ListAppointments)?,
                "5" => self.cancel_appointment(registry)?,
                "6" => self.generate_bill(registry)?,
                "7" => self.view_patient(registry)?,
                "8" => self.view_doctor(registry)?,
                "9" => {
                    writeln!(self.output, "Exiting the system. Goodbye!")?;
                    Flow::Exit
                }
                _ => {
                    writeln!(self.output, "Invalid option. Please try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> AppResult<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    // 年齡必須是非負整數，否則重新輸入
    fn prompt_age(&mut self, message: &str) -> AppResult<Option<u32>> {
        loop {
            let Some(raw) = self.prompt(message)? else {
                return Ok(None);
            };
            match raw.trim().parse::<i64>() {
                Ok(age) if age < 0 => writeln!(self.output, "Age cannot be negative.")?,
                Ok(age) => match u32::try_from(age) {
                    Ok(age) => return Ok(Some(age)),
                    Err(_) => writeln!(self.output, "Please enter a valid number.")?,
                },
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    fn dispatch<C: Clock>(
        &mut self,
        registry: &mut Registry<C>,
        request: Request,
    ) -> AppResult<Flow> {
        let response = handle(registry, request);
        if let Response::Bill(bill) = &response {
            if bill.extra_fee_clamped {
                writeln!(self.output, "Fee cannot be negative. Defaulting to 0.")?;
            }
        }
        writeln!(self.output, "{}", render::response(&response, self.settings))?;
        Ok(Flow::Continue)
    }

    fn add_patient<C: Clock>(&mut self, registry: &mut Registry<C>) -> AppResult<Flow> {
        let Some(name) = self.prompt("Enter patient's name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(age) = self.prompt_age("Enter patient's age: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(gender) = self.prompt("Enter patient's gender: ")? else {
            return Ok(Flow::Exit);
        };

        self.dispatch(registry, Request::AddPatient { name, age, gender })
    }

    fn add_doctor<C: Clock>(&mut self, registry: &mut Registry<C>) -> AppResult<Flow> {
        let Some(name) = self.prompt("Enter doctor's name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(age) = self.prompt_age("Enter doctor's age: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(gender) = self.prompt("Enter doctor's gender: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(specialty) = self.prompt("Enter specialty (e.g., Dentist, Surgeon): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(raw_schedule) =
            self.prompt("Enter available times (comma separated, e.g. 9:00 AM, 10:00 AM): ")?
        else {
            return Ok(Flow::Exit);
        };

        let schedule = parse_schedule(&raw_schedule);
        if schedule.is_empty() {
            writeln!(self.output, "No valid schedule entered. Defaulting to empty list.")?;
        }

        self.dispatch(
            registry,
            Request::AddDoctor {
                name,
                age,
                gender,
                specialty,
                schedule,
            },
        )
    }

    fn book_appointment<C: Clock>(&mut self, registry: &mut Registry<C>) -> AppResult<Flow> {
        let Some(patient_id) = self.prompt("Enter patient ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(doctor_id) = self.prompt("Enter doctor ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(date) = self.prompt("Enter appointment date (YYYY-MM-DD): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(time) = self.prompt("Enter time (e.g. 10:00 AM): ")? else {
            return Ok(Flow::Exit);
        };

        self.dispatch(
            registry,
            Request::BookAppointment {
                patient_id: patient_id.trim().to_string(),
                doctor_id: doctor_id.trim().to_string(),
                date: date.trim().to_string(),
                time: time.trim().to_string(),
            },
        )
    }

    fn cancel_appointment<C: Clock>(&mut self, registry: &mut Registry<C>) -> AppResult<Flow> {
        let Some(appointment_id) = self.prompt("Enter appointment ID to cancel: ")? else {
            return Ok(Flow::Exit);
        };
        self.dispatch(
            registry,
            Request::CancelAppointment {
                appointment_id: appointment_id.trim().to_string(),
            },
        )
    }

    fn generate_bill<C: Clock>(&mut self, registry: &mut Registry<C>) -> AppResult<Flow> {
        let Some(appointment_id) = self.prompt("Enter appointment ID to generate bill: ")? else {
            return Ok(Flow::Exit);
        };
        let appointment_id = appointment_id.trim().to_string();

        // 只有可開帳的預約才詢問額外費用
        let billable = registry
            .appointment(&appointment_id)
            .is_some_and(|a| a.is_confirmed());
        let extra_fee = if billable {
            let prompt = format!(
                "Enter additional service fees (tests, meds): {} $",
                self.settings.currency()
            );
            let Some(raw) = self.prompt(&prompt)? else {
                return Ok(Flow::Exit);
            };
            match raw.trim().parse::<f64>() {
                Ok(fee) if fee.is_finite() => fee,
                _ => {
                    writeln!(self.output, "Invalid input. Defaulting extra fee to 0.")?;
                    0.0
                }
            }
        } else {
            0.0
        };

        self.dispatch(
            registry,
            Request::ComputeBill {
                appointment_id,
                extra_fee,
            },
        )
    }

    fn view_patient<C: Clock>(&mut self, registry: &mut Registry<C>) -> AppResult<Flow> {
        let Some(patient_id) = self.prompt("Enter patient ID: ")? else {
            return Ok(Flow::Exit);
        };
        self.dispatch(
            registry,
            Request::ViewPatient {
                patient_id: patient_id.trim().to_string(),
            },
        )
    }

    fn view_doctor<C: Clock>(&mut self, registry: &mut Registry<C>) -> AppResult<Flow> {
        let Some(doctor_id) = self.prompt("Enter doctor ID: ")? else {
            return Ok(Flow::Exit);
        };
        self.dispatch(
            registry,
            Request::ViewDoctor {
                doctor_id: doctor_id.trim().to_string(),
            },
        )
    }
}

/// Splits a comma-separated list of time labels, dropping blanks.
pub fn parse_schedule(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
