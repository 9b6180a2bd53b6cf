use chrono::NaiveDate;

/// Source of the current calendar date used to reject bookings in the past.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Clinic settings the registry and the renderer read from.
pub trait LedgerSettings {
    fn clinic_name(&self) -> &str;
    fn currency(&self) -> &str;
    fn consultation_fee(&self) -> f64;
}
