use crate::config::toml_config::ClinicConfig;
use crate::utils::error::AppResult;
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "clinic-ledger")]
#[command(about = "In-memory appointment ledger for a small clinic")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the clinic name printed on receipts
    #[arg(long)]
    pub clinic_name: Option<String>,

    /// Override the flat consultation fee
    #[arg(long)]
    pub consultation_fee: Option<f64>,

    /// Pin "today" (YYYY-MM-DD) instead of reading the system clock
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

impl CliConfig {
    /// 載入設定檔並套用命令列覆蓋
    pub fn load_clinic_config(&self) -> AppResult<ClinicConfig> {
        let mut config = match &self.config {
            Some(path) => {
                validation::validate_path("config", path)?;
                ClinicConfig::from_file(path)?
            }
            None => ClinicConfig::default(),
        };

        if let Some(name) = &self.clinic_name {
            config.clinic.name = name.clone();
        }
        if let Some(fee) = self.consultation_fee {
            config.billing.consultation_fee = fee;
        }
        if self.json_logs {
            config.logging.get_or_insert_with(Default::default).json = Some(true);
        }

        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> AppResult<()> {
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }
        if let Some(name) = &self.clinic_name {
            validation::validate_non_empty_string("clinic_name", name)?;
        }
        if let Some(fee) = self.consultation_fee {
            validation::validate_amount("consultation_fee", fee)?;
        }
        Ok(())
    }
}
