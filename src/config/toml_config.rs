use crate::core::billing::CONSULTATION_FEE;
use crate::domain::ports::LedgerSettings;
use crate::utils::error::{AppError, AppResult};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_CLINIC_NAME: &str = "Sunrise Hospital";
pub const DEFAULT_CURRENCY: &str = "JMD";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClinicConfig {
    #[serde(default)]
    pub clinic: ClinicSection,
    #[serde(default)]
    pub billing: BillingSection,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicSection {
    #[serde(default = "default_clinic_name")]
    pub name: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingSection {
    #[serde(default = "default_consultation_fee")]
    pub consultation_fee: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub json: Option<bool>,
}

fn default_clinic_name() -> String {
    DEFAULT_CLINIC_NAME.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_consultation_fee() -> f64 {
    CONSULTATION_FEE
}

impl Default for ClinicSection {
    fn default() -> Self {
        Self {
            name: default_clinic_name(),
            currency: default_currency(),
        }
    }
}

impl Default for BillingSection {
    fn default() -> Self {
        Self {
            consultation_fee: default_consultation_fee(),
        }
    }
}

impl ClinicConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigParse {
            message: e.to_string(),
        })
    }

    /// 替換環境變數 (例如 ${CLINIC_NAME})，未設定者保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl LedgerSettings for ClinicConfig {
    fn clinic_name(&self) -> &str {
        &self.clinic.name
    }

    fn currency(&self) -> &str {
        &self.clinic.currency
    }

    fn consultation_fee(&self) -> f64 {
        self.billing.consultation_fee
    }
}

impl Validate for ClinicConfig {
    fn validate(&self) -> AppResult<()> {
        validation::validate_non_empty_string("clinic.name", &self.clinic.name)?;
        validation::validate_non_empty_string("clinic.currency", &self.clinic.currency)?;
        validation::validate_amount("billing.consultation_fee", self.billing.consultation_fee)?;
        Ok(())
    }
}
