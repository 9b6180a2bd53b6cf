use anyhow::Context;
use clap::Parser;
use clinic_ledger::utils::error::{AppError, ErrorSeverity};
use clinic_ledger::utils::{logger, validation::Validate};
use clinic_ledger::{CliConfig, Clock, FixedClock, LedgerSettings, Menu, Registry, SystemClock};
use std::io;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 先載入設定檔，日誌等級可能來自檔案
    let clinic = config
        .validate()
        .and_then(|_| config.load_clinic_config());

    // 初始化日誌
    let level = clinic.as_ref().ok().and_then(|c| c.log_level());
    if config.json_logs || clinic.as_ref().is_ok_and(|c| c.json_logs()) {
        logger::init_json_logger(config.verbose, level);
    } else {
        logger::init_cli_logger(config.verbose, level);
    }

    tracing::info!("Starting clinic-ledger");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let clinic = match clinic {
        Ok(clinic) => clinic,
        Err(e) => exit_with(e),
    };
    if let Some(path) = &config.config {
        tracing::info!("📁 Configuration loaded from: {}", path);
    }
    tracing::info!(
        "✅ {} ready (consultation fee {} {:.2})",
        clinic.clinic_name(),
        clinic.currency(),
        clinic.consultation_fee()
    );

    let clock: Box<dyn Clock> = match config.today {
        Some(date) => {
            tracing::info!("🔧 Clock pinned to {}", date);
            Box::new(FixedClock::new(date))
        }
        None => Box::new(SystemClock),
    };
    let mut registry = Registry::new(clock).with_consultation_fee(clinic.consultation_fee());

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(stdin.lock(), stdout.lock(), &clinic)
        .run(&mut registry)
        .context("console session failed")?;

    tracing::info!(
        "Session ended: {} patients, {} doctors, {} appointments",
        registry.patient_count(),
        registry.doctor_count(),
        registry.appointment_count()
    );
    Ok(())
}

fn exit_with(e: AppError) -> ! {
    tracing::error!("❌ Configuration failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
