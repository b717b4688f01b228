use anyhow::Context;
use clap::Parser;
use qr_authenticator::core::registry;
use qr_authenticator::utils::error::ErrorSeverity;
use qr_authenticator::utils::{logger, validation::Validate};
use qr_authenticator::{
    AppConfig, AuthenticatorSession, CliConfig, Command, FrameDirCamera, LocalImageStore,
    QrAuthError, RqrrDecoder, VerificationResult,
};
use std::path::Path;

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path.display())),
        None => Ok(AppConfig::default()),
    }
}

fn exit_code(e: &QrAuthError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,      // 使用者自行停止
        ErrorSeverity::Medium => 2,   // 可重試的掃描錯誤
        ErrorSeverity::High => 3,     // 輸入錯誤
        ErrorSeverity::Critical => 4, // 系統錯誤
    }
}

fn report(e: &QrAuthError) {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    if e.severity() > ErrorSeverity::Low {
        eprintln!("💡 {}", e.recovery_suggestion());
    }
}

fn print_brands(json: bool) -> Result<(), QrAuthError> {
    if json {
        println!("{}", serde_json::to_string_pretty(registry::all())?);
        return Ok(());
    }
    for brand in registry::all() {
        println!("{:<15} {}", brand.name, brand.domain);
    }
    Ok(())
}

fn print_result(result: &VerificationResult, json: bool) -> Result<(), QrAuthError> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    if result.is_valid {
        println!("✅ {}", result.status);
    } else {
        println!("❌ {} / fake product", result.status);
    }
    println!("   Brand:    {}", result.brand);
    println!("   Expected: {}", result.expected_domain);
    println!(
        "   Actual:   {}",
        result.actual_domain.as_deref().unwrap_or("(none)")
    );
    if let Some(reason) = result.reason {
        println!("   Reason:   {}", reason);
    }
    Ok(())
}

/// Resolves when the user presses Ctrl-C. Never resolves if the handler
/// cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Ctrl-C handler unavailable: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn run(
    cli: &CliConfig,
    config: &AppConfig,
) -> Result<Option<VerificationResult>, QrAuthError> {
    let mut session = AuthenticatorSession::new(RqrrDecoder::new(), LocalImageStore::new());

    match &cli.command {
        Command::Brands => {
            print_brands(cli.json || config.output.json)?;
            return Ok(None);
        }
        Command::Check { brand, url } => {
            session.select_brand(brand)?;
            return session.check_payload(url).map(Some);
        }
        Command::Scan { brand, image } => {
            session.select_brand(brand)?;
            let payload = session.scan_image(image).await?;
            tracing::info!("📷 Decoded: {}", payload.text);
        }
        Command::Camera { brand, frames } => {
            session.select_brand(brand)?;
            let camera = FrameDirCamera::new(frames);
            let settings = config.camera_settings();
            println!("🎥 Scanning... press Ctrl-C to stop");
            let payload = session.scan_camera(&camera, &settings, ctrl_c()).await?;
            tracing::info!("📷 Decoded: {}", payload.text);
        }
    }

    session.check().map(Some)
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 載入配置
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(3);
        }
    };

    // 初始化日誌
    if config.logging.json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("Starting qr-authenticator");
    tracing::debug!("CLI config: {:?}", cli);
    tracing::debug!("App config: {:?}", config);

    // 驗證配置
    if let Err(e) = cli.validate().and_then(|_| config.validate()) {
        report(&e);
        std::process::exit(exit_code(&e));
    }

    let json = cli.json || config.output.json;
    match run(&cli, &config).await {
        Ok(None) => {}
        Ok(Some(result)) => {
            if let Err(e) = print_result(&result, json) {
                report(&e);
                std::process::exit(exit_code(&e));
            }
            if !result.is_valid {
                std::process::exit(1);
            }
        }
        Err(e) => {
            report(&e);
            let code = exit_code(&e);
            if code > 0 {
                std::process::exit(code);
            }
        }
    }
}
