use clap::Parser;
use salon_desk::config::toml_config::TomlConfig;
use salon_desk::core::ConfigProvider;
use salon_desk::utils::error::ErrorSeverity;
use salon_desk::utils::{logger, validation::Validate};
use salon_desk::{CliConfig, FileUserStore, Menu, Salon};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("🚀 Starting salon-desk");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Some(path) = cli.config.clone() {
        // 載入 TOML 配置
        tracing::info!("📁 Loading configuration from: {}", path);
        let mut config = match TomlConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        };

        // 應用命令列覆蓋設定
        config.apply_overrides(&cli);
        run_session(&config)
    } else {
        run_session(&cli)
    }
}

fn run_session<C: ConfigProvider + Validate>(config: &C) -> Result<(), Box<dyn std::error::Error>> {
    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("🗂️ User store: {}", config.store_path());

    // 打開用戶存儲並運行互動選單
    let store = FileUserStore::new(config.store_path());
    let result = Salon::open(store).and_then(|mut salon| {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut menu = Menu::new(stdin.lock(), stdout.lock());
        menu.run(&mut salon, config)
    });

    match result {
        Ok(()) => {
            tracing::info!("✅ salon-desk session completed");
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Session failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,      // 互動層級狀況，不視為失敗
                ErrorSeverity::Medium => 2,   // 資料檔內容問題
                ErrorSeverity::High => 1,     // 配置錯誤
                ErrorSeverity::Critical => 3, // 系統錯誤
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
