use clap::Parser;
use notice_bot::core::ConfigProvider;
use notice_bot::utils::error::ErrorSeverity;
use notice_bot::utils::{logger, validation::Validate};
use notice_bot::{
    BotConfig, BotError, CliConfig, Command, ConsoleReplySender, HttpAnnouncementSource,
    LineReplySender, NoticeBot, ReplyFormatter,
};
use tokio::io::{AsyncBufReadExt, BufReader};

const CONSOLE_DESTINATION: &str = "stdout";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting notice-bot");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    // 公告資料只在啟動時載入一次，失敗就結束
    let source = match HttpAnnouncementSource::new(&config) {
        Ok(source) => source,
        Err(e) => exit_with(&e),
    };
    let formatter = ReplyFormatter::new(config.reply_style(), config.locale())
        .with_max_cards(config.max_cards());
    let bot = match NoticeBot::load(&source, formatter).await {
        Ok(bot) => bot,
        Err(e) => exit_with(&e),
    };

    let outcome = match cli.command {
        Command::Query { text } => bot
            .handle_message(CONSOLE_DESTINATION, &text, &ConsoleReplySender)
            .await
            .map(|_| ()),
        Command::Repl => run_repl(&bot, &source).await,
        Command::Inspect { rows } => {
            inspect(&bot, &config, rows);
            Ok(())
        }
        Command::Reply { reply_token, text } => {
            match config.line_config().and_then(|line| LineReplySender::new(&line)) {
                Ok(sender) => bot
                    .handle_message(&reply_token, &text, &sender)
                    .await
                    .map(|_| ()),
                Err(e) => Err(e),
            }
        }
    };

    if let Err(e) = outcome {
        exit_with(&e);
    }

    Ok(())
}

async fn run_repl(bot: &NoticeBot, source: &HttpAnnouncementSource) -> notice_bot::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let sender = ConsoleReplySender;

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => continue,
            ":quit" | ":q" => break,
            ":reload" => {
                // 重新載入失敗時保留原本的資料
                if let Err(e) = bot.reload(source).await {
                    tracing::error!("❌ Reload failed: {}", e);
                    eprintln!("❌ {}", e.user_friendly_message());
                }
            }
            text => {
                bot.handle_message(CONSOLE_DESTINATION, text, &sender)
                    .await?;
            }
        }
    }

    Ok(())
}

fn inspect(bot: &NoticeBot, config: &BotConfig, rows: usize) {
    let table = bot.snapshot();
    let summary = table.summary();

    println!("📋 Announcement Summary:");
    println!("  Source: {}", config.source_url());
    println!("  Records: {}", summary.total);
    println!("  Invalid dates: {}", summary.invalid_dates);
    if let (Some(earliest), Some(latest)) = (summary.earliest, summary.latest) {
        println!("  Date span: {} ~ {}", earliest, latest);
    }

    println!();
    for record in table.records().iter().take(rows) {
        println!("  {}：{}", record.publish_date, record.title);
    }
}

fn exit_with(e: &BotError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ notice-bot failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
