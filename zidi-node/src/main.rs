use std::sync::Arc;

use tracing::info;
use tracing_subscriber::prelude::*;
use zidi_ledger::Ledger;
use zidi_node::{
    api::rest::{start_rest_api, AppState},
    cli::Args,
    config::SmsConfig,
    notify::{AfricasTalkingSms, LogOnlySms, SmsNotifier},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Parse Arguments
    let args = Args::parse();

    // 2. Initialize Logging
    // PANIC HOOK
    std::panic::set_hook(Box::new(|info| {
        let msg = match info.payload().downcast_ref::<&'static str>() {
            Some(s) => *s,
            None => match info.payload().downcast_ref::<String>() {
                Some(s) => &s[..],
                None => "Box<Any>",
            },
        };
        let location = match info.location() {
            Some(l) => format!("at {}:{}:{}", l.file(), l.line(), l.column()),
            None => "unknown location".to_string(),
        };
        let err_msg = format!("CRASH: {} {}\n", msg, location);
        eprintln!("{}", err_msg);
        let _ = std::fs::write("panic.log", err_msg);
    }));

    std::fs::create_dir_all("logs")?;
    let file_appender = tracing_appender::rolling::never("logs", "audit.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Ledger mutations go to the audit file as well as stdout.
    let audit_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(tracing_subscriber::filter::filter_fn(|metadata| {
            metadata.target().starts_with("zidi_ledger")
        }));

    let stdout_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,zidi_node=debug".into()),
    );

    tracing_subscriber::registry()
        .with(audit_layer)
        .with(stdout_layer)
        .init();

    info!("--- STARTING ZIDISAVE NODE ---");

    // 3. Notification channel
    let sms_config = SmsConfig::from_env();
    let notifier: Arc<dyn SmsNotifier> = if sms_config.is_configured() {
        info!(
            "SMS gateway configured: endpoint={} username={}",
            sms_config.endpoint, sms_config.username
        );
        Arc::new(AfricasTalkingSms::new(sms_config))
    } else {
        info!("No SMS credentials found, notifications go to the log only");
        Arc::new(LogOnlySms)
    };

    // 4. Ledger + API
    let state = AppState {
        ledger: Arc::new(Ledger::new()),
        notifier,
    };

    start_rest_api(&args.bind, args.port, state).await?;
    Ok(())
}
