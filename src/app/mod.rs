use crate::adapters::{AsteriskLink, NodeDatabase, PushoverNotifier};
use crate::config::{CliArgs, Settings};
use crate::core::NodeMonitor;
use crate::utils::error::HookError;
use crate::utils::logger;
use clap::Parser;
use std::ffi::OsString;

/// Full hook invocation. Returns the process exit status: 0 once the event
/// has been handled (blocked nodes included), 2 for bad arguments, 1 for an
/// unusable config. Nothing is read or sent before arguments validate.
pub async fn run<I, T>(args: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    // 參數錯誤時不讀取任何檔案
    let args = match CliArgs::try_parse_from(args) {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return u8::try_from(e.exit_code()).unwrap_or(2);
        }
    };

    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.debug);
    }

    let event = match args.event() {
        Ok(event) => event,
        Err(e) => return fail(e),
    };

    // 載入配置
    tracing::debug!("Loading configuration from {}", args.config.display());
    let settings = match Settings::from_file(&args.config) {
        Ok(settings) => settings,
        Err(e) => return fail(e),
    };

    let node_db = NodeDatabase::load(&settings.node_db);

    let notifier = settings
        .pushover
        .clone()
        .and_then(|pushover| match PushoverNotifier::new(pushover) {
            Ok(notifier) => Some(notifier),
            Err(e) => {
                tracing::error!("Pushover client unavailable, notifications skipped: {}", e);
                None
            }
        });

    // 建立監控器並處理事件
    let link = AsteriskLink::new(&settings.asterisk);
    let monitor = NodeMonitor::new(&settings, node_db, notifier, link);
    let outcome = monitor.handle(&event).await;

    tracing::debug!("Outcome: {:?}", outcome);
    0
}

fn fail(e: HookError) -> u8 {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    e.exit_code()
}
