//! Basic usage of the default context

use leveled_logger::{crit, error, info, kv, log_error, warn, with, CallSite, LogFormat};

/// Logs on behalf of whoever called it.
fn report_slow(site: CallSite, millis: u64) {
    let log = leveled_logger::with_call_site(site, [("elapsed_ms", millis)]);
    warn!(log).msg("slow request");
}

fn load_settings(path: &str) -> std::io::Result<String> {
    std::fs::read_to_string(path).map_err(|e| log_error!(e, "path" => path))
}

fn main() {
    leveled_logger::init(LogFormat::Logfmt);
    leveled_logger::add_default_keyvals([("service", "demo")]);

    info!().log(kv!("msg" => "starting", "pid" => std::process::id()));

    let request = with!("request_id" => "abc-123");
    info!(request).msg("request accepted");
    report_slow(leveled_logger::call_site!(), 1200);

    if load_settings("/does/not/exist.toml").is_err() {
        error!(request).msg("falling back to defaults");
    }

    log::info!("message from a dependency using the log crate");

    crit!().msg("shutting down");
}
