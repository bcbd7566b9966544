//! Startup banner and farewell.

use std::time::Duration;

use crate::consts::{AUTHOR, HOMEPAGE, REPO};
use crate::trigger::StalenessPolicy;

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub service: &'a str,
    pub timeout: Duration,
    pub debounce: Option<Duration>,
    pub policy: StalenessPolicy,
}

pub fn policy_label(policy: StalenessPolicy) -> &'static str {
    match policy {
        StalenessPolicy::LatestIssued => "latest issued only",
        StalenessPolicy::LastApplied => "last applied wins (shows intermediate answers)",
    }
}

pub fn debounce_label(debounce: Option<Duration>) -> String {
    match debounce {
        Some(d) => format!("{} ms", d.as_millis()),
        None => "off".to_string(),
    }
}

/// Print the startup banner with session info.
pub fn print_banner(info: &BannerInfo) {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║             D I F U S O               ║
   ║   riesgo por IMC, en lógica difusa    ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   service   {}
   timeout   {} s
   debounce  {}
   answers   {}

   type /help for commands
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.service,
        info.timeout.as_secs(),
        debounce_label(info.debounce),
        policy_label(info.policy),
    );
}

/// Print the session summary on exit.
pub fn print_session_summary(issued: u64) {
    if issued > 0 {
        println!("session: {issued} request(s) sent");
    }
    println!("hasta luego.");
}
