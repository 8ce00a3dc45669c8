//! `tracing` subscriber setup.

use newsdesk_config::LogLevel;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Crate targets a bare level applies to.
const CRATE_TARGETS: &[&str] = &[
    "newsdesk",
    "newsdesk_cache",
    "newsdesk_config",
    "newsdesk_platform",
    "newsdesk_webview",
];

/// Filter directives from the CLI override, else the configured level.
pub fn directives(cli: Option<&str>, configured: LogLevel) -> Vec<String> {
    let level = match cli.map(str::trim) {
        Some(list) if list.contains('=') => {
            return list
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect();
        }
        Some(level) if !level.is_empty() => level,
        _ => configured.as_filter(),
    };
    CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect()
}

/// Install the global subscriber. `RUST_LOG` is honored; `directives` are
/// added on top. Returns the directives that failed to parse.
pub fn init(directives: &[String]) -> Vec<String> {
    let mut filter = EnvFilter::from_default_env();
    let mut rejected = Vec::new();
    for directive in directives {
        match directive.parse::<Directive>() {
            Ok(d) => filter = filter.add_directive(d),
            Err(_) => rejected.push(directive.clone()),
        }
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
    rejected
}
