use std::path::PathBuf;

use clap::Parser;

/// Newsdesk: a reader for web articles backed by pooled native web views.
#[derive(Parser, Debug)]
#[command(name = "newsdesk", version, about)]
pub struct Args {
    /// Article URL to open on start.
    pub url: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error) or a filter directive
    /// list such as `newsdesk_webview=debug`.
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments() {
        let args = Args::try_parse_from(["newsdesk"]).unwrap();
        assert!(args.url.is_none());
        assert!(args.config.is_none());
        assert!(args.log_level.is_none());
    }

    #[test]
    fn url_and_flags() {
        let args = Args::try_parse_from([
            "newsdesk",
            "https://news.example.com/a/1",
            "--config",
            "/tmp/nd.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.url.as_deref(), Some("https://news.example.com/a/1"));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/nd.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["newsdesk", "--shell", "zsh"]).is_err());
    }
}
