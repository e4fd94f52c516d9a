//! Demo Configuration

/// Demo configuration options
#[derive(Debug, Clone)]
pub struct Config {
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,

    /// Document URL
    pub url: String,

    /// Markup placed in `<body>` before the view binds
    pub fixture: String,

    /// Selector of the view's root element
    pub root_selector: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            url: "about:blank".to_string(),
            fixture: r#"<div id="testElement"><h1>Test</h1><div class="one">One</div></div>"#.to_string(),
            root_selector: "#testElement".to_string(),
        }
    }
}

impl Config {
    /// Defaults, with the fixture overridden by the first argument if given
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        let mut config = Self::default();
        if let Some(fixture) = args.next() {
            config.fixture = fixture;
        }
        config
    }
}
