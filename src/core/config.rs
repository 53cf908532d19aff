use std::path::PathBuf;

/// Settings for one browsing session.
#[derive(Debug, Clone, Default)]
pub struct BrowserConfig {
    pub start_path: Option<PathBuf>,
    pub filter: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub verbose: bool,
}

impl BrowserConfig {
    /// The directory a session opens in: the explicit start path, else the
    /// user's home, else the working directory.
    pub fn resolve_start_path(&self) -> PathBuf {
        self.start_path
            .clone()
            .or_else(home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// The filter with the empty string folded into "no filter".
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref().filter(|f| !f.is_empty())
    }
}

pub fn home_dir() -> Option<PathBuf> {
    dirs::home_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_start_path_wins() {
        let config = BrowserConfig {
            start_path: Some(PathBuf::from("/srv/data")),
            ..Default::default()
        };
        assert_eq!(config.resolve_start_path(), PathBuf::from("/srv/data"));
    }

    #[test]
    fn empty_filter_means_none() {
        let config = BrowserConfig {
            filter: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(config.filter(), None);
        assert_eq!(config.log_level(), "info");
    }
}
