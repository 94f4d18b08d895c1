use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Settings supplied on the command line, layered over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Extra id filters, appended to the file's list
    pub filter_ids: Vec<String>,

    /// Extra class filters, appended to the file's list
    pub filter_classes: Vec<String>,

    /// Forces link rewriting on when set
    pub rewrite_links: bool,

    /// Replaces the output directory
    pub output_dir: Option<String>,

    /// Replaces the request timeout (seconds)
    pub timeout_secs: Option<u64>,
}

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use site_markdown::config::load_config;
///
/// let config = load_config(Path::new("site-markdown.toml")).unwrap();
/// println!("Timeout: {}s", config.crawler.timeout_secs);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(content)?;
    config.normalize_filters();
    validate(&config)?;
    Ok(config)
}

/// Builds the effective configuration for a run
///
/// Starts from the file at `path` (or the defaults when there is none),
/// applies the command-line overrides, then validates the result.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => Config::default(),
    };

    config.filters.ids.extend(overrides.filter_ids);
    config.filters.classes.extend(overrides.filter_classes);

    if overrides.rewrite_links {
        config.output.rewrite_links = true;
    }
    if let Some(dir) = overrides.output_dir {
        config.output.directory = dir;
    }
    if let Some(timeout) = overrides.timeout_secs {
        config.crawler.timeout_secs = timeout;
        // A shorter request timeout pulls the connect timeout down with it
        config.crawler.connect_timeout_secs = config.crawler.connect_timeout_secs.min(timeout);
    }

    config.normalize_filters();
    validate(&config)?;
    Ok(config)
}

impl Config {
    /// Trims filter entries and drops blank ones
    ///
    /// An empty class filter would match every element as a substring.
    pub fn normalize_filters(&mut self) {
        fn clean(list: &mut Vec<String>) {
            *list = list
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        clean(&mut self.filters.ids);
        clean(&mut self.filters.classes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
user-agent = "TestCrawler/1.0"
timeout-secs = 15
connect-timeout-secs = 5

[filters]
ids = ["welcome"]
classes = ["menu", "navbar"]

[output]
directory = "out"
rewrite-links = true
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.user_agent, "TestCrawler/1.0");
        assert_eq!(config.crawler.timeout_secs, 15);
        assert_eq!(config.filters.ids, vec!["welcome"]);
        assert_eq!(config.filters.classes, vec!["menu", "navbar"]);
        assert_eq!(config.output.directory, "out");
        assert!(config.output.rewrite_links);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_config("[output]\nrewrite-links = true\n").unwrap();

        assert_eq!(config.crawler.timeout_secs, 30);
        assert_eq!(config.crawler.connect_timeout_secs, 10);
        assert!(config.filters.ids.is_empty());
        assert_eq!(config.output.directory, ".");
        assert!(config.output.rewrite_links);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/site-markdown.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[crawler]\ntimeout-secs = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_blank_filters_are_dropped() {
        let config = parse_config("[filters]\nclasses = [\"\", \" menu \", \"  \"]\n").unwrap();
        assert_eq!(config.filters.classes, vec!["menu"]);
    }

    #[test]
    fn test_multi_word_class_filter_is_kept() {
        let config = parse_config("[filters]\nclasses = [\"menu thin\"]\n").unwrap();
        assert_eq!(config.filters.classes, vec!["menu thin"]);
    }

    #[test]
    fn test_resolve_config_without_file() {
        let config = resolve_config(
            None,
            ConfigOverrides {
                filter_ids: vec!["welcome".to_string()],
                filter_classes: vec!["menu".to_string(), String::new()],
                rewrite_links: true,
                output_dir: Some("/tmp/out".to_string()),
                timeout_secs: Some(5),
            },
        )
        .unwrap();

        assert_eq!(config.filters.ids, vec!["welcome"]);
        assert_eq!(config.filters.classes, vec!["menu"]);
        assert!(config.output.rewrite_links);
        assert_eq!(config.output.directory, "/tmp/out");
        assert_eq!(config.crawler.timeout_secs, 5);
        assert_eq!(config.crawler.connect_timeout_secs, 5);
    }

    #[test]
    fn test_resolve_config_appends_to_file_filters() {
        let file = create_temp_config("[filters]\nids = [\"sidebar\"]\n");
        let config = resolve_config(
            Some(file.path()),
            ConfigOverrides {
                filter_ids: vec!["footer".to_string()],
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(config.filters.ids, vec!["sidebar", "footer"]);
        assert!(!config.output.rewrite_links);
    }
}
