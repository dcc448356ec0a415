use env_logger::{Builder, Env};

/// Variable holding the `env_logger` filter, e.g. `info,gl_debug=warn`.
pub const FILTER_ENV: &str = "RUST_LOG";

pub const DEFAULT_FILTER: &str = "info";

/// Logger builder reading its filter from `filter_env`, falling back to
/// `default_filter` when the variable is unset.
pub fn builder(filter_env: &str, default_filter: &str) -> Builder {
    Builder::from_env(Env::new().filter_or(filter_env, default_filter))
}

/// Installs the global logger. Call once, first thing in `main`.
pub fn init() {
    builder(FILTER_ENV, DEFAULT_FILTER).init();
    log::debug!("logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    const UNSET_ENV: &str = "QUAD_LOGGING_TEST_FILTER_UNSET";

    #[test]
    fn default_filter_applies_when_variable_is_unset() {
        let logger = builder(UNSET_ENV, DEFAULT_FILTER).build();
        assert_eq!(logger.filter(), LevelFilter::Info);

        let logger = builder(UNSET_ENV, "warn").build();
        assert_eq!(logger.filter(), LevelFilter::Warn);
    }

    #[test]
    fn module_directives_raise_the_max_level() {
        let logger = builder(UNSET_ENV, "warn,gl_debug=debug").build();
        assert_eq!(logger.filter(), LevelFilter::Debug);
    }
}
