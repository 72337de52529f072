//! Default configuration values

/// Default number of git queries allowed in flight at once
pub const DEFAULT_MAX_CONCURRENCY: usize = 500;

/// Environment variable overriding the concurrency bound
pub const MAX_THREADS_ENV: &str = "PKGSCOPE_MAX_THREADS";

/// Package descriptor file name
pub const DESCRIPTOR_FILE: &str = "package.json";

/// Key of this tool's settings block inside the package descriptor
pub const SETTINGS_KEY: &str = "pkgscope";

/// Name logged when the package descriptor has no `name`
pub const UNNAMED_PACKAGE: &str = "(unnamed package)";
