//! Platform Settings
//!
//! Runtime configuration injected into the write path at construction.
//! The default student password in particular must come from here, never
//! from a literal inside a codec or writer.

/// Settings shared by the cascade writers.
#[derive(Debug, Clone)]
pub struct PlatformSettings {
    /// Password assigned to a new student account when the signup payload
    /// does not carry one. Students are expected to change it on first
    /// login.
    pub default_password: String,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            default_password: "12345678".to_string(),
        }
    }
}

impl PlatformSettings {
    /// Load settings from the environment, falling back to defaults.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `SUA_DEFAULT_PASSWORD` | `12345678` |
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(val) = std::env::var("SUA_DEFAULT_PASSWORD") {
            if !val.is_empty() {
                settings.default_password = val;
            }
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PlatformSettings::default();
        assert_eq!(settings.default_password, "12345678");
    }
}
