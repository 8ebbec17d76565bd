//! Standard paths used by gotchi

use std::path::PathBuf;

/// Standard gotchi paths
pub struct Paths {
    /// Config directory (~/.config/gotchi)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let config = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("gotchi");

        Self { config }
    }

    /// Default location of the configuration file
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_is_namespaced() {
        let paths = Paths::new();
        assert!(paths.config.ends_with("gotchi"));
        assert!(paths.config_file().ends_with("gotchi/config.json"));
    }
}
