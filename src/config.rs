use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TenureConfig {
    pub node: NodeConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NodeConfig {
    pub db_path: String,
    pub log_level: String,
}

impl Default for TenureConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig {
                db_path: "./data/tenure".to_string(),
                log_level: "info".to_string(),
            },
        }
    }
}

impl TenureConfig {
    pub fn load_or_default(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            match std::fs::read_to_string(path) {
                Ok(s) => match toml::from_str(&s) {
                    Ok(c) => c,
                    Err(e) => {
                        eprintln!("Error parsing config: {}. Using Defaults.", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    eprintln!("Error reading config: {}. Using Defaults.", e);
                    Self::default()
                }
            }
        } else {
            let config = Self::default();
            if let Ok(s) = toml::to_string_pretty(&config) {
                let _ = std::fs::write(path, s);
            }
            config
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roundtrip() {
        let config = TenureConfig::default();
        let s = toml::to_string_pretty(&config).unwrap();
        let parsed: TenureConfig = toml::from_str(&s).unwrap();
        assert_eq!(parsed.node.db_path, config.node.db_path);
        assert_eq!(parsed.node.log_level, "info");
    }
}
