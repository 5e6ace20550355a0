use std::collections::HashMap;
use std::path::PathBuf;

const DATA_DIR_ENV: &str = "SNIPPET_DATA_DIR";
const HOME_ENV: &str = "HOME";
const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub data_dir: PathBuf,
    pub env_token: Option<String>,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_pairs(std::env::vars())
    }

    pub(crate) fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env_map: HashMap<String, String> = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        Self {
            data_dir: parse_data_dir(&env_map),
            env_token: parse_env_token(&env_map),
        }
    }

    pub fn token_file(&self) -> PathBuf {
        self.data_dir.join("token")
    }
}

fn parse_data_dir(env_map: &HashMap<String, String>) -> PathBuf {
    let explicit = non_blank(env_map, DATA_DIR_ENV).map(PathBuf::from);
    if let Some(data_dir) = explicit {
        return data_dir;
    }

    match non_blank(env_map, HOME_ENV) {
        Some(home) => PathBuf::from(home).join(".config").join("snippet"),
        None => std::env::temp_dir().join("snippet-cli"),
    }
}

fn parse_env_token(env_map: &HashMap<String, String>) -> Option<String> {
    non_blank(env_map, TOKEN_ENV).map(ToOwned::to_owned)
}

fn non_blank<'a>(env_map: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env_map
        .get(key)
        .map(String::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_home_config_dir() {
        let config = RuntimeConfig::from_pairs(vec![(HOME_ENV, "/home/dev")]);

        assert_eq!(config.data_dir, PathBuf::from("/home/dev/.config/snippet"));
        assert_eq!(
            config.token_file(),
            PathBuf::from("/home/dev/.config/snippet/token")
        );
    }

    #[test]
    fn config_prefers_explicit_data_dir_over_home() {
        let config = RuntimeConfig::from_pairs(vec![
            (HOME_ENV, "/home/dev"),
            (DATA_DIR_ENV, "/tmp/snippet-data"),
        ]);

        assert_eq!(config.data_dir, PathBuf::from("/tmp/snippet-data"));
    }

    #[test]
    fn config_falls_back_to_temp_dir_without_home() {
        let config = RuntimeConfig::from_pairs(Vec::<(String, String)>::new());

        assert!(
            config.data_dir.ends_with("snippet-cli"),
            "default data dir should fall back to temp location"
        );
    }

    #[test]
    fn config_ignores_blank_data_dir_value() {
        let config =
            RuntimeConfig::from_pairs(vec![(HOME_ENV, "/home/dev"), (DATA_DIR_ENV, "   ")]);

        assert_eq!(config.data_dir, PathBuf::from("/home/dev/.config/snippet"));
    }

    #[test]
    fn config_reads_trimmed_env_token() {
        let config = RuntimeConfig::from_pairs(vec![(TOKEN_ENV, " ghp-example-token \n")]);

        assert_eq!(config.env_token.as_deref(), Some("ghp-example-token"));
    }

    #[test]
    fn config_treats_blank_env_token_as_missing() {
        let config = RuntimeConfig::from_pairs(vec![(TOKEN_ENV, "   ")]);

        assert_eq!(config.env_token, None);
    }
}
