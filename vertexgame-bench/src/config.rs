use nanoserde::DeJson;
use std::path::{Path, PathBuf};

/// Settings read from `vertexgame/config.json`. Every field is optional,
/// command line flags take precedence over env vars and env vars over the file.
#[derive(Debug, Default, Clone, PartialEq, DeJson)]
pub struct Config {
    pub threads: Option<usize>,
    pub preeliminate: Option<bool>,
    pub graphs: Option<usize>,
    pub edge_probability: Option<f64>,
    pub max_dim: Option<u32>,
}

impl Config {
    /// Reads config from `path`, or searches the XDG config directories.
    /// Missing or unparsable files give the default config.
    pub fn load(path: Option<&Path>) -> Config {
        let file = match path {
            Some(path) => read(path.to_path_buf()),
            None => xdg::BaseDirectories::new()
                .map_err(|e| tracing::debug!("failed to find config directories, {e}"))
                .ok()
                .and_then(|bd| {
                    let mut dirs = bd.get_config_dirs();
                    dirs.push(bd.get_config_home());
                    dirs.into_iter().find_map(|mut path| {
                        path.push("vertexgame/config.json");
                        read(path)
                    })
                }),
        };
        let mut config = file
            .and_then(|file| {
                Config::deserialize_json(&file)
                    .map_err(|e| tracing::warn!("failed to parse config.json, {e}"))
                    .ok()
            })
            .unwrap_or_else(|| {
                tracing::debug!("no config file, using defaults");
                Config::default()
            });
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Applies `VERTEXGAME_THREADS` and `VERTEXGAME_PREELIMINATE` overrides.
    /// Values that do not parse are ignored.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(x) = var("VERTEXGAME_THREADS") {
            match x.parse::<usize>() {
                Ok(threads) => self.threads = Some(threads),
                Err(e) => tracing::warn!("ignoring VERTEXGAME_THREADS={x}, {e}"),
            }
        }
        if let Some(x) = var("VERTEXGAME_PREELIMINATE") {
            match x.as_str() {
                "1" | "true" => self.preeliminate = Some(true),
                "0" | "false" => self.preeliminate = Some(false),
                _ => tracing::warn!("ignoring VERTEXGAME_PREELIMINATE={x}"),
            }
        }
    }
}

fn read(path: PathBuf) -> Option<String> {
    std::fs::read_to_string(&path)
        .map_err(|e| tracing::trace!("failed to read config at {path:?}, {e}"))
        .ok()
        .inspect(|_| tracing::debug!("read config from {path:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config() {
        let config = Config::deserialize_json(r#"{"threads": 4, "edge_probability": 0.25}"#).unwrap();
        assert_eq!(
            config,
            Config {
                threads: Some(4),
                edge_probability: Some(0.25),
                ..Config::default()
            }
        );
    }

    #[test]
    fn env_overrides_file() {
        let mut config = Config::deserialize_json(r#"{"threads": 4, "preeliminate": true}"#).unwrap();
        config.apply_env(|key| match key {
            "VERTEXGAME_THREADS" => Some("8".into()),
            "VERTEXGAME_PREELIMINATE" => Some("0".into()),
            _ => None,
        });
        assert_eq!(config.threads, Some(8));
        assert_eq!(config.preeliminate, Some(false));

        config.apply_env(|key| (key == "VERTEXGAME_THREADS").then(|| "many".into()));
        assert_eq!(config.threads, Some(8));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/vertexgame/config.json")));
        assert_eq!(config.graphs, None);
        assert_eq!(config.max_dim, None);
    }
}
