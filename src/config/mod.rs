use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use directories::BaseDirs;

/// Read-only settings snapshot, built once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub cli_path: PathBuf,
    pub root: PathBuf,
    pub credential: Option<PathBuf>,
    pub cache_token: Option<PathBuf>,
    /// Default page-size policy; 0 means "fetch everything".
    pub max_results_default: u32,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let mut map = HashMap::new();
        let config_path = default_config_path();

        // rc file, then ./.env, then the environment (take precedence)
        read_env_file(&config_path, &mut map);
        read_env_file(Path::new(".env"), &mut map);
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        let mut cfg = Self::from_map(&map);
        cfg.config_path = config_path;
        cfg
    }

    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        Self {
            cli_path: get("YUTU_CLI_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("/usr/local/bin/yutu")),
            root: get("YUTU_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(default_root),
            credential: get("YUTU_CREDENTIAL").map(PathBuf::from),
            cache_token: get("YUTU_CACHE_TOKEN").map(PathBuf::from),
            max_results_default: get("YUTU_MAX_RESULTS_DEFAULT")
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(0),
            config_path: default_config_path(),
        }
    }

    pub fn credential_path(&self) -> PathBuf {
        self.credential
            .clone()
            .unwrap_or_else(|| self.root.join("client_secret.json"))
    }

    pub fn token_path(&self) -> PathBuf {
        self.cache_token
            .clone()
            .unwrap_or_else(|| self.root.join("youtube.token.json"))
    }

    /// Variables overlaid on the inherited environment of every yutu child.
    pub fn child_env(&self) -> Vec<(&'static str, String)> {
        vec![
            ("YUTU_ROOT", self.root.to_string_lossy().into_owned()),
            ("YUTU_CREDENTIAL", self.credential_path().to_string_lossy().into_owned()),
            ("YUTU_CACHE_TOKEN", self.token_path().to_string_lossy().into_owned()),
        ]
    }

    /// Problems that will make yutu calls fail, as displayable messages.
    pub fn validate_paths(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !self.cli_path.exists() {
            problems.push(format!("yutu CLI not found: {}", self.cli_path.display()));
        }
        let cred = self.credential_path();
        if !cred.exists() {
            problems.push(format!("credential file not found: {}", cred.display()));
        }
        problems
    }
}

fn read_env_file(path: &Path, map: &mut HashMap<String, String>) {
    if !path.is_file() {
        return;
    }
    if let Ok(file) = fs::File::open(path) {
        let reader = BufReader::new(file);
        // Stop at the first read error instead of retrying it forever.
        for line in reader.lines().map_while(Result::ok) {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);
            if let Some((k, v)) = line.split_once('=') {
                map.insert(k.trim().to_string(), unquote(v.trim()).to_string());
            }
        }
    }
}

fn unquote(v: &str) -> &str {
    for q in ['"', '\''] {
        if v.len() >= 2 && v.starts_with(q) && v.ends_with(q) {
            return &v[1..v.len() - 1];
        }
    }
    v
}

fn is_config_key(k: &str) -> bool {
    k.starts_with("YUTU_")
}

fn default_root() -> PathBuf {
    BaseDirs::new()
        .map(|b| b.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~"))
        .join(".config")
        .join("yutu")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("yutu-manager").join("config")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn derived_paths_default_under_root() {
        let cfg = Config::from_map(&map(&[("YUTU_ROOT", "/data/yutu")]));
        assert_eq!(cfg.credential_path(), PathBuf::from("/data/yutu/client_secret.json"));
        assert_eq!(cfg.token_path(), PathBuf::from("/data/yutu/youtube.token.json"));
        assert_eq!(cfg.cli_path, PathBuf::from("/usr/local/bin/yutu"));
        assert_eq!(cfg.max_results_default, 0);
    }

    #[test]
    fn explicit_paths_win() {
        let cfg = Config::from_map(&map(&[
            ("YUTU_ROOT", "/data/yutu"),
            ("YUTU_CREDENTIAL", "/secrets/cred.json"),
            ("YUTU_CACHE_TOKEN", "/secrets/token.json"),
            ("YUTU_MAX_RESULTS_DEFAULT", "25"),
        ]));
        let env: HashMap<_, _> = cfg.child_env().into_iter().collect();
        assert_eq!(env["YUTU_ROOT"], "/data/yutu");
        assert_eq!(env["YUTU_CREDENTIAL"], "/secrets/cred.json");
        assert_eq!(env["YUTU_CACHE_TOKEN"], "/secrets/token.json");
        assert_eq!(cfg.max_results_default, 25);
    }

    #[test]
    fn bad_page_size_falls_back_to_unlimited() {
        let cfg = Config::from_map(&map(&[("YUTU_MAX_RESULTS_DEFAULT", "lots")]));
        assert_eq!(cfg.max_results_default, 0);
    }

    #[test]
    fn env_file_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "# comment\n\nYUTU_ROOT=\"/quoted\"\nexport YUTU_CLI_PATH=/bin/yutu\n",
        )
        .unwrap();
        let mut m = HashMap::new();
        read_env_file(&path, &mut m);
        assert_eq!(m["YUTU_ROOT"], "/quoted");
        assert_eq!(m["YUTU_CLI_PATH"], "/bin/yutu");
    }

    #[test]
    fn env_path_that_is_a_directory_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_path_buf();
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let mut m = HashMap::new();
            read_env_file(&path, &mut m);
            let _ = tx.send(m.len());
        });
        let read = rx.recv_timeout(std::time::Duration::from_secs(3));
        assert_eq!(read, Ok(0));
    }

    #[test]
    fn missing_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let cfg = Config::from_map(&map(&[
            ("YUTU_ROOT", root.as_str()),
            ("YUTU_CLI_PATH", "/nonexistent/yutu"),
        ]));
        let problems = cfg.validate_paths();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("/nonexistent/yutu"));
    }
}
