//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `WISP__*` 覆盖（双下划线表示嵌套，
//! 如 `WISP__API__BASE_URL=https://whisk.example.com`）。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WispConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub credentials: CredentialsSection,
    #[serde(default)]
    pub http: HttpSection,
}

/// [api] 段：后端根地址（客户端会追加 api/v1/）
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiSection {
    pub base_url: Option<String>,
}

/// [credentials] 段：Basic 认证的 key 与 token
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsSection {
    pub access_key: Option<String>,
    pub access_token: Option<String>,
}

/// [http] 段：传输超时与 verbose 回执开关
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSection {
    /// 单次请求超时（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub verbose_replies: bool,
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            verbose_replies: false,
        }
    }
}

/// 从 config 目录加载配置，环境变量 WISP__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 WISP__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<WispConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("WISP")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WispConfig::default();
        assert_eq!(config.api.base_url, None);
        assert_eq!(config.credentials.access_key, None);
        assert_eq!(config.http.timeout_secs, 60);
        assert!(!config.http.verbose_replies);
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wisp.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://whisk.example.com\"\n\n[http]\ntimeout_secs = 5"
        )
        .unwrap();

        let config = load_config(Some(path)).unwrap();
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("https://whisk.example.com")
        );
        assert_eq!(config.http.timeout_secs, 5);
        // 未出现的段落取缺省值
        assert!(!config.http.verbose_replies);
        assert_eq!(config.credentials.access_token, None);
    }
}
