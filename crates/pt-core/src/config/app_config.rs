use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// REST backend base URL (may be empty - this is a fact, not an error)
    /// 后端 REST 基础地址（可能为空）
    pub api_base_url: String,

    /// Persisted credential file (path info only, no existence check)
    /// 持久化凭据文件路径（仅路径信息，不检查文件是否存在）
    pub credential_path: PathBuf,

    /// Router base path, e.g. `/pantry`
    pub routing_base_path: String,

    /// Rows per page; 0 means "not configured"
    pub page_size: usize,

    /// Log directory; empty disables file logging
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// **Prohibited / 禁止**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        Ok(Self {
            api_base_url: str_at("api", "base_url"),
            credential_path: PathBuf::from(str_at("auth", "credential_path")),
            routing_base_path: str_at("routing", "base_path"),
            page_size: toml_value
                .get("table")
                .and_then(|t| t.get("page_size"))
                .and_then(|v| v.as_integer())
                .map(|v| usize::try_from(v).unwrap_or(0))
                .unwrap_or(0),
            log_dir: PathBuf::from(str_at("logging", "dir")),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    /// 创建空的 AppConfig（所有字段为空/默认值）
    pub fn empty() -> Self {
        Self {
            api_base_url: String::new(),
            credential_path: PathBuf::new(),
            routing_base_path: String::new(),
            page_size: 0,
            log_dir: PathBuf::new(),
        }
    }

    /// Create AppConfig with system-default paths for production use
    /// 生产环境使用：创建具有系统默认路径的 AppConfig
    ///
    /// The base directory is computed by the caller (e.g. with the `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            credential_path: data_dir.join("credential.json"),
            ..Self::empty()
        }
    }
}
