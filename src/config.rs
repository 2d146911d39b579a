use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 比对服务地址
    pub api_base_url: String,
    /// 下载与预览输出目录
    pub output_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 比对选项 TOML 文件（可选）
    pub options_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            output_dir: "output".to_string(),
            verbose_logging: false,
            options_file: None,
        }
    }
}

impl Config {
    /// 从环境变量加载，缺失或无法解析时使用默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("COMPARE_API_BASE_URL").unwrap_or(default.api_base_url),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| Self::parse_bool("VERBOSE_LOGGING", &v).ok()).unwrap_or(default.verbose_logging),
            options_file: std::env::var("COMPARE_OPTIONS_FILE").ok().filter(|v| !v.is_empty()).or(default.options_file),
        }
    }

    /// 严格解析布尔环境变量
    pub fn parse_bool(var_name: &str, value: &str) -> Result<bool, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value: value.to_string(),
                expected_type: "bool".to_string(),
            }),
        }
    }
}
