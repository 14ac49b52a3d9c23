//! # Config 模块
//!
//! 工具配置，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (pfx-inspect.json)
//! 3. 默认值（最低）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "pfx-inspect.json";

/// 工具配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectConfig {
    /// 纹理根目录；未配置时所有纹理都按回退处理
    #[serde(default)]
    pub texture_root: Option<PathBuf>,

    /// 视为纹理的文件扩展名（大小写不敏感，不含点）
    #[serde(default = "default_texture_extensions")]
    pub texture_extensions: Vec<String>,

    /// 曲线采样配置
    #[serde(default)]
    pub sample: SampleConfig,
}

/// 曲线采样配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// 采样步长（毫秒）
    #[serde(default = "default_step_ms")]
    pub step_ms: u64,

    /// 采样终点（毫秒）；未配置时使用效果的建议时长
    #[serde(default)]
    pub until_ms: Option<u64>,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            step_ms: default_step_ms(),
            until_ms: None,
        }
    }
}

// 默认值函数
fn default_texture_extensions() -> Vec<String> {
    ["tga", "tex", "png"].map(String::from).to_vec()
}

fn default_step_ms() -> u64 {
    100
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            texture_root: None,
            texture_extensions: default_texture_extensions(),
            sample: SampleConfig::default(),
        }
    }
}

impl InspectConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "配置文件加载成功");
                    config
                }
                Err(e) => {
                    tracing::warn!(error = %e, "配置文件解析失败，使用默认配置");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "配置文件读取失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 用命令行参数覆盖
    pub fn with_texture_root(mut self, root: Option<PathBuf>) -> Self {
        if root.is_some() {
            self.texture_root = root;
        }
        self
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.texture_root
            && !root.is_dir()
        {
            return Err(ConfigError::ValidationFailed(format!(
                "纹理目录不存在: {:?}",
                root
            )));
        }

        if self.texture_extensions.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "texture_extensions 不能为空".to_string(),
            ));
        }

        if self.sample.step_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "sample.step_ms 必须大于 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// 配置错误
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(String),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InspectConfig::default();
        assert_eq!(config.texture_root, None);
        assert_eq!(config.texture_extensions, vec!["tga", "tex", "png"]);
        assert_eq!(config.sample.step_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_takes_defaults() {
        let config: InspectConfig =
            serde_json::from_str(r#"{"sample": {"until_ms": 3000}}"#).unwrap();
        assert_eq!(config.sample.step_ms, 100);
        assert_eq!(config.sample.until_ms, Some(3000));
        assert_eq!(config.texture_extensions.len(), 3);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        let mut config = InspectConfig::default();
        config.sample.step_ms = 250;
        config.texture_root = Some(dir.path().to_path_buf());
        config.save(&path).unwrap();

        let loaded = InspectConfig::load(&path);
        assert_eq!(loaded, config);
        assert!(loaded.validate().is_ok());
    }

    #[test]
    fn test_missing_or_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            InspectConfig::load(dir.path().join("absent.json")),
            InspectConfig::default()
        );

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert_eq!(InspectConfig::load(&broken), InspectConfig::default());
    }

    #[test]
    fn test_cli_override() {
        let config = InspectConfig {
            texture_root: Some(PathBuf::from("from_file")),
            ..Default::default()
        };
        let kept = config.clone().with_texture_root(None);
        assert_eq!(kept.texture_root, Some(PathBuf::from("from_file")));

        let overridden = config.with_texture_root(Some(PathBuf::from("from_cli")));
        assert_eq!(overridden.texture_root, Some(PathBuf::from("from_cli")));
    }

    #[test]
    fn test_config_validation() {
        let mut config = InspectConfig::default();

        config.sample.step_ms = 0;
        assert!(config.validate().is_err());
        config.sample.step_ms = 10;

        config.texture_extensions.clear();
        assert!(config.validate().is_err());
        config.texture_extensions.push("tga".to_string());

        config.texture_root = Some(PathBuf::from("definitely/not/here"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().starts_with("配置验证失败"));
    }
}
