//! # Scan 模块
//!
//! 文件系统遍历：收集纹理文件填充注册表，收集效果定义 JSON 文件。

use std::path::{Path, PathBuf};

use anyhow::Context;
use pfx_runtime::TextureRegistry;
use walkdir::WalkDir;

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

/// 遍历纹理目录，按文件名注册所有纹理
pub fn load_texture_registry(
    root: &Path,
    extensions: &[String],
) -> anyhow::Result<TextureRegistry> {
    let registry = TextureRegistry::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.with_context(|| format!("遍历纹理目录失败: {}", root.display()))?;
        if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        registry.register(&name, Some(entry.path().display().to_string()));
    }

    tracing::info!(root = %root.display(), count = registry.len(), "纹理注册完成");
    Ok(registry)
}

/// 收集效果定义文件
///
/// `path` 是文件时原样返回；是目录时递归收集所有 `.json` 文件（按路径排序）。
pub fn collect_definition_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let json = ["json".to_string()];
    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("遍历目录失败: {}", path.display()))?;
        if entry.file_type().is_file() && has_extension(entry.path(), &json) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
