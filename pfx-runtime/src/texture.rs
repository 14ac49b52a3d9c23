//! # Texture 模块
//!
//! 纹理查找能力与回退策略。
//!
//! 本 crate 不加载纹理，只通过 [`TextureResolver`] 向外部纹理系统查询
//! `name -> Option<TextureHandle>`。查询失败时由本模块替换为固定的黑色
//! 回退纹理，保证描述符里的纹理句柄**永不为空**。

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

/// 回退纹理名称
pub const FALLBACK_BLACK_NAME: &str = "__FALLBACK_BLACK__";

static FALLBACK_BLACK: LazyLock<TextureHandle> =
    LazyLock::new(|| TextureHandle::new(FALLBACK_BLACK_NAME, None));

/// 纹理信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    /// 规范化后的纹理名
    pub name: String,
    /// 纹理系统给出的来源描述（如文件路径），可选
    pub source: Option<String>,
}

/// 纹理句柄
///
/// 廉价克隆的共享引用，可在线程间传递。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureHandle(Arc<TextureInfo>);

impl TextureHandle {
    /// 创建句柄
    pub fn new(name: impl Into<String>, source: Option<String>) -> Self {
        Self(Arc::new(TextureInfo {
            name: name.into(),
            source,
        }))
    }

    /// 固定的黑色回退纹理（全局唯一实例）
    pub fn black() -> Self {
        FALLBACK_BLACK.clone()
    }

    /// 是否为回退纹理
    pub fn is_fallback(&self) -> bool {
        Arc::ptr_eq(&self.0, &FALLBACK_BLACK.0)
    }

    /// 纹理名
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// 纹理信息
    pub fn info(&self) -> &TextureInfo {
        &self.0
    }
}

/// 纹理查找能力
///
/// 由外部纹理系统实现。实现方自行负责内部缓存的线程安全。
pub trait TextureResolver {
    /// 按名称查找纹理，找不到返回 `None`
    fn resolve(&self, name: &str) -> Option<TextureHandle>;
}

impl<F> TextureResolver for F
where
    F: Fn(&str) -> Option<TextureHandle>,
{
    fn resolve(&self, name: &str) -> Option<TextureHandle> {
        self(name)
    }
}

/// 不提供任何纹理的查找器，所有查询都回退
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTextures;

impl TextureResolver for NoTextures {
    fn resolve(&self, _name: &str) -> Option<TextureHandle> {
        None
    }
}

/// 查找纹理，失败时替换为黑色回退纹理
pub fn resolve_or_black<R>(resolver: &R, name: &str) -> TextureHandle
where
    R: TextureResolver + ?Sized,
{
    resolver.resolve(name).unwrap_or_else(TextureHandle::black)
}

/// 内存纹理注册表
///
/// 最简单的 [`TextureResolver`] 实现：名称大小写不敏感（统一转为大写），
/// 首尾空白忽略，空名称永远查不到。
#[derive(Debug, Default)]
pub struct TextureRegistry {
    entries: RwLock<HashMap<String, TextureHandle>>,
}

impl TextureRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 规范化纹理名
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_ascii_uppercase()
    }

    /// 注册纹理，返回新句柄
    ///
    /// 同名纹理会被替换。空名称不注册，直接返回回退纹理。
    pub fn register(&self, name: &str, source: Option<String>) -> TextureHandle {
        let key = Self::normalize_name(name);
        if key.is_empty() {
            return TextureHandle::black();
        }

        let handle = TextureHandle::new(key.clone(), source);
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, handle.clone());
        handle
    }

    /// 检查是否已注册
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&Self::normalize_name(name))
    }

    /// 已注册的纹理数量
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TextureResolver for TextureRegistry {
    fn resolve(&self, name: &str) -> Option<TextureHandle> {
        let key = Self::normalize_name(name);
        if key.is_empty() {
            return None;
        }
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_is_a_single_instance() {
        let a = TextureHandle::black();
        let b = TextureHandle::black();
        assert!(a.is_fallback());
        assert!(b.is_fallback());
        assert_eq!(a.name(), FALLBACK_BLACK_NAME);
    }

    #[test]
    fn test_same_name_is_not_fallback() {
        // 同名但不是同一个实例
        let fake = TextureHandle::new(FALLBACK_BLACK_NAME, None);
        assert!(!fake.is_fallback());
    }

    #[test]
    fn test_resolve_or_black() {
        assert!(resolve_or_black(&NoTextures, "FIRE.TGA").is_fallback());

        let found = |name: &str| Some(TextureHandle::new(name, None));
        let handle = resolve_or_black(&found, "FIRE.TGA");
        assert!(!handle.is_fallback());
        assert_eq!(handle.name(), "FIRE.TGA");
    }

    #[test]
    fn test_registry_is_case_insensitive() {
        let registry = TextureRegistry::new();
        assert!(registry.is_empty());

        registry.register("smoke.tga", Some("textures/smoke.tga".to_string()));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("SMOKE.TGA"));

        let handle = registry.resolve("  Smoke.Tga ").unwrap();
        assert_eq!(handle.name(), "SMOKE.TGA");
        assert_eq!(handle.info().source.as_deref(), Some("textures/smoke.tga"));
    }

    #[test]
    fn test_registry_empty_name() {
        let registry = TextureRegistry::new();
        assert!(registry.register("   ", None).is_fallback());
        assert!(registry.is_empty());
        assert_eq!(registry.resolve(""), None);
    }

    #[test]
    fn test_registry_replaces_same_name() {
        let registry = TextureRegistry::new();
        registry.register("a.tga", Some("old".to_string()));
        registry.register("A.TGA", Some("new".to_string()));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.resolve("a.tga").unwrap().info().source.as_deref(),
            Some("new")
        );
    }
}
