//! # Library 模块
//!
//! 加载期的效果描述符缓存：`name -> Arc<ParticleFx>`。
//!
//! 每条效果定义只构建一次，之后以 `Arc` 形式共享给任意多个运行中的效果实例。
//! 库构建完成后只读。

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{LoadError, LoadResult};
use crate::fx::ParticleFx;
use crate::source::ParticleFxSource;
use crate::texture::TextureResolver;

/// 效果库
#[derive(Debug, Clone, Default)]
pub struct ParticleFxLibrary {
    effects: BTreeMap<String, Arc<ParticleFx>>,
}

impl ParticleFxLibrary {
    /// 创建空库
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文档构建
    ///
    /// 文档是一个对象：键为效果名，值为源记录。
    ///
    /// ```text
    /// { "FIRE_SMOKE": { "ppsValue": 40, "visName_S": "SMOKE.TGA", ... }, ... }
    /// ```
    pub fn from_json<R>(text: &str, textures: &R) -> LoadResult<Self>
    where
        R: TextureResolver + ?Sized,
    {
        let sources = parse_sources(text)?;
        let mut library = Self::new();
        for (name, src) in &sources {
            library.insert(name, src, textures)?;
        }
        tracing::debug!(count = library.len(), "效果库加载完成");
        Ok(library)
    }

    /// 构建并加入一条效果
    ///
    /// 同名效果已存在时返回 [`LoadError::DuplicateEffect`]。
    pub fn insert<R>(
        &mut self,
        name: &str,
        src: &ParticleFxSource,
        textures: &R,
    ) -> LoadResult<Arc<ParticleFx>>
    where
        R: TextureResolver + ?Sized,
    {
        if self.effects.contains_key(name) {
            return Err(LoadError::DuplicateEffect {
                name: name.to_string(),
            });
        }

        let fx = Arc::new(ParticleFx::new(src, name, textures));
        self.effects.insert(name.to_string(), Arc::clone(&fx));
        Ok(fx)
    }

    /// 获取共享描述符
    pub fn get(&self, name: &str) -> Option<Arc<ParticleFx>> {
        self.effects.get(name).cloned()
    }

    /// 所有效果名（字典序）
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.effects.keys().map(String::as_str)
    }

    /// 遍历所有效果（字典序）
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<ParticleFx>)> {
        self.effects.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 效果数量
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// 把 JSON 文档解析为 `效果名 -> 源记录`（字典序）
pub fn parse_sources(text: &str) -> LoadResult<BTreeMap<String, ParticleFxSource>> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{NoTextures, TextureRegistry};

    const DOC: &str = r#"{
        "FIRE": {
            "ppsValue": 40,
            "ppsScaleKeys_S": "0.5 1 0.2",
            "ppsFPS": 3,
            "visName_S": "FIRE.TGA",
            "lspPartAvg": 1200
        },
        "SMOKE": {
            "pps_value": 5,
            "shp_type": "SPHERE"
        }
    }"#;

    #[test]
    fn test_load_library() {
        let registry = TextureRegistry::new();
        registry.register("FIRE.TGA", None);

        let library = ParticleFxLibrary::from_json(DOC, &registry).unwrap();
        assert_eq!(library.len(), 2);
        assert!(!library.is_empty());
        assert_eq!(library.names().collect::<Vec<_>>(), vec!["FIRE", "SMOKE"]);

        let fire = library.get("FIRE").unwrap();
        assert_eq!(fire.debug_name(), "FIRE");
        assert_eq!(fire.max_pps(), 40.0);
        assert_eq!(fire.max_lifetime(), 1200);
        assert_eq!(fire.effect_preferred_time(), 1000);
        assert!(!fire.visual().texture.is_fallback());

        let smoke = library.get("SMOKE").unwrap();
        assert!(smoke.visual().texture.is_fallback());
        assert_eq!(smoke.effect_preferred_time(), 5000);

        assert!(library.get("WATER").is_none());
    }

    #[test]
    fn test_descriptors_are_shared() {
        let library = ParticleFxLibrary::from_json(DOC, &NoTextures).unwrap();
        let a = library.get("FIRE").unwrap();
        let b = library.get("FIRE").unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let fx = library.get("FIRE").unwrap();
                std::thread::spawn(move || fx.pps_scale(500))
            })
            .collect();
        for h in handles {
            assert!((h.join().unwrap() - 0.6).abs() < 1e-5);
        }
    }

    #[test]
    fn test_duplicate_insert() {
        let mut library = ParticleFxLibrary::new();
        let src = ParticleFxSource::default();
        library.insert("A", &src, &NoTextures).unwrap();
        let err = library.insert("A", &src, &NoTextures).unwrap_err();
        assert_eq!(
            err,
            LoadError::DuplicateEffect {
                name: "A".to_string()
            }
        );
        assert_eq!(err.to_string(), "效果 'A' 重复定义");
    }

    #[test]
    fn test_invalid_document() {
        assert!(ParticleFxLibrary::from_json("[]", &NoTextures).is_err());
        assert!(ParticleFxLibrary::from_json(r#"{"A": 1}"#, &NoTextures).is_err());
        assert!(ParticleFxLibrary::from_json("{}", &NoTextures).unwrap().is_empty());
    }
}
