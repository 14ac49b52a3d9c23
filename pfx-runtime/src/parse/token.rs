//! # 枚举令牌解析
//!
//! 封闭词表的精确匹配（大小写敏感）。未知令牌（包括空串）一律降级为
//! 各枚举的默认变体，从不报错。

use serde::Serialize;

/// 发射器形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum EmitterType {
    /// 点发射（默认）
    #[default]
    Point,
    Line,
    Box,
    Circle,
    Sphere,
    Mesh,
}

impl EmitterType {
    /// 严格匹配，未知令牌返回 `None`
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "POINT" => Some(Self::Point),
            "LINE" => Some(Self::Line),
            "BOX" => Some(Self::Box),
            "CIRCLE" => Some(Self::Circle),
            "SPHERE" => Some(Self::Sphere),
            "MESH" => Some(Self::Mesh),
            _ => None,
        }
    }

    /// 规范拼写
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Point => "POINT",
            Self::Line => "LINE",
            Self::Box => "BOX",
            Self::Circle => "CIRCLE",
            Self::Sphere => "SPHERE",
            Self::Mesh => "MESH",
        }
    }
}

/// 粒子初始方向模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum DirMode {
    /// 随机方向（默认）
    #[default]
    Rand,
    /// 固定方向（由航向/仰角给出）
    Dir,
    /// 朝向目标点
    Target,
}

impl DirMode {
    /// 严格匹配，未知令牌返回 `None`
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "RAND" => Some(Self::Rand),
            "DIR" => Some(Self::Dir),
            "TARGET" => Some(Self::Target),
            _ => None,
        }
    }

    /// 规范拼写
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Rand => "RAND",
            Self::Dir => "DIR",
            Self::Target => "TARGET",
        }
    }
}

/// 粒子精灵的混合模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum AlphaFunc {
    /// 不混合（默认）
    #[default]
    None,
    Blend,
    Add,
    Mul,
}

impl AlphaFunc {
    /// 严格匹配，未知令牌返回 `None`
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "NONE" => Some(Self::None),
            "BLEND" => Some(Self::Blend),
            "ADD" => Some(Self::Add),
            "MUL" => Some(Self::Mul),
            _ => None,
        }
    }

    /// 规范拼写
    pub fn as_token(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Blend => "BLEND",
            Self::Add => "ADD",
            Self::Mul => "MUL",
        }
    }
}

macro_rules! impl_token_display {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_token())
                }
            }
        )*
    };
}

impl_token_display!(EmitterType, DirMode, AlphaFunc);

/// 未知的非空令牌记 debug 日志（空串是缺省字段，不记录）
fn log_fallback(kind: &str, token: &str, fallback: &str) {
    if !token.is_empty() {
        tracing::debug!(kind, token, fallback, "未知令牌，使用默认值");
    }
}

/// 解析发射器形状，未知令牌降级为 `Point`
pub fn parse_emitter_type(src: &str) -> EmitterType {
    EmitterType::from_token(src).unwrap_or_else(|| {
        log_fallback("emitter", src, EmitterType::default().as_token());
        EmitterType::default()
    })
}

/// 解析方向模式，未知令牌降级为 `Rand`
pub fn parse_dir_mode(src: &str) -> DirMode {
    DirMode::from_token(src).unwrap_or_else(|| {
        log_fallback("dir_mode", src, DirMode::default().as_token());
        DirMode::default()
    })
}

/// 解析混合模式，未知令牌降级为 `None`
pub fn parse_alpha_func(src: &str) -> AlphaFunc {
    AlphaFunc::from_token(src).unwrap_or_else(|| {
        log_fallback("alpha_func", src, AlphaFunc::default().as_token());
        AlphaFunc::default()
    })
}
