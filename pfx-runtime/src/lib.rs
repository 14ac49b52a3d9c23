//! # PFX Runtime
//!
//! 粒子效果描述符的核心库。
//!
//! ## 架构概述
//!
//! `pfx-runtime` 是纯逻辑核心，不依赖任何 IO 或渲染引擎。
//! 它把脚本/资源格式中**文本字段**组成的效果定义转换为强类型、可按时间
//! 求值的描述符，供粒子模拟器逐帧查询：
//!
//! ```text
//! Loader                          Runtime                         Simulator
//!   │                                │                                │
//!   │── ParticleFxSource + name ───►│ ParticleFx::new()              │
//!   │                                │── Arc<ParticleFx> ───────────►│
//!   │                                │                                │ pps_scale(t)
//!   │                                │                                │ shp_scale(t)
//! ```
//!
//! ## 核心类型
//!
//! - [`ParticleFxSource`]：原始源记录（文本/整数/浮点字段）
//! - [`ParticleFx`]：不可变描述符与派生查询
//! - [`KeyTrack`]：关键帧曲线
//! - [`TextureResolver`]：外部纹理系统的查找能力
//!
//! ## 使用示例
//!
//! ```ignore
//! use pfx_runtime::{ParticleFx, ParticleFxSource, TextureRegistry};
//!
//! let textures = TextureRegistry::new();
//! textures.register("FIRE.TGA", None);
//!
//! let src = ParticleFxSource::from_json(text)?;
//! let fx = ParticleFx::new(&src, "FIRE", &textures);
//!
//! // 模拟器每帧
//! let rate = fx.emission().pps_value * fx.pps_scale(elapsed_ms);
//! let size = fx.shp_scale(elapsed_ms);
//! ```
//!
//! ## 模块结构
//!
//! - [`parse`]：字段解析器（向量、关键帧列表、枚举令牌）
//! - [`keyframe`]：关键帧求值
//! - [`source`]：源记录定义
//! - [`fx`]：效果描述符
//! - [`texture`]：纹理查找与回退
//! - [`diagnostic`]：源记录静态检查
//! - [`library`]：效果描述符缓存
//! - [`error`]：错误类型定义

pub mod diagnostic;
pub mod error;
pub mod fx;
pub mod keyframe;
pub mod library;
pub mod parse;
pub mod source;
pub mod texture;

// 重导出核心类型
pub use diagnostic::{Diagnostic, DiagnosticLevel, DiagnosticResult, analyze_source};
pub use error::{LoadError, LoadResult};
pub use fx::{
    DEFAULT_PREFERRED_TIME, Direction, Emission, Flight, Flocking, FxSummary, Kinematics, Marker,
    ParticleFx, Shape, Trail, Visual,
};
pub use keyframe::{KeyTrack, fetch_scale_key};
pub use library::{ParticleFxLibrary, parse_sources};
pub use parse::{AlphaFunc, DirMode, EmitterType};
pub use source::ParticleFxSource;
pub use texture::{NoTextures, TextureHandle, TextureRegistry, TextureResolver};
