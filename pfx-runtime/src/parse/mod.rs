//! # Parse 模块
//!
//! 字段解析器：把源记录里的一个文本字段转换为一个强类型值。
//!
//! ## 设计原则
//!
//! - 纯函数、全函数：任何输入都返回一个值，从不报错、从不 panic
//! - 容错解析：格式错误的字段按固定规则降级为默认值
//! - 手写扫描，无正则依赖
//!
//! ## 模块结构
//!
//! - `number`: 浮点扫描、关键帧列表、整数布尔
//! - `vector`: 二维/三维向量
//! - `token`: 发射器形状 / 方向模式 / 混合模式

mod number;
mod token;
mod vector;

#[cfg(test)]
mod tests;

pub use number::{flag, parse_key_list, scan_f32};
pub use token::{
    AlphaFunc, DirMode, EmitterType, parse_alpha_func, parse_dir_mode, parse_emitter_type,
};
pub use vector::{ZERO_MARKER, parse_vec2, parse_vec3};
