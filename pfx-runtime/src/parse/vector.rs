//! # 向量解析
//!
//! 把 `"1 2 3"` 这类文本字段解析为 `Vec2` / `Vec3`，带简写展开规则。

use glam::{Vec2, Vec3};

use super::number::scan_f32;

/// 显式的"零向量"标记
pub const ZERO_MARKER: &str = "=";

/// 扫描第一个分量；失败时按 `strtof` 语义得到 0 且不前进
fn first_component(src: &str) -> (f32, &str) {
    scan_f32(src).unwrap_or((0.0, src))
}

/// 解析二维向量
///
/// - `"="` → `(0, 0)`
/// - `"2"` → `(2, 2)`（第二个分量解析失败时广播第一个值）
/// - `"1 2 rest"` → `(1, 2)`（尾部内容忽略）
pub fn parse_vec2(src: &str) -> Vec2 {
    if src == ZERO_MARKER {
        return Vec2::ZERO;
    }

    let (x, rest) = first_component(src);
    let Some((y, _)) = scan_f32(rest) else {
        return Vec2::splat(x);
    };
    Vec2::new(x, y)
}

/// 解析三维向量
///
/// - `"="` → `(0, 0, 0)`
/// - `"2"` → `(2, 2, 2)`（第二个分量失败：广播）
/// - `"1 2"` → `(1, 2, 0)`（仅第三个分量失败：补 0）
pub fn parse_vec3(src: &str) -> Vec3 {
    if src == ZERO_MARKER {
        return Vec3::ZERO;
    }

    let (x, rest) = first_component(src);
    let Some((y, rest)) = scan_f32(rest) else {
        return Vec3::splat(x);
    };
    let Some((z, _)) = scan_f32(rest) else {
        return Vec3::new(x, y, 0.0);
    };
    Vec3::new(x, y, z)
}
