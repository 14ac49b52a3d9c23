//! # Parse 测试
//!
//! 向量与枚举令牌的降级规则。这些默认值决定旧内容的表现，逐条覆盖。

use super::*;
use glam::{Vec2, Vec3};

// -------------------------------------------------------------------------
// 向量
// -------------------------------------------------------------------------

#[test]
fn test_zero_marker() {
    assert_eq!(parse_vec2("="), Vec2::ZERO);
    assert_eq!(parse_vec3("="), Vec3::ZERO);
}

#[test]
fn test_single_value_broadcasts() {
    assert_eq!(parse_vec2("2"), Vec2::new(2.0, 2.0));
    assert_eq!(parse_vec3("2"), Vec3::new(2.0, 2.0, 2.0));
    assert_eq!(parse_vec3("  -0.5 junk"), Vec3::splat(-0.5));
}

#[test]
fn test_missing_third_component_is_zero() {
    assert_eq!(parse_vec3("1 2"), Vec3::new(1.0, 2.0, 0.0));
    assert_eq!(parse_vec3("1 2 x"), Vec3::new(1.0, 2.0, 0.0));
}

#[test]
fn test_full_vectors_ignore_trailing_content() {
    assert_eq!(parse_vec2("1 2 3"), Vec2::new(1.0, 2.0));
    assert_eq!(parse_vec3("1 2 3 4"), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(parse_vec3("255 128 0 // orange"), Vec3::new(255.0, 128.0, 0.0));
}

#[test]
fn test_malformed_vectors_degrade_to_zero() {
    // 第一个分量失败 → 0，且不前进，第二个分量同样失败 → 广播 0
    assert_eq!(parse_vec2(""), Vec2::ZERO);
    assert_eq!(parse_vec3(""), Vec3::ZERO);
    assert_eq!(parse_vec3("abc 1 2"), Vec3::ZERO);
    assert_eq!(parse_vec2(" = "), Vec2::ZERO);
}

#[test]
fn test_vector_separators() {
    // 逗号不是数字的一部分，扫描在此停止
    assert_eq!(parse_vec3("1,2,3"), Vec3::splat(1.0));
    assert_eq!(parse_vec3("1\t2\n3"), Vec3::new(1.0, 2.0, 3.0));
}

// -------------------------------------------------------------------------
// 枚举令牌
// -------------------------------------------------------------------------

#[test]
fn test_emitter_type_tokens() {
    assert_eq!(parse_emitter_type("POINT"), EmitterType::Point);
    assert_eq!(parse_emitter_type("LINE"), EmitterType::Line);
    assert_eq!(parse_emitter_type("BOX"), EmitterType::Box);
    assert_eq!(parse_emitter_type("CIRCLE"), EmitterType::Circle);
    assert_eq!(parse_emitter_type("SPHERE"), EmitterType::Sphere);
    assert_eq!(parse_emitter_type("MESH"), EmitterType::Mesh);
}

#[test]
fn test_dir_mode_tokens() {
    assert_eq!(parse_dir_mode("RAND"), DirMode::Rand);
    assert_eq!(parse_dir_mode("DIR"), DirMode::Dir);
    assert_eq!(parse_dir_mode("TARGET"), DirMode::Target);
}

#[test]
fn test_alpha_func_tokens() {
    assert_eq!(parse_alpha_func("NONE"), AlphaFunc::None);
    assert_eq!(parse_alpha_func("BLEND"), AlphaFunc::Blend);
    assert_eq!(parse_alpha_func("ADD"), AlphaFunc::Add);
    assert_eq!(parse_alpha_func("MUL"), AlphaFunc::Mul);
}

#[test]
fn test_unknown_tokens_use_defaults() {
    assert_eq!(parse_emitter_type("BOGUS"), EmitterType::Point);
    assert_eq!(parse_dir_mode("BOGUS"), DirMode::Rand);
    assert_eq!(parse_alpha_func("BOGUS"), AlphaFunc::None);

    assert_eq!(parse_emitter_type(""), EmitterType::Point);
    assert_eq!(parse_dir_mode(""), DirMode::Rand);
    assert_eq!(parse_alpha_func(""), AlphaFunc::None);
}

#[test]
fn test_tokens_are_case_sensitive() {
    assert_eq!(parse_emitter_type("sphere"), EmitterType::Point);
    assert_eq!(parse_dir_mode("Target"), DirMode::Rand);
    assert_eq!(parse_alpha_func("add"), AlphaFunc::None);
    assert_eq!(EmitterType::from_token(" BOX"), None);
}

#[test]
fn test_token_display_round_trips_through_from_token() {
    for ty in [EmitterType::Line, EmitterType::Mesh] {
        assert_eq!(EmitterType::from_token(&ty.to_string()), Some(ty));
    }
    assert_eq!(DirMode::Target.to_string(), "TARGET");
    assert_eq!(AlphaFunc::Blend.to_string(), "BLEND");
}
