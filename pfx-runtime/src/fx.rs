//! # Fx 模块
//!
//! 粒子效果描述符：加载期从源记录一次性构建，之后只读。
//!
//! ## 使用流程
//!
//! ```text
//! ParticleFxSource (from loader)
//!   → ParticleFx::new(&src, name, &textures)   每个字段调用一次解析器，纹理查找一次
//!   → Arc<ParticleFx>                          被任意多个运行中的效果实例共享
//!   → 模拟器每帧调用 pps_scale(t) / shp_scale(t)
//! ```
//!
//! 构建**不会失败**：每个字段解析器都有确定的降级规则。

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::keyframe::KeyTrack;
use crate::parse::{
    AlphaFunc, DirMode, EmitterType, flag, parse_alpha_func, parse_dir_mode, parse_emitter_type,
    parse_vec2, parse_vec3,
};
use crate::source::ParticleFxSource;
use crate::texture::{TextureHandle, TextureResolver, resolve_or_black};

/// 发射率曲线为空时的建议播放时长（毫秒）
pub const DEFAULT_PREFERRED_TIME: u64 = 5000;

/// 8 位 alpha 源值的上限
const ALPHA_SOURCE_MAX: f32 = 255.0;

/// 发射参数
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    /// 基础发射率（粒子/秒），≥ 0
    pub pps_value: f32,
    /// 发射率缩放曲线
    pub scale: KeyTrack,
    /// 生成子发射器的令牌
    pub create_em: String,
    pub create_em_delay: f32,
}

/// 发射器形状
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub emitter: EmitterType,
    /// 参考坐标系令牌
    pub frame_of_reference: String,
    pub offset: Vec3,
    pub distrib_type: String,
    pub distrib_walk_speed: f32,
    pub is_volume: bool,
    pub dim: Vec3,
    pub mesh: String,
    pub mesh_render: bool,
    /// 形状缩放曲线
    pub scale: KeyTrack,
}

/// 初始方向
#[derive(Debug, Clone, PartialEq)]
pub struct Direction {
    pub mode: DirMode,
    pub frame_of_reference: String,
    pub target_frame_of_reference: String,
    pub target_pos: Vec3,
    pub angle_head: f32,
    pub angle_head_var: f32,
    pub angle_elev: f32,
    pub angle_elev_var: f32,
}

/// 速度与寿命
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub vel_avg: f32,
    pub vel_var: f32,
    pub lifespan_avg: f32,
    pub lifespan_var: f32,
}

/// 飞行
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flight {
    pub gravity: Vec3,
    pub collision_detection: bool,
}

/// 外观
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    /// 纹理句柄，永不为空（找不到时为黑色回退纹理）
    pub texture: TextureHandle,
    pub orientation: String,
    pub tex_is_quad_poly: bool,
    pub tex_ani_fps: f32,
    pub tex_ani_is_looping: bool,
    pub color_start: Vec3,
    pub color_end: Vec3,
    pub size_start: Vec2,
    pub size_end_scale: f32,
    pub alpha_func: AlphaFunc,
    /// 归一化到 [0, 1]
    pub alpha_start: f32,
    /// 归一化到 [0, 1]
    pub alpha_end: f32,
}

/// 拖尾（透传字段）
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    pub fade_speed: f32,
    pub texture: String,
    pub width: f32,
}

/// 地面标记（透传字段）
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub fade_speed: f32,
    pub texture: String,
    pub size: f32,
}

/// 群集
#[derive(Debug, Clone, PartialEq)]
pub struct Flocking {
    pub mode: String,
    pub strength: f32,
}

/// 粒子效果描述符
///
/// 构建后不可变，只暴露只读访问器；`Send + Sync`，可通过 `Arc` 被多个
/// 模拟线程同时读取而无需加锁。
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleFx {
    emission: Emission,
    shape: Shape,
    direction: Direction,
    kinematics: Kinematics,
    flight: Flight,
    visual: Visual,
    trail: Trail,
    marker: Marker,
    flocking: Flocking,
    use_emitters_for: bool,
    time_start_end: String,
    is_ambient: bool,
    debug_name: String,
}

/// 8 位 alpha → [0, 1]；越界与 NaN 被钳制
fn normalize_alpha(raw: f32) -> f32 {
    let v = raw / ALPHA_SOURCE_MAX;
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

impl ParticleFx {
    /// 从源记录构建描述符
    ///
    /// # 参数
    ///
    /// - `src`: 源记录
    /// - `name`: 调试显示名
    /// - `textures`: 纹理查找能力；找不到时使用黑色回退纹理
    pub fn new<R>(src: &ParticleFxSource, name: &str, textures: &R) -> Self
    where
        R: TextureResolver + ?Sized,
    {
        let texture = resolve_or_black(textures, &src.vis_name);
        if texture.is_fallback() {
            tracing::debug!(
                effect = name,
                texture = %src.vis_name,
                "纹理未找到，使用黑色回退纹理"
            );
        }

        Self {
            emission: Emission {
                // f32::max 对 NaN 返回另一侧，NaN 同样得 0
                pps_value: src.pps_value.max(0.0),
                scale: KeyTrack::from_source(
                    &src.pps_scale_keys,
                    src.pps_fps,
                    src.pps_is_smooth,
                    src.pps_is_looping,
                ),
                create_em: src.pps_create_em.clone(),
                create_em_delay: src.pps_create_em_delay,
            },
            shape: Shape {
                emitter: parse_emitter_type(&src.shp_type),
                frame_of_reference: src.shp_for.clone(),
                offset: parse_vec3(&src.shp_offset_vec),
                distrib_type: src.shp_distrib_type.clone(),
                distrib_walk_speed: src.shp_distrib_walk_speed,
                is_volume: flag(src.shp_is_volume),
                dim: parse_vec3(&src.shp_dim),
                mesh: src.shp_mesh.clone(),
                mesh_render: flag(src.shp_mesh_render),
                scale: KeyTrack::from_source(
                    &src.shp_scale_keys,
                    src.shp_scale_fps,
                    src.shp_scale_is_smooth,
                    src.shp_scale_is_looping,
                ),
            },
            direction: Direction {
                mode: parse_dir_mode(&src.dir_mode),
                frame_of_reference: src.dir_for.clone(),
                target_frame_of_reference: src.dir_mode_target_for.clone(),
                target_pos: parse_vec3(&src.dir_mode_target_pos),
                angle_head: src.dir_angle_head,
                angle_head_var: src.dir_angle_head_var,
                angle_elev: src.dir_angle_elev,
                angle_elev_var: src.dir_angle_elev_var,
            },
            kinematics: Kinematics {
                vel_avg: src.vel_avg,
                vel_var: src.vel_var,
                lifespan_avg: src.lsp_part_avg,
                lifespan_var: src.lsp_part_var,
            },
            flight: Flight {
                gravity: parse_vec3(&src.fly_gravity),
                collision_detection: flag(src.fly_coll_det),
            },
            visual: Visual {
                texture,
                orientation: src.vis_orientation.clone(),
                tex_is_quad_poly: flag(src.vis_tex_is_quad_poly),
                tex_ani_fps: src.vis_tex_ani_fps,
                tex_ani_is_looping: flag(src.vis_tex_ani_is_looping),
                color_start: parse_vec3(&src.vis_tex_color_start),
                color_end: parse_vec3(&src.vis_tex_color_end),
                size_start: parse_vec2(&src.vis_size_start),
                size_end_scale: src.vis_size_end_scale,
                alpha_func: parse_alpha_func(&src.vis_alpha_func),
                alpha_start: normalize_alpha(src.vis_alpha_start),
                alpha_end: normalize_alpha(src.vis_alpha_end),
            },
            trail: Trail {
                fade_speed: src.trl_fade_speed,
                texture: src.trl_texture.clone(),
                width: src.trl_width,
            },
            marker: Marker {
                fade_speed: src.mrk_fade_speed,
                texture: src.mrk_texture.clone(),
                size: src.mrk_size,
            },
            flocking: Flocking {
                mode: src.flock_mode.clone(),
                strength: src.flock_strength,
            },
            use_emitters_for: flag(src.use_emitters_for),
            time_start_end: src.time_start_end.clone(),
            is_ambient: flag(src.is_ambient_pfx),
            debug_name: name.to_string(),
        }
    }

    // ---------------------------------------------------------------------
    // 派生查询
    // ---------------------------------------------------------------------

    /// 单个粒子的最长存活时间（平均寿命 + 寿命方差，截断为整数）
    pub fn max_lifetime(&self) -> u64 {
        (self.kinematics.lifespan_avg + self.kinematics.lifespan_var) as u64
    }

    /// 建议的效果总时长
    ///
    /// 发射率曲线为空时为 [`DEFAULT_PREFERRED_TIME`]；否则为按采样率
    /// 播放一遍曲线的整秒数 × 1000。`ceil(fps)` 至少取 1，除法向下截断。
    pub fn effect_preferred_time(&self) -> u64 {
        let track = &self.emission.scale;
        if !track.is_animated() {
            return DEFAULT_PREFERRED_TIME;
        }

        let fps = (track.fps.ceil() as usize).max(1);
        let seconds = track.keys.len() / fps;
        seconds as u64 * 1000
    }

    /// 最大瞬时发射率：基础发射率 × 曲线峰值
    pub fn max_pps(&self) -> f32 {
        let track = &self.emission.scale;
        if !track.is_animated() {
            return self.emission.pps_value;
        }
        track.peak() * self.emission.pps_value
    }

    /// 形状缩放，`time` 为毫秒；不钳制，可能为负
    pub fn shp_scale(&self, time: u64) -> f32 {
        self.shape.scale.sample(time)
    }

    /// 发射率缩放，`time` 为毫秒；负值钳制为 0
    pub fn pps_scale(&self, time: u64) -> f32 {
        let v = self.emission.scale.sample(time);
        if v < 0.0 { 0.0 } else { v }
    }

    // ---------------------------------------------------------------------
    // 只读访问器
    // ---------------------------------------------------------------------

    pub fn emission(&self) -> &Emission {
        &self.emission
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn direction(&self) -> &Direction {
        &self.direction
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    pub fn flight(&self) -> &Flight {
        &self.flight
    }

    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    pub fn flocking(&self) -> &Flocking {
        &self.flocking
    }

    /// 粒子是否使用发射器的参考坐标系
    pub fn use_emitters_for(&self) -> bool {
        self.use_emitters_for
    }

    pub fn time_start_end(&self) -> &str {
        &self.time_start_end
    }

    /// 是否为环境粒子效果
    pub fn is_ambient(&self) -> bool {
        self.is_ambient
    }

    pub fn debug_name(&self) -> &str {
        &self.debug_name
    }

    /// 生成用于工具输出的摘要
    pub fn summary(&self) -> FxSummary {
        FxSummary {
            name: self.debug_name.clone(),
            emitter: self.shape.emitter,
            dir_mode: self.direction.mode,
            alpha_func: self.visual.alpha_func,
            texture: self.visual.texture.name().to_string(),
            texture_fallback: self.visual.texture.is_fallback(),
            shape_dim: self.shape.dim,
            size_start: self.visual.size_start,
            pps_value: self.emission.pps_value,
            max_pps: self.max_pps(),
            max_lifetime: self.max_lifetime(),
            preferred_time: self.effect_preferred_time(),
            pps_keys: self.emission.scale.keys.len(),
            shp_keys: self.shape.scale.keys.len(),
            pps_cycle_ms: self.emission.scale.cycle_duration_ms(),
            shp_cycle_ms: self.shape.scale.cycle_duration_ms(),
            is_ambient: self.is_ambient,
        }
    }
}

/// 描述符摘要（工具输出用）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FxSummary {
    pub name: String,
    pub emitter: EmitterType,
    pub dir_mode: DirMode,
    pub alpha_func: AlphaFunc,
    pub texture: String,
    pub texture_fallback: bool,
    /// 以 `[x, y, z]` / `[x, y]` 数组序列化
    pub shape_dim: Vec3,
    pub size_start: Vec2,
    pub pps_value: f32,
    pub max_pps: f32,
    pub max_lifetime: u64,
    pub preferred_time: u64,
    pub pps_keys: usize,
    pub shp_keys: usize,
    /// 曲线播放一遍的毫秒数；无动画或 fps 非正时为 `None`
    pub pps_cycle_ms: Option<u64>,
    pub shp_cycle_ms: Option<u64>,
    pub is_ambient: bool,
}
