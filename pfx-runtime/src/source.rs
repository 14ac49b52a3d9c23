//! # Source 模块
//!
//! 源记录：脚本/资源格式中一条粒子效果定义的原始字段集合。
//!
//! 外部反序列化器已经把定义拆成具名字段：向量、枚举、关键帧列表以
//! 文本形式保存，布尔值是整数（非零即真），其余为浮点数。
//! 本模块只负责承载这些字段，解释由 [`crate::fx::ParticleFx`] 完成。
//!
//! JSON 形式同时接受 `snake_case` 字段名与脚本中的原始字段名
//! （如 `ppsScaleKeys_S`）。缺失字段取零值/空串。

use serde::{Deserialize, Serialize};

use crate::error::LoadResult;

/// 一条粒子效果的原始源记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleFxSource {
    // ── 发射 ──
    #[serde(alias = "ppsValue")]
    pub pps_value: f32,
    #[serde(alias = "ppsScaleKeys_S")]
    pub pps_scale_keys: String,
    #[serde(alias = "ppsIsLooping")]
    pub pps_is_looping: i32,
    #[serde(alias = "ppsIsSmooth")]
    pub pps_is_smooth: i32,
    #[serde(alias = "ppsFPS")]
    pub pps_fps: f32,
    #[serde(alias = "ppsCreateEm_S")]
    pub pps_create_em: String,
    #[serde(alias = "ppsCreateEmDelay")]
    pub pps_create_em_delay: f32,

    // ── 形状 ──
    #[serde(alias = "shpType_S")]
    pub shp_type: String,
    #[serde(alias = "shpFOR_S")]
    pub shp_for: String,
    #[serde(alias = "shpOffsetVec_S")]
    pub shp_offset_vec: String,
    #[serde(alias = "shpDistribType_S")]
    pub shp_distrib_type: String,
    #[serde(alias = "shpDistribWalkSpeed")]
    pub shp_distrib_walk_speed: f32,
    #[serde(alias = "shpIsVolume")]
    pub shp_is_volume: i32,
    #[serde(alias = "shpDim_S")]
    pub shp_dim: String,
    #[serde(alias = "shpMesh_S")]
    pub shp_mesh: String,
    #[serde(alias = "shpMeshRender_B")]
    pub shp_mesh_render: i32,
    #[serde(alias = "shpScaleKeys_S")]
    pub shp_scale_keys: String,
    #[serde(alias = "shpScaleIsLooping")]
    pub shp_scale_is_looping: i32,
    #[serde(alias = "shpScaleIsSmooth")]
    pub shp_scale_is_smooth: i32,
    #[serde(alias = "shpScaleFPS")]
    pub shp_scale_fps: f32,

    // ── 方向 ──
    #[serde(alias = "dirMode_S")]
    pub dir_mode: String,
    #[serde(alias = "dirFOR_S")]
    pub dir_for: String,
    #[serde(alias = "dirModeTargetFOR_S")]
    pub dir_mode_target_for: String,
    #[serde(alias = "dirModeTargetPos_S")]
    pub dir_mode_target_pos: String,
    #[serde(alias = "dirAngleHead")]
    pub dir_angle_head: f32,
    #[serde(alias = "dirAngleHeadVar")]
    pub dir_angle_head_var: f32,
    #[serde(alias = "dirAngleElev")]
    pub dir_angle_elev: f32,
    #[serde(alias = "dirAngleElevVar")]
    pub dir_angle_elev_var: f32,

    // ── 速度与寿命 ──
    #[serde(alias = "velAvg")]
    pub vel_avg: f32,
    #[serde(alias = "velVar")]
    pub vel_var: f32,
    #[serde(alias = "lspPartAvg")]
    pub lsp_part_avg: f32,
    #[serde(alias = "lspPartVar")]
    pub lsp_part_var: f32,

    // ── 飞行 ──
    #[serde(alias = "flyGravity_S")]
    pub fly_gravity: String,
    #[serde(alias = "flyCollDet_B")]
    pub fly_coll_det: i32,

    // ── 外观 ──
    #[serde(alias = "visName_S")]
    pub vis_name: String,
    #[serde(alias = "visOrientation_S")]
    pub vis_orientation: String,
    #[serde(alias = "visTexIsQuadPoly")]
    pub vis_tex_is_quad_poly: i32,
    #[serde(alias = "visTexAniFPS")]
    pub vis_tex_ani_fps: f32,
    #[serde(alias = "visTexAniIsLooping")]
    pub vis_tex_ani_is_looping: i32,
    #[serde(alias = "visTexColorStart_S")]
    pub vis_tex_color_start: String,
    #[serde(alias = "visTexColorEnd_S")]
    pub vis_tex_color_end: String,
    #[serde(alias = "visSizeStart_S")]
    pub vis_size_start: String,
    #[serde(alias = "visSizeEndScale")]
    pub vis_size_end_scale: f32,
    #[serde(alias = "visAlphaFunc_S")]
    pub vis_alpha_func: String,
    #[serde(alias = "visAlphaStart")]
    pub vis_alpha_start: f32,
    #[serde(alias = "visAlphaEnd")]
    pub vis_alpha_end: f32,

    // ── 拖尾 / 地面标记 ──
    #[serde(alias = "trlFadeSpeed")]
    pub trl_fade_speed: f32,
    #[serde(alias = "trlTexture_S")]
    pub trl_texture: String,
    #[serde(alias = "trlWidth")]
    pub trl_width: f32,
    #[serde(alias = "mrkFadeSpeed")]
    pub mrk_fade_speed: f32,
    #[serde(alias = "mrkTexture_S")]
    pub mrk_texture: String,
    #[serde(alias = "mrkSize")]
    pub mrk_size: f32,

    // ── 群集 ──
    #[serde(alias = "flockMode")]
    pub flock_mode: String,
    #[serde(alias = "flockStrength")]
    pub flock_strength: f32,

    // ── 其他 ──
    #[serde(alias = "useEmittersFOR")]
    pub use_emitters_for: i32,
    #[serde(alias = "timeStartEnd_S")]
    pub time_start_end: String,
    #[serde(alias = "m_bIsAmbientPFX")]
    pub is_ambient_pfx: i32,
}

impl ParticleFxSource {
    /// 从 JSON 对象解析一条源记录
    ///
    /// 同一字段的两种拼写（如 `ppsValue` 与 `pps_value`）同时出现时，
    /// serde 视为重复字段，返回 [`LoadError::Json`](crate::error::LoadError::Json)
    /// 而不是取其中之一。
    pub fn from_json(text: &str) -> LoadResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
