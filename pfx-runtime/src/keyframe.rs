//! # Keyframe 模块
//!
//! 关键帧缩放曲线的求值。发射率曲线与形状缩放曲线共用同一个求值器。
//!
//! ## 求值规则
//!
//! ```text
//! scaled = (fps * time_ms) 截断为整数    → 千分之一帧精度的定点帧位置
//! at     = scaled / 1000                 → 帧索引
//! alpha  = (scaled % 1000) / 1000        → 帧内插值参数
//! ```
//!
//! - 空序列恒为 `1.0`（无动画）
//! - `smooth` 为**硬阶跃**：`alpha < 0.5` 取 0，否则取 1（不是平滑曲线）
//! - 循环时两个帧索引都对长度取模；不循环时都钳制到最后一帧

use crate::parse::{flag, parse_key_list};

/// 空关键帧序列的求值结果
pub const NO_ANIMATION: f32 = 1.0;

/// 一条关键帧曲线
///
/// 对应源记录中的 `*ScaleKeys_S` / `*IsLooping` / `*IsSmooth` / `*FPS` 四个字段。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyTrack {
    /// 关键帧值（可能为空）
    pub keys: Vec<f32>,
    /// 采样率（帧/秒）
    pub fps: f32,
    /// 硬阶跃插值
    pub smooth: bool,
    /// 循环播放
    pub looping: bool,
}

impl KeyTrack {
    /// 从源记录字段构建
    pub fn from_source(keys: &str, fps: f32, smooth: i32, looping: i32) -> Self {
        Self {
            keys: parse_key_list(keys),
            fps,
            smooth: flag(smooth),
            looping: flag(looping),
        }
    }

    /// 在 `time`（毫秒）处求值
    pub fn sample(&self, time: u64) -> f32 {
        fetch_scale_key(time, &self.keys, self.fps, self.smooth, self.looping)
    }

    /// 是否带动画（非空序列）
    pub fn is_animated(&self) -> bool {
        !self.keys.is_empty()
    }

    /// 按采样率播放一遍所需的毫秒数
    ///
    /// 空序列或 `fps <= 0` 时没有有限周期，返回 `None`。
    pub fn cycle_duration_ms(&self) -> Option<u64> {
        if self.keys.is_empty() || self.fps.is_nan() || self.fps <= 0.0 {
            return None;
        }
        Some((self.keys.len() as f64 * 1000.0 / self.fps as f64) as u64)
    }

    /// 最大关键帧值，运行最大值从 0 开始
    pub fn peak(&self) -> f32 {
        self.keys.iter().copied().fold(0.0, f32::max)
    }
}

/// 关键帧求值器
///
/// # 参数
///
/// - `time`: 经过时间（毫秒）
/// - `keys`: 关键帧序列
/// - `fps`: 采样率；负数或 NaN 时帧位置为 0
/// - `smooth`: 硬阶跃插值
/// - `looping`: 循环播放
pub fn fetch_scale_key(time: u64, keys: &[f32], fps: f32, smooth: bool, looping: bool) -> f32 {
    if keys.is_empty() {
        return NO_ANIMATION;
    }

    // `as` 转换饱和：负数与 NaN 得 0
    let scaled = (fps * time as f32) as u64;
    let at = (scaled / 1000) as usize;
    let mut alpha = (scaled % 1000) as f32 / 1000.0;
    if smooth {
        alpha = if alpha < 0.5 { 0.0 } else { 1.0 };
    }

    let len = keys.len();
    let (frame_a, frame_b) = if looping {
        (at % len, at.wrapping_add(1) % len)
    } else {
        (at.min(len - 1), at.saturating_add(1).min(len - 1))
    };

    let k0 = keys[frame_a];
    let k1 = keys[frame_b];
    k0 + alpha * (k1 - k0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAMP: [f32; 2] = [0.0, 1.0];

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_empty_sequence_is_constant_one() {
        assert_eq!(fetch_scale_key(0, &[], 10.0, false, false), 1.0);
        assert_eq!(fetch_scale_key(123_456, &[], 0.0, true, true), 1.0);
    }

    #[test]
    fn test_linear_interpolation_within_frame() {
        assert_eq!(fetch_scale_key(0, &RAMP, 1.0, false, false), 0.0);
        assert!(approx(fetch_scale_key(250, &RAMP, 1.0, false, false), 0.25));
        assert!(approx(fetch_scale_key(750, &RAMP, 1.0, false, false), 0.75));
    }

    #[test]
    fn test_clamped_sequence_holds_last_value() {
        assert_eq!(fetch_scale_key(1000, &RAMP, 1.0, false, false), 1.0);
        assert_eq!(fetch_scale_key(1_000_000, &RAMP, 1.0, false, false), 1.0);
        // 越过末尾后帧内 alpha 不再外推
        assert_eq!(fetch_scale_key(5_500, &RAMP, 1.0, false, false), 1.0);
    }

    #[test]
    fn test_looping_is_periodic() {
        let at_zero = fetch_scale_key(0, &RAMP, 1.0, false, true);
        let one_cycle = fetch_scale_key(2000, &RAMP, 1.0, false, true);
        assert_eq!(at_zero, one_cycle);

        // 最后一帧向第一帧插值
        assert!(approx(fetch_scale_key(1500, &RAMP, 1.0, false, true), 0.5));
        assert!(approx(fetch_scale_key(2250, &RAMP, 1.0, false, true), 0.25));
    }

    #[test]
    fn test_smooth_is_a_hard_step() {
        let keys = [2.0, 6.0];
        assert_eq!(fetch_scale_key(499, &keys, 1.0, true, false), 2.0);
        assert_eq!(fetch_scale_key(500, &keys, 1.0, true, false), 6.0);
        assert_eq!(fetch_scale_key(999, &keys, 1.0, true, false), 6.0);
    }

    #[test]
    fn test_fps_scales_time() {
        let keys = [0.0, 10.0, 20.0, 30.0];
        // 4 fps：500ms → 第 2 帧
        assert_eq!(fetch_scale_key(500, &keys, 4.0, false, false), 20.0);
        assert!(approx(fetch_scale_key(125, &keys, 4.0, false, false), 5.0));
    }

    #[test]
    fn test_degenerate_fps_stays_on_first_frame() {
        let keys = [3.0, 9.0];
        assert_eq!(fetch_scale_key(10_000, &keys, 0.0, false, false), 3.0);
        assert_eq!(fetch_scale_key(10_000, &keys, -5.0, false, true), 3.0);
        assert_eq!(fetch_scale_key(10_000, &keys, f32::NAN, false, false), 3.0);
    }

    #[test]
    fn test_single_key_is_constant() {
        for t in [0, 400, 1000, 99_999] {
            assert_eq!(fetch_scale_key(t, &[0.7], 3.0, false, true), 0.7);
            assert_eq!(fetch_scale_key(t, &[0.7], 3.0, false, false), 0.7);
        }
    }

    #[test]
    fn test_track_from_source() {
        let track = KeyTrack::from_source("0 1 0.5", 2.0, 0, 1);
        assert_eq!(track.keys, vec![0.0, 1.0, 0.5]);
        assert!(!track.smooth);
        assert!(track.looping);
        assert!(track.is_animated());
        assert_eq!(track.cycle_duration_ms(), Some(1500));
        assert_eq!(track.peak(), 1.0);
        assert_eq!(track.sample(1000), 0.5);
    }

    #[test]
    fn test_track_without_cycle() {
        assert_eq!(KeyTrack::default().cycle_duration_ms(), None);
        let frozen = KeyTrack::from_source("1 2", 0.0, 0, 0);
        assert_eq!(frozen.cycle_duration_ms(), None);
        assert_eq!(KeyTrack::from_source("-1 -2", 1.0, 0, 0).peak(), 0.0);
    }
}
