//! # Report 模块
//!
//! 文本输出格式化。

use std::fmt::Write as _;

use pfx_runtime::{FxSummary, ParticleFx};

/// 一条采样结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRow {
    pub time: u64,
    pub pps_scale: f32,
    pub shp_scale: f32,
}

/// 按步长采样 `[0, until]`，包含终点
pub fn sample_curves(fx: &ParticleFx, step: u64, until: u64) -> Vec<SampleRow> {
    let step = step.max(1);
    let mut rows = Vec::new();
    let mut time = 0u64;
    loop {
        rows.push(SampleRow {
            time,
            pps_scale: fx.pps_scale(time),
            shp_scale: fx.shp_scale(time),
        });
        if time >= until {
            break;
        }
        time = time.saturating_add(step).min(until);
    }
    rows
}

/// 渲染采样表
pub fn format_samples(rows: &[SampleRow]) -> String {
    let mut out = format!("{:>8}  {:>10}  {:>10}\n", "t(ms)", "pps_scale", "shp_scale");
    for row in rows {
        let _ = writeln!(
            out,
            "{:>8}  {:>10.4}  {:>10.4}",
            row.time, row.pps_scale, row.shp_scale
        );
    }
    out
}

/// 渲染单条效果摘要
pub fn format_summary(summary: &FxSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", summary.name);
    let _ = writeln!(
        out,
        "  emitter={} dir={} alpha={}",
        summary.emitter, summary.dir_mode, summary.alpha_func
    );

    let texture = if summary.texture_fallback {
        "<black fallback>"
    } else {
        summary.texture.as_str()
    };
    let _ = writeln!(out, "  texture={texture}");
    let _ = writeln!(
        out,
        "  pps={} max_pps={} keys(pps/shp)={}/{} cycle(pps/shp)={}/{}",
        summary.pps_value,
        summary.max_pps,
        summary.pps_keys,
        summary.shp_keys,
        format_cycle(summary.pps_cycle_ms),
        format_cycle(summary.shp_cycle_ms)
    );
    let _ = writeln!(
        out,
        "  max_lifetime={}ms preferred_time={}ms{}",
        summary.max_lifetime,
        summary.preferred_time,
        if summary.is_ambient { " ambient" } else { "" }
    );
    out
}

fn format_cycle(cycle: Option<u64>) -> String {
    cycle.map_or_else(|| "-".to_string(), |ms| format!("{ms}ms"))
}
