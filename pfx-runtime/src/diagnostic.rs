//! # 诊断模块
//!
//! 对源记录做静态检查，报告字段解析器**静默降级**的每一处。
//!
//! ## 设计原则
//!
//! - 纯函数 API，可在无 IO 环境下运行
//! - 诊断分级：Error（必须修复）、Warn（建议修复）、Info（信息提示）
//! - 复用 parse 模块的扫描逻辑，不重复实现数字语法
//! - 诊断从不阻止构建：描述符总能构建出来

use crate::parse::{AlphaFunc, DirMode, EmitterType, ZERO_MARKER, scan_f32};
use crate::source::ParticleFxSource;
use crate::texture::TextureResolver;

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    /// 信息提示
    Info,
    /// 警告（建议修复）
    Warn,
    /// 错误（必须修复）
    Error,
}

impl std::fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// 诊断条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断级别
    pub level: DiagnosticLevel,
    /// 效果名
    pub effect: String,
    /// 字段名（脚本中的原始字段名，如 `shpDim_S`）
    pub field: Option<&'static str>,
    /// 诊断消息
    pub message: String,
    /// 诊断详情（可选，如原始字段内容）
    pub detail: Option<String>,
}

impl Diagnostic {
    fn new(level: DiagnosticLevel, effect: &str, message: impl Into<String>) -> Self {
        Self {
            level,
            effect: effect.to_string(),
            field: None,
            message: message.into(),
            detail: None,
        }
    }

    /// 创建错误诊断
    pub fn error(effect: &str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, effect, message)
    }

    /// 创建警告诊断
    pub fn warn(effect: &str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warn, effect, message)
    }

    /// 创建信息诊断
    pub fn info(effect: &str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, effect, message)
    }

    /// 设置字段名
    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    /// 设置详情
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level, self.effect)?;
        if let Some(field) = self.field {
            write!(f, ".{}", field)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, "\n  | {}", detail)?;
        }
        Ok(())
    }
}

/// 诊断结果
#[derive(Debug, Clone, Default)]
pub struct DiagnosticResult {
    /// 诊断条目列表
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticResult {
    /// 创建空结果
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加诊断
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// 合并另一个结果
    pub fn merge(&mut self, other: DiagnosticResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// 获取错误数量
    pub fn error_count(&self) -> usize {
        self.count(DiagnosticLevel::Error)
    }

    /// 获取警告数量
    pub fn warn_count(&self) -> usize {
        self.count(DiagnosticLevel::Warn)
    }

    fn count(&self, level: DiagnosticLevel) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// 按级别过滤
    pub fn filter_by_level(&self, min_level: DiagnosticLevel) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level >= min_level)
            .collect()
    }
}

/// 向量字段的扫描结果
struct VectorScan<'a> {
    /// 成功扫描的分量数（不超过维数）
    components: usize,
    /// 扫描停止后的非空白剩余内容
    rest: &'a str,
}

fn scan_vector(src: &str, arity: usize) -> VectorScan<'_> {
    let mut rest = src;
    let mut components = 0;
    while components < arity {
        let Some((_, next)) = scan_f32(rest) else {
            break;
        };
        rest = next;
        components += 1;
    }
    VectorScan {
        components,
        rest: rest.trim(),
    }
}

/// 扫描关键帧列表，返回 (关键帧数, 非空白剩余内容)
fn scan_keys(src: &str) -> (usize, &str) {
    let mut rest = src;
    let mut count = 0;
    while let Some((_, next)) = scan_f32(rest) {
        rest = next;
        count += 1;
    }
    (count, rest.trim())
}

struct Checker<'a> {
    effect: &'a str,
    result: DiagnosticResult,
}

impl Checker<'_> {
    fn push(&mut self, diagnostic: Diagnostic) {
        self.result.push(diagnostic);
    }

    fn token<T>(
        &mut self,
        field: &'static str,
        value: &str,
        from_token: fn(&str) -> Option<T>,
        fallback: &str,
    ) {
        if value.is_empty() || from_token(value).is_some() {
            return;
        }
        self.push(
            Diagnostic::error(
                self.effect,
                format!("未知令牌 '{}'，降级为 {}", value, fallback),
            )
            .with_field(field),
        );
    }

    fn vector(&mut self, field: &'static str, value: &str, arity: usize) {
        if value == ZERO_MARKER || value.trim().is_empty() {
            return;
        }

        let scan = scan_vector(value, arity);
        if scan.components == 0 {
            self.push(
                Diagnostic::warn(self.effect, "无法解析数字，按零向量处理")
                    .with_field(field)
                    .with_detail(value),
            );
            return;
        }

        if arity == 3 && scan.components == 2 {
            self.push(Diagnostic::info(self.effect, "第三个分量缺失，补 0").with_field(field));
        }

        if !scan.rest.is_empty() {
            self.push(
                Diagnostic::warn(self.effect, format!("尾部内容被忽略: '{}'", scan.rest))
                    .with_field(field),
            );
        }
    }

    fn keys(&mut self, field: &'static str, value: &str, fps_field: &'static str, fps: f32) {
        let (count, rest) = scan_keys(value);
        if !rest.is_empty() {
            self.push(
                Diagnostic::warn(self.effect, format!("关键帧列表在 '{}' 处中断", rest))
                    .with_field(field)
                    .with_detail(format!("已解析 {} 个关键帧", count)),
            );
        }

        if count > 0 && (fps.is_nan() || fps <= 0.0) {
            self.push(
                Diagnostic::warn(self.effect, format!("fps 为 {}，曲线停在第一帧", fps))
                    .with_field(fps_field),
            );
        }
    }

    fn alpha(&mut self, field: &'static str, value: f32) {
        if !(0.0..=255.0).contains(&value) {
            self.push(
                Diagnostic::warn(self.effect, format!("alpha {} 超出 0..=255，已钳制", value))
                    .with_field(field),
            );
        }
    }
}

/// 分析一条源记录
///
/// # 参数
///
/// - `effect`: 效果名（用于诊断输出）
/// - `src`: 源记录
/// - `textures`: 可选的纹理查找能力；提供时检查 `visName_S` 能否解析
pub fn analyze_source(
    effect: &str,
    src: &ParticleFxSource,
    textures: Option<&dyn TextureResolver>,
) -> DiagnosticResult {
    let mut checker = Checker {
        effect,
        result: DiagnosticResult::new(),
    };

    // 枚举令牌
    checker.token(
        "shpType_S",
        &src.shp_type,
        EmitterType::from_token,
        EmitterType::default().as_token(),
    );
    checker.token(
        "dirMode_S",
        &src.dir_mode,
        DirMode::from_token,
        DirMode::default().as_token(),
    );
    checker.token(
        "visAlphaFunc_S",
        &src.vis_alpha_func,
        AlphaFunc::from_token,
        AlphaFunc::default().as_token(),
    );

    // 向量
    checker.vector("shpOffsetVec_S", &src.shp_offset_vec, 3);
    checker.vector("shpDim_S", &src.shp_dim, 3);
    checker.vector("dirModeTargetPos_S", &src.dir_mode_target_pos, 3);
    checker.vector("flyGravity_S", &src.fly_gravity, 3);
    checker.vector("visTexColorStart_S", &src.vis_tex_color_start, 3);
    checker.vector("visTexColorEnd_S", &src.vis_tex_color_end, 3);
    checker.vector("visSizeStart_S", &src.vis_size_start, 2);

    // 关键帧
    checker.keys("ppsScaleKeys_S", &src.pps_scale_keys, "ppsFPS", src.pps_fps);
    checker.keys(
        "shpScaleKeys_S",
        &src.shp_scale_keys,
        "shpScaleFPS",
        src.shp_scale_fps,
    );

    // 标量
    if src.pps_value.is_nan() || src.pps_value < 0.0 {
        checker.push(
            Diagnostic::warn(effect, format!("发射率 {} 无效，按 0 处理", src.pps_value))
                .with_field("ppsValue"),
        );
    }
    if src.lsp_part_avg + src.lsp_part_var < 0.0 {
        checker.push(
            Diagnostic::warn(effect, "寿命之和为负，最长存活时间为 0").with_field("lspPartAvg"),
        );
    }
    checker.alpha("visAlphaStart", src.vis_alpha_start);
    checker.alpha("visAlphaEnd", src.vis_alpha_end);

    // 纹理
    if src.vis_name.trim().is_empty() {
        checker.push(Diagnostic::info(effect, "未指定纹理，使用黑色回退纹理").with_field("visName_S"));
    } else if let Some(textures) = textures
        && textures.resolve(&src.vis_name).is_none()
    {
        checker.push(
            Diagnostic::warn(effect, format!("纹理 '{}' 未找到，使用黑色回退纹理", src.vis_name))
                .with_field("visName_S"),
        );
    }

    checker.result
}
