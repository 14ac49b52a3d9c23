//! # PFX Inspect
//!
//! 粒子效果定义检查工具。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p pfx-inspect -- show effects/fire.json
//! cargo run -p pfx-inspect -- show effects/fire.json --name FIRE_SMOKE --json
//! cargo run -p pfx-inspect -- sample effects/fire.json --name FIRE_SMOKE --step 50
//! cargo run -p pfx-inspect -- --textures assets/textures check effects/
//! ```

mod config;
mod report;
mod scan;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use pfx_runtime::{
    DiagnosticLevel, DiagnosticResult, NoTextures, ParticleFxLibrary, TextureRegistry,
    TextureResolver, analyze_source, parse_sources,
};
use tracing::Level;

use crate::config::{DEFAULT_CONFIG_FILE, InspectConfig};

#[derive(Parser)]
#[command(name = "pfx-inspect")]
#[command(about = "粒子效果定义检查工具 - 查看描述符、采样曲线、静态检查")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件路径
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// 纹理根目录（覆盖配置文件）
    #[arg(long, global = true)]
    textures: Option<PathBuf>,

    /// 输出更多信息（可重复）
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// 显示效果摘要
    Show {
        /// 效果定义文件
        file: PathBuf,

        /// 只显示指定效果
        #[arg(long)]
        name: Option<String>,

        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 采样发射率与形状缩放曲线
    Sample {
        /// 效果定义文件
        file: PathBuf,

        /// 效果名
        #[arg(long)]
        name: String,

        /// 采样步长（毫秒，覆盖配置文件）
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        step: Option<u64>,

        /// 采样终点（毫秒，默认为效果的建议时长）
        #[arg(long)]
        until: Option<u64>,
    },

    /// 静态检查文件或目录中的所有效果定义
    Check {
        /// 文件或目录
        path: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match real_main(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("pfx-inspect error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn real_main(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = InspectConfig::load(&cli.config).with_texture_root(cli.textures);
    config.validate()?;

    let registry = match &config.texture_root {
        Some(root) => Some(scan::load_texture_registry(root, &config.texture_extensions)?),
        None => None,
    };
    let textures: &dyn TextureResolver = match &registry {
        Some(registry) => registry,
        None => &NoTextures,
    };

    match cli.command {
        Commands::Show { file, name, json } => {
            show(&file, name.as_deref(), json, textures)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Sample {
            file,
            name,
            step,
            until,
        } => {
            let library = load_library(&file, textures)?;
            let Some(fx) = library.get(&name) else {
                bail!("效果 '{name}' 不存在于 {}", file.display());
            };
            let step = step.unwrap_or(config.sample.step_ms);
            let until = until
                .or(config.sample.until_ms)
                .unwrap_or_else(|| fx.effect_preferred_time());

            let rows = report::sample_curves(&fx, step, until);
            print!("{}", report::format_samples(&rows));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { path } => {
            let clean = check(&path, registry.as_ref(), cli.verbose > 0)?;
            Ok(if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
    }
}

fn load_library(
    file: &Path,
    textures: &dyn TextureResolver,
) -> anyhow::Result<ParticleFxLibrary> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("读取效果定义失败: {}", file.display()))?;
    ParticleFxLibrary::from_json(&text, textures)
        .with_context(|| format!("解析效果定义失败: {}", file.display()))
}

fn show(
    file: &Path,
    name: Option<&str>,
    json: bool,
    textures: &dyn TextureResolver,
) -> anyhow::Result<()> {
    let library = load_library(file, textures)?;

    let summaries: Vec<_> = match name {
        Some(name) => match library.get(name) {
            Some(fx) => vec![fx.summary()],
            None => bail!("效果 '{name}' 不存在于 {}", file.display()),
        },
        None => library.iter().map(|(_, fx)| fx.summary()).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for summary in &summaries {
            print!("{}", report::format_summary(summary));
        }
    }
    Ok(())
}

/// 检查所有效果定义，没有错误时返回 `true`
fn check(
    path: &Path,
    textures: Option<&TextureRegistry>,
    verbose: bool,
) -> anyhow::Result<bool> {
    let files = scan::collect_definition_files(path)?;
    if files.is_empty() {
        bail!("未找到效果定义文件: {}", path.display());
    }

    let resolver = textures.map(|r| r as &dyn TextureResolver);
    let min_level = if verbose {
        DiagnosticLevel::Info
    } else {
        DiagnosticLevel::Warn
    };

    let mut total = DiagnosticResult::new();
    let mut load_failures = 0usize;
    let mut effect_count = 0usize;

    for file in &files {
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("读取效果定义失败: {}", file.display()))?;
        let sources = match parse_sources(&text) {
            Ok(sources) => sources,
            Err(e) => {
                println!("{}: [ERROR] {e}", file.display());
                load_failures += 1;
                continue;
            }
        };

        let mut result = DiagnosticResult::new();
        for (name, src) in &sources {
            result.merge(analyze_source(name, src, resolver));
        }
        effect_count += sources.len();

        for diag in result.filter_by_level(min_level) {
            println!("{}: {diag}", file.display());
        }
        total.merge(result);
    }

    let errors = total.error_count() + load_failures;
    println!(
        "检查完成: {} 个文件, {} 个效果, {} 个错误, {} 个警告",
        files.len(),
        effect_count,
        errors,
        total.warn_count()
    );

    Ok(errors == 0)
}
