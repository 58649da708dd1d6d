pub mod args;
pub mod config;
pub mod errors;
pub mod files;
pub mod report;
pub mod theme;

pub use args::{Cli, Commands, FilesArgs, PipeArgs, ResolveArgs, ValidateArgs};
pub use config::{ConfigDescriptor, Finding, Severity, ThemeExtend, ThemeSection, TokenMap, TokenValue};
pub use errors::{ConfigError, Result};
pub use files::{collect_content_files, MatchedFile, SecurityConfig};
pub use report::{ReportBuilder, ResolutionReport};
pub use theme::Theme;

use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Result of resolving a descriptor against the default theme
#[derive(Debug)]
pub struct ResolveResult {
    /// The loaded descriptor
    pub descriptor: ConfigDescriptor,

    /// The default theme with the descriptor's extensions merged in
    pub theme: Theme,

    /// Report summarizing the resolution
    pub report: ResolutionReport,

    /// The JSON that was (or would be) written
    pub rendered: String,
}

/// Load a descriptor and run the lint pass.
///
/// Returns the descriptor together with every finding; deciding whether
/// warnings are fatal is the caller's policy.
pub fn validate_config(path: &Path) -> Result<(ConfigDescriptor, Vec<Finding>)> {
    let descriptor = ConfigDescriptor::from_file(path)?;
    let findings = descriptor.validate();
    Ok((descriptor, findings))
}

/// Resolve entry point: load, lint, merge into the default theme, render
pub fn resolve(args: ResolveArgs) -> Result<ResolveResult> {
    args.validate().map_err(ConfigError::InvalidInput)?;

    let (descriptor, config_path) = match &args.config {
        Some(path) => (
            ConfigDescriptor::from_file(path)?,
            Some(path.display().to_string()),
        ),
        None => (ConfigDescriptor::default(), None),
    };

    if args.verbose {
        eprintln!("Resolving tailwind configuration...");
        if let Some(path) = &config_path {
            eprintln!("Config: {}", path);
        } else {
            eprintln!("Config: built-in defaults");
        }
        eprintln!("Content globs: {:?}", descriptor.content_globs());
        eprintln!("Plugins: {:?}", descriptor.plugin_refs());
    }

    // Error-level findings are fatal before any merging happens
    descriptor.ensure_valid()?;
    let findings = descriptor.validate();

    let mut theme = Theme::default();
    theme.apply_extend(&descriptor.theme.extend);

    let mut builder = ReportBuilder::new().with_findings(findings);
    if let Some(path) = config_path {
        builder = builder.with_config_path(path);
    }
    let report = builder.build(&descriptor, &theme);

    let rendered = if args.theme {
        if args.minify {
            serde_json::to_string(&theme)?
        } else {
            serde_json::to_string_pretty(&theme)?
        }
    } else if args.minify {
        report.to_compact_json()?
    } else {
        report.to_pretty_json()?
    };

    if let Some(output) = &args.output {
        files::check_output_path(output)?;
        if !args.dry_run {
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            write_atomic(output, &rendered).map_err(|e| ConfigError::OutputError {
                path: output.display().to_string(),
                message: e.to_string(),
            })?;
        }
    }

    if args.verbose {
        eprintln!("\nResolution complete:");
        eprintln!("  - {} content globs", report.counts.content_globs);
        eprintln!(
            "  - {} tokens extended across {} categories",
            report.counts.tokens_extended, report.counts.categories
        );
        eprintln!("  - {} tokens in the merged theme", report.counts.tokens_resolved);
        eprintln!("  - {} warnings", report.counts.warnings);
    }

    Ok(ResolveResult {
        descriptor,
        theme,
        report,
        rendered,
    })
}

/// List the files matched by the descriptor's content globs
pub fn list_files(args: FilesArgs) -> Result<Vec<MatchedFile>> {
    args.validate().map_err(ConfigError::InvalidInput)?;

    let descriptor = match &args.config {
        Some(path) => ConfigDescriptor::from_file(path)?,
        None => ConfigDescriptor::default(),
    };
    descriptor.ensure_valid()?;

    let mut security = SecurityConfig::default();
    security.allow_symlinks = args.allow_symlinks;
    if let Some(size) = args.max_file_size {
        security.max_file_size = size;
    }

    let matched = collect_content_files(&descriptor, &args.exclude, &security)?;

    if matched.is_empty() {
        return Err(ConfigError::NoFilesFound);
    }

    if args.verbose {
        let total_size: u64 = matched.iter().map(|f| f.size).sum();
        eprintln!("Found {} files to scan", matched.len());
        eprintln!("Total size: {:.2} MB", total_size as f64 / (1024.0 * 1024.0));
    }

    Ok(matched)
}

/// Read a JSON descriptor from `input`, lint it, and write the normalized
/// descriptor to `output`.
///
/// Normalization fills omitted fields with their defaults and re-renders
/// the descriptor, pretty or compact per the args.
pub async fn pipe_descriptor<R, W>(input: &mut R, output: &mut W, args: &PipeArgs) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let stdout_err = |e: std::io::Error| ConfigError::OutputError {
        path: "stdout".to_string(),
        message: e.to_string(),
    };

    let mut raw = String::new();
    input
        .read_to_string(&mut raw)
        .await
        .map_err(|e| ConfigError::InputError(format!("Failed to read from stdin: {}", e)))?;

    if raw.trim().is_empty() {
        return Err(ConfigError::InputError(
            "No descriptor on stdin".to_string(),
        ));
    }

    let descriptor = ConfigDescriptor::from_json_str(&raw)?;
    descriptor.ensure_valid()?;

    if args.strict {
        let warnings: Vec<String> = descriptor
            .validate()
            .into_iter()
            .filter(|f| f.severity == Severity::Warning)
            .map(|f| format!("{}: {}", f.field, f.message))
            .collect();
        if !warnings.is_empty() {
            return Err(ConfigError::ValidationFailed(warnings.join("; ")));
        }
    }

    let normalized = if args.minify {
        descriptor.to_compact_json()?
    } else {
        descriptor.to_pretty_json()?
    };

    output
        .write_all(normalized.as_bytes())
        .await
        .map_err(stdout_err)?;
    output.write_all(b"\n").await.map_err(stdout_err)?;
    output.flush().await.map_err(stdout_err)?;

    Ok(())
}

/// Handle pipe command - read a JSON descriptor from stdin, write the
/// normalized descriptor to stdout
pub async fn handle_pipe_command(args: PipeArgs) -> Result<()> {
    let mut stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    pipe_descriptor(&mut stdin, &mut stdout, &args).await
}

/// Stage the content next to the destination, then rename into place
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    use std::fs;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("output");
    let staged = path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&staged, content)?;
    // fsync before the rename; a crash must not publish a truncated file
    fs::File::open(&staged)?.sync_all()?;
    fs::rename(&staged, path)
}
