use crate::config::ConfigDescriptor;
use crate::errors::{ConfigError, Result};
use glob::Pattern;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Security constraints applied while enumerating content files
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Maximum file size in bytes (default: 10MB)
    pub max_file_size: u64,
    /// Allow symbolic links
    pub allow_symlinks: bool,
    /// Working directory symlink targets must stay inside
    pub working_directory: PathBuf,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10MB
            allow_symlinks: false,
            working_directory: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

/// A file admitted by the content walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Enumerate the files named by a descriptor's content globs.
///
/// Expansion only, the consuming tool's step two: nothing here reads file
/// contents. Content globs are syntax-checked up front so a bad pattern
/// fails the walk instead of silently matching nothing, and exclude
/// patterns are compiled once rather than per candidate path.
pub fn collect_content_files(
    descriptor: &ConfigDescriptor,
    exclude_patterns: &[String],
    security: &SecurityConfig,
) -> Result<Vec<MatchedFile>> {
    for pattern in descriptor.content_globs() {
        Pattern::new(pattern)?;
    }
    let excludes = compile_patterns(exclude_patterns)?;

    let mut matched = Vec::new();
    let mut seen = std::collections::HashSet::new();
    let mut rejected = 0usize;

    for pattern in descriptor.content_globs() {
        for entry in glob::glob(pattern)? {
            let path = entry?;

            if excludes.iter().any(|p| p.matches_path(&path)) {
                continue;
            }
            if !seen.insert(path.clone()) {
                continue;
            }

            match admit(&path, security) {
                Ok(Some(size)) => matched.push(MatchedFile { path, size }),
                Ok(None) => {}
                Err(reason) => {
                    eprintln!("Warning: skipping {}: {}", path.display(), reason);
                    rejected += 1;
                }
            }
        }
    }

    if rejected > 0 {
        eprintln!("{} matched files rejected by security constraints", rejected);
    }

    Ok(matched)
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).map_err(ConfigError::Pattern))
        .collect()
}

/// Decide whether a matched path enters the candidate set.
///
/// `Ok(None)` skips silently (directories); `Err` carries the reason a
/// file was rejected, which the walk reports as a warning.
fn admit(path: &Path, security: &SecurityConfig) -> std::result::Result<Option<u64>, String> {
    let meta = fs::symlink_metadata(path).map_err(|e| format!("cannot stat: {}", e))?;

    let size = if meta.is_symlink() {
        if !security.allow_symlinks {
            return Err("symbolic links are not allowed".to_string());
        }
        let target = path
            .canonicalize()
            .map_err(|e| format!("broken symlink: {}", e))?;
        if !target.starts_with(workdir_root(security)) {
            return Err(format!(
                "symlink target '{}' is outside the working directory",
                target.display()
            ));
        }
        let followed = fs::metadata(path).map_err(|e| format!("cannot stat: {}", e))?;
        if followed.is_dir() {
            return Ok(None);
        }
        followed.len()
    } else if meta.is_dir() {
        return Ok(None);
    } else {
        meta.len()
    };

    if size > security.max_file_size {
        return Err(format!(
            "{} bytes exceeds the {} byte limit",
            size, security.max_file_size
        ));
    }

    Ok(Some(size))
}

fn workdir_root(security: &SecurityConfig) -> PathBuf {
    security
        .working_directory
        .canonicalize()
        .unwrap_or_else(|_| security.working_directory.clone())
}

/// Reject relative output paths that climb out of the working directory.
///
/// The destination usually does not exist yet, so this checks the path's
/// components instead of canonicalizing it.
pub fn check_output_path(path: &Path) -> Result<()> {
    if path.is_relative() && path.components().any(|c| c == Component::ParentDir) {
        return Err(ConfigError::SecurityError(format!(
            "Output path '{}' escapes the working directory",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn descriptor_for(globs: Vec<String>) -> ConfigDescriptor {
        ConfigDescriptor {
            content: globs,
            ..ConfigDescriptor::default()
        }
    }

    fn security_in(dir: &Path) -> SecurityConfig {
        SecurityConfig {
            working_directory: dir.to_path_buf(),
            ..SecurityConfig::default()
        }
    }

    #[test]
    fn test_collect_matches_and_deduplicates() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("b.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("c.txt"), "not rust").unwrap();

        // Overlapping globs must not produce duplicate entries
        let descriptor = descriptor_for(vec![
            format!("{}/*.rs", dir.path().display()),
            format!("{}/a.rs", dir.path().display()),
        ]);

        let files =
            collect_content_files(&descriptor, &[], &security_in(dir.path())).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_exclude_patterns() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("keep.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("skip.rs"), "fn main() {}").unwrap();

        let descriptor = descriptor_for(vec![format!("{}/*.rs", dir.path().display())]);
        let exclude = vec!["**/skip.rs".to_string()];

        let files =
            collect_content_files(&descriptor, &exclude, &security_in(dir.path())).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("keep.rs"));
    }

    #[test]
    fn test_oversized_file_is_skipped() {
        let dir = tempdir().unwrap();
        let mut big = fs::File::create(dir.path().join("big.rs")).unwrap();
        big.write_all(&vec![b' '; 2048]).unwrap();
        fs::write(dir.path().join("small.rs"), "fn main() {}").unwrap();

        let descriptor = descriptor_for(vec![format!("{}/*.rs", dir.path().display())]);
        let security = SecurityConfig {
            max_file_size: 1024,
            ..security_in(dir.path())
        };

        let files = collect_content_files(&descriptor, &[], &security).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("small.rs"));
        assert_eq!(files[0].size, 12);
    }

    #[test]
    fn test_invalid_content_glob_fails_before_walking() {
        let descriptor = descriptor_for(vec!["[invalid".to_string()]);

        let result = collect_content_files(&descriptor, &[], &SecurityConfig::default());
        assert!(matches!(result, Err(ConfigError::Pattern(_))));
    }

    #[test]
    fn test_invalid_exclude_pattern_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), "fn main() {}").unwrap();

        let descriptor = descriptor_for(vec![format!("{}/*.rs", dir.path().display())]);
        let exclude = vec!["[invalid".to_string()];

        let result = collect_content_files(&descriptor, &exclude, &SecurityConfig::default());
        assert!(matches!(result, Err(ConfigError::Pattern(_))));
    }

    #[test]
    fn test_output_path_traversal_is_rejected() {
        assert!(check_output_path(Path::new("../outside/report.json")).is_err());
        assert!(check_output_path(Path::new("dist/../../report.json")).is_err());
        assert!(check_output_path(Path::new("dist/report.json")).is_ok());
        assert!(check_output_path(Path::new("/tmp/report.json")).is_ok());
    }
}
