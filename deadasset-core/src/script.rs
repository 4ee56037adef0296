//! Removal script generation.
//!
//! Each unused file becomes one shell command: `git rm -f` when git tracks
//! the file, plain `rm` otherwise. Paths are single-quoted, with embedded
//! single quotes written as `'"'"'`.
//!
//! The script is only written, never executed.

use std::collections::BTreeSet;
use std::fmt;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

use crate::error::{DeadassetError, DeadassetResult};

/// Default script file name, written to the current directory.
pub const DEFAULT_SCRIPT_NAME: &str = "remove_unused_files.sh";

/// Quote `s` as a single shell word.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r#"'"'"'"#))
}

/// One removal command for one unused file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalCommand {
    pub path: String,
    /// Whether git tracks the file
    pub tracked: bool,
}

impl fmt::Display for RemovalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tracked {
            write!(f, "git rm -f {}", shell_quote(&self.path))
        } else {
            write!(f, "rm {}", shell_quote(&self.path))
        }
    }
}

/// Build removal commands for `unused`, sorted by path.
pub fn build_commands<S: AsRef<str>>(unused: &[S], tracked: &BTreeSet<String>) -> Vec<RemovalCommand> {
    let mut paths: Vec<&str> = unused.iter().map(AsRef::as_ref).collect();
    paths.sort_unstable();
    paths.dedup();

    paths
        .into_iter()
        .map(|path| RemovalCommand {
            path: path.to_string(),
            tracked: tracked.contains(path),
        })
        .collect()
}

/// Render the full script text.
///
/// The script changes into `root` before running any command, since every
/// command path is root-relative. `generated_at` adds a provenance line to
/// the header; the rest depends only on `root` and `commands`.
pub fn render_script(
    root: &Path,
    commands: &[RemovalCommand],
    generated_at: Option<DateTime<Utc>>,
) -> String {
    let mut script = String::with_capacity(256 + commands.len() * 64);

    // Writing to a String cannot fail.
    let _ = write_script_content(&mut script, root, commands, generated_at);

    script
}

fn write_script_content(
    out: &mut String,
    root: &Path,
    commands: &[RemovalCommand],
    generated_at: Option<DateTime<Utc>>,
) -> fmt::Result {
    writeln!(out, "#!/bin/bash")?;
    writeln!(out, "# Script to remove unused files")?;
    writeln!(out, "# WARNING: review before running!")?;
    if let Some(ts) = generated_at {
        writeln!(
            out,
            "# Generated by deadasset at {}",
            ts.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
    }
    writeln!(out)?;
    writeln!(out, "cd {} || exit 1", shell_quote(&root.to_string_lossy()))?;
    writeln!(out)?;
    writeln!(out, "echo 'Removing {} unused files...'", commands.len())?;
    writeln!(out)?;
    for cmd in commands {
        writeln!(out, "{}", cmd)?;
    }
    writeln!(out)?;
    writeln!(out, "echo 'Removal complete!'")?;
    Ok(())
}

/// Write `contents` to `path` and make it executable on Unix.
pub fn write_script(path: &Path, contents: &str) -> DeadassetResult<()> {
    fs::write(path, contents).map_err(|e| DeadassetError::script(path, e.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .map_err(|e| DeadassetError::script(path, e.to_string()))?;
    }

    info!(path = %path.display(), bytes = contents.len(), "removal script written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_shell_quote_plain() {
        assert_eq!(shell_quote("public/css/app.css"), "'public/css/app.css'");
    }

    #[test]
    fn test_shell_quote_embedded_quote() {
        assert_eq!(
            shell_quote("public/images/it's.png"),
            r#"'public/images/it'"'"'s.png'"#
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_quote_roundtrips_through_sh() {
        for original in [
            "public/images/it's.png",
            "public/a b/$HOME.css",
            "public/''/x`y`.js",
            "public/back\\slash.txt",
        ] {
            let output = std::process::Command::new("/bin/sh")
                .arg("-c")
                .arg(format!("printf %s {}", shell_quote(original)))
                .output()
                .unwrap();
            assert!(output.status.success());
            assert_eq!(String::from_utf8_lossy(&output.stdout), original);
        }
    }

    #[test]
    fn test_build_commands_tracked_vs_untracked() {
        let tracked: BTreeSet<String> = ["public/css/old.css".to_string()].into_iter().collect();
        let cmds = build_commands(&["public/js/x.js", "public/css/old.css"], &tracked);

        let lines: Vec<String> = cmds.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "git rm -f 'public/css/old.css'".to_string(),
                "rm 'public/js/x.js'".to_string(),
            ]
        );
    }

    #[test]
    fn test_build_commands_empty_tracked_set() {
        let cmds = build_commands(&["a.css"], &BTreeSet::new());
        assert_eq!(cmds[0].to_string(), "rm 'a.css'");
    }

    #[test]
    fn test_render_script_layout() {
        let cmds = vec![RemovalCommand {
            path: "public/a.css".into(),
            tracked: false,
        }];
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let script = render_script(Path::new("/srv/shop"), &cmds, Some(ts));

        assert!(script.starts_with("#!/bin/bash\n"));
        assert!(script.contains("\ncd '/srv/shop' || exit 1\n"));
        assert!(script.contains("# Generated by deadasset at 2026-01-02T03:04:05Z\n"));
        assert!(script.contains("echo 'Removing 1 unused files...'\n"));
        assert!(script.contains("\nrm 'public/a.css'\n"));
        assert!(script.ends_with("echo 'Removal complete!'\n"));
    }

    #[test]
    fn test_render_script_without_timestamp_is_stable() {
        let cmds = build_commands(&["b.js", "a.js"], &BTreeSet::new());
        let root = Path::new("/srv/shop");
        assert_eq!(render_script(root, &cmds, None), render_script(root, &cmds, None));
        assert!(!render_script(root, &cmds, None).contains("Generated by"));
    }

    #[test]
    fn test_render_script_changes_into_quoted_root() {
        let cmds = build_commands(&["public/a.css"], &BTreeSet::new());
        let script = render_script(Path::new("/home/o'brien/app"), &cmds, None);

        let cd_line = r#"cd '/home/o'"'"'brien/app' || exit 1"#;
        let cd_at = script.find(cd_line).unwrap();
        let rm_at = script.find("rm 'public/a.css'").unwrap();
        assert!(cd_at < rm_at);
    }

    #[test]
    fn test_write_script() {
        let path = std::env::temp_dir().join(format!(
            "deadasset_script_test_{}.sh",
            std::process::id()
        ));
        write_script(&path, "#!/bin/bash\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "#!/bin/bash\n");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111);
        }

        fs::remove_file(&path).ok();
    }
}
