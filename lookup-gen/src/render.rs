//! Program Rendering
//!
//! Runs the generation pipeline and writes the result to disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::ident::declaration_block;
use crate::template::Template;
use crate::{Config, GenError, GenResult};

/// Summary of a completed generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Where the program was written.
    pub path: PathBuf,
    /// Number of declared identifiers.
    pub identifiers: usize,
    /// Size of the written program in bytes.
    pub bytes: usize,
}

/// Renders the full program text for a configuration.
pub fn render_program(config: &Config) -> GenResult<String> {
    render_with_template(config, Template::lox())
}

/// Renders a configuration through a custom template.
pub fn render_with_template(config: &Config, template: Template) -> GenResult<String> {
    config.validate()?;
    let template = if config.print_val {
        template.with_print_val()?
    } else {
        template
    };
    template.check()?;

    let declarations = declaration_block(config)?;
    template.render(&declarations, config.count)
}

/// Writes `program` to `path`, replacing any existing file.
///
/// The text goes to a temporary file in the destination directory which is
/// then renamed over `path`, so a failed write never leaves a truncated
/// program behind. An existing file keeps its permissions; a new one gets
/// the same mode a plain create would (0o666 less the umask).
pub fn write_program(path: &Path, program: &str) -> GenResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(GenError::io(path, e)),
    };

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // the mode passed at creation is masked by the umask
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(|e| GenError::io(dir, e))?;
    debug!("Staging output in {}", tmp.path().display());

    tmp.write_all(program.as_bytes())
        .and_then(|()| tmp.flush())
        .map_err(|e| GenError::io(tmp.path(), e))?;
    if let Some(permissions) = existing {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| GenError::io(tmp.path(), e))?;
    }
    tmp.persist(path).map_err(|e| GenError::io(path, e.error))?;
    Ok(())
}

/// Renders the program for `config` and writes it to `config.output`.
pub fn generate(config: &Config) -> GenResult<GenerateReport> {
    let program = render_program(config)?;
    write_program(&config.output, &program)?;

    let report = GenerateReport {
        path: config.output.clone(),
        identifiers: config.identifier_count()?,
        bytes: program.len(),
    };
    info!(
        "Wrote {} ({} identifiers, cnt = {}, {} bytes)",
        report.path.display(),
        report.identifiers,
        config.count,
        report.bytes
    );
    Ok(report)
}
