use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::models::Semester;

pub fn parse_semester(raw: &str) -> anyhow::Result<Semester> {
    let semester: Semester =
        serde_json::from_str(raw).context("input is not a semester JSON document")?;
    debug!(
        title = ?semester.title,
        sections = semester.sections.len(),
        classes = semester.sections.iter().map(|s| s.classes.len()).sum::<usize>(),
        "parsed semester"
    );
    Ok(semester)
}

pub fn load_semester(path: &Path) -> anyhow::Result<Semester> {
    let raw = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read semester from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    parse_semester(&raw)
}
