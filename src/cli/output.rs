/// Output formatting: aligned text report, table, JSON modes, and errors.
use std::fmt::Write as _;
use std::io::Write;

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};

use super::args::OutputFormat;
use crate::tags::{Tag, TagError};
use crate::types::ErrorOutput;

/// Left-hand labels of the aligned part of a text record block.
const INFO_LABELS: [&str; 4] = ["Name:", "  ID:", "  Description:", "  CategoryID:"];

/// Spaces between the widest label and its value.
const INFO_PADDING: usize = 2;

/// Resolve the effective output format, handling the `--json` flag.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        return OutputFormat::Json;
    }
    match fmt {
        OutputFormat::Auto => OutputFormat::Text,
        other => other,
    }
}

/// Output context passed to all formatters.
pub struct OutputCtx {
    pub format: OutputFormat,
    pub no_header: bool,
    /// When true, print phase timings to stderr.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool, no_header: bool, debug: bool) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
            no_header,
            debug,
        }
    }

    /// Start a named debug timer. Prints elapsed on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }

    /// Whether the selected format is one of the JSON variants.
    #[must_use]
    pub fn is_json(&self) -> bool {
        matches!(
            self.format,
            OutputFormat::Json | OutputFormat::Compact | OutputFormat::Ndjson
        )
    }
}

// --- Tags ---

/// Write tags to `out` in the selected format and flush it.
///
/// # Errors
///
/// Returns `TagError::Output` if writing or flushing fails, and
/// `TagError::Serialize` if JSON encoding fails.
pub fn write_tags<W: Write>(tags: &[Tag], ctx: &OutputCtx, out: &mut W) -> Result<(), TagError> {
    match ctx.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, tags)?;
            writeln!(out)?;
        }
        OutputFormat::Compact => {
            serde_json::to_writer(&mut *out, tags)?;
            writeln!(out)?;
        }
        OutputFormat::Ndjson => {
            for tag in tags {
                serde_json::to_writer(&mut *out, tag)?;
                writeln!(out)?;
            }
        }
        OutputFormat::Id => {
            for tag in tags {
                writeln!(out, "{}", tag.id)?;
            }
        }
        OutputFormat::Table => {
            if !tags.is_empty() {
                writeln!(out, "{}", tags_table(tags, ctx.no_header))?;
            }
        }
        OutputFormat::Text | OutputFormat::Auto => out.write_all(render_info(tags).as_bytes())?,
    }
    out.flush()?;
    Ok(())
}

/// Render tags as aligned record blocks, one per tag, in the given order.
///
/// ```text
/// Name:           env
///   ID:           urn:tag:1
///   Description:
///   CategoryID:   cat-1
///   UsedBy: []
/// ```
///
/// The label column is as wide as the widest label plus two spaces. An empty
/// slice renders as an empty string.
#[must_use]
pub fn render_info(tags: &[Tag]) -> String {
    let width = INFO_LABELS.iter().map(|l| l.len()).max().unwrap_or(0) + INFO_PADDING;
    let mut out = String::new();
    for tag in tags {
        let values = [
            tag.name.as_str(),
            tag.id.as_str(),
            tag.description.as_str(),
            tag.category_id.as_str(),
        ];
        for (label, value) in INFO_LABELS.iter().zip(values) {
            let _ = writeln!(out, "{label:<width$}{value}");
        }
        let _ = writeln!(out, "  UsedBy: {}", tag.used_by_display());
    }
    out
}

fn tags_table(tags: &[Tag], no_header: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !no_header {
        table.set_header(["NAME", "ID", "DESCRIPTION", "CATEGORY ID", "USED BY"]);
    }
    for tag in tags {
        table.add_row([
            tag.name.as_str(),
            tag.id.as_str(),
            tag.description.as_str(),
            tag.category_id.as_str(),
            &tag.used_by.join(", "),
        ]);
    }
    table
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, ctx: &OutputCtx) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    if ctx.is_json() {
        let s = serde_json::to_string_pretty(err).unwrap_or_default();
        let _ = writeln!(out, "{s}");
    } else {
        let _ = writeln!(out, "Error: {}", err.error.message);
        if let Some(usage) = &err.error.usage {
            let _ = writeln!(out, "\n{usage}");
        }
    }
}

// --- Debug timer ---

/// A RAII timer that prints elapsed milliseconds to stderr on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            eprintln!("[debug] {}: {ms:.2}ms", self.label);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::tags::lookup::tests::tag;

    fn ctx(format: OutputFormat) -> OutputCtx {
        OutputCtx::new(format, false, false, false)
    }

    fn render_to_string(tags: &[Tag], format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_tags(tags, &ctx(format), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    /// A sink that accepts writes but fails to flush.
    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }
    }

    #[test]
    fn test_render_single_tag() {
        let out = render_info(&[tag("urn:tag:1", "env", "cat-1")]);
        let expected = concat!(
            "Name:           env\n",
            "  ID:           urn:tag:1\n",
            "  Description:  \n",
            "  CategoryID:   cat-1\n",
            "  UsedBy: []\n",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_render_label_order() {
        let out = render_info(&[tag("urn:tag:1", "env", "cat-1")]);
        let labels: Vec<&str> = out
            .lines()
            .map(|l| l.split_whitespace().next().unwrap_or(""))
            .collect();
        assert_eq!(
            labels,
            ["Name:", "ID:", "Description:", "CategoryID:", "UsedBy:"]
        );
    }

    #[test]
    fn test_render_used_by_and_description() {
        let mut t = tag("urn:tag:3", "tier", "cat-2");
        t.description = "Service tier".to_owned();
        t.used_by = vec!["vm-42".to_owned(), "host-7".to_owned()];
        let out = render_info(&[t]);
        assert!(out.contains("  Description:  Service tier\n"));
        assert!(out.ends_with("  UsedBy: [vm-42 host-7]\n"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_info(&[]), "");
        assert_eq!(render_to_string(&[], OutputFormat::Text), "");
    }

    #[test]
    fn test_render_duplicates_in_order() {
        let tags = [
            tag("urn:tag:2", "env", "cat-1"),
            tag("urn:tag:1", "env", "cat-1"),
        ];
        let out = render_info(&tags);
        assert_eq!(out.lines().count(), 10);
        let ids: Vec<&str> = out
            .lines()
            .filter(|l| l.starts_with("  ID:"))
            .map(|l| l.trim_start_matches("  ID:").trim())
            .collect();
        assert_eq!(ids, ["urn:tag:2", "urn:tag:1"]);
    }

    #[test]
    fn test_auto_is_text() {
        let tags = [tag("urn:tag:1", "env", "cat-1")];
        assert_eq!(
            render_to_string(&tags, OutputFormat::Auto),
            render_info(&tags)
        );
    }

    #[test]
    fn test_json_flag_wins() {
        assert_eq!(resolve_format(OutputFormat::Auto, true), OutputFormat::Json);
        assert_eq!(resolve_format(OutputFormat::Table, false), OutputFormat::Table);
    }

    #[test]
    fn test_json_output_is_raw_sequence() {
        let tags = [tag("urn:tag:1", "env", "cat-1")];
        let out = render_to_string(&tags, OutputFormat::Compact);
        let parsed: Vec<Tag> = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(parsed, tags);
        assert!(out.contains(r#""category_id":"cat-1""#));
    }

    #[test]
    fn test_empty_json_is_empty_array() {
        assert_eq!(render_to_string(&[], OutputFormat::Compact), "[]\n");
    }

    #[test]
    fn test_ndjson_one_line_per_tag() {
        let tags = [
            tag("urn:tag:1", "env", "cat-1"),
            tag("urn:tag:2", "env", "cat-1"),
        ];
        let out = render_to_string(&tags, OutputFormat::Ndjson);
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_id_output() {
        let tags = [
            tag("urn:tag:1", "env", "cat-1"),
            tag("urn:tag:2", "env", "cat-1"),
        ];
        assert_eq!(
            render_to_string(&tags, OutputFormat::Id),
            "urn:tag:1\nurn:tag:2\n"
        );
    }

    #[test]
    fn test_table_output() {
        let tags = [tag("urn:tag:1", "env", "cat-1")];
        let out = render_to_string(&tags, OutputFormat::Table);
        assert!(out.contains("CATEGORY ID"));
        assert!(out.contains("urn:tag:1"));
        assert_eq!(render_to_string(&[], OutputFormat::Table), "");
    }

    #[test]
    fn test_flush_failure_surfaces() {
        let tags = [tag("urn:tag:1", "env", "cat-1")];
        let result = write_tags(&tags, &ctx(OutputFormat::Text), &mut BrokenSink);
        assert!(matches!(result, Err(TagError::Output(_))));
    }
}
