// Tests for report and type-list formatting
//
// These cover the human layout, the machine formats and secret masking.

use super::*;
use proptransform_core::TransformMode;
use std::sync::{Arc, Mutex};

/// Writer that keeps everything written to it for inspection
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn write(key: &str, value: &str, applied: bool) -> PropertyWrite {
    PropertyWrite {
        key: key.to_string(),
        value: value.to_string(),
        applied,
    }
}

fn sample_report() -> ApplyReport {
    ApplyReport {
        outcome: TransformOutcome {
            strategy: "lower".to_string(),
            mode: TransformMode::Bulk,
            writes: vec![
                write("pre.name", "demo", true),
                write("pre.db.password", "hunter2", true),
                write("pre.kept", "new", false),
            ],
        },
        properties: None,
    }
}

#[test]
fn test_report_human_plain() {
    let text = OutputFormat::Human
        .format_report(&sample_report(), false)
        .unwrap();

    assert!(text.starts_with("Transformation: lower (bulk)"));
    assert!(text.contains("  pre.name = demo\n"));
    assert!(text.contains("  pre.kept = new (ignored: already set)"));
    assert!(text.ends_with("Applied 2, ignored 1"));
}

#[test]
fn test_report_human_without_writes() {
    let report = ApplyReport {
        outcome: TransformOutcome {
            strategy: "identity".to_string(),
            mode: TransformMode::Bulk,
            writes: Vec::new(),
        },
        properties: None,
    };
    let text = OutputFormat::Human.format_report(&report, false).unwrap();
    assert!(text.contains("(no properties written)"));
    assert!(text.ends_with("Applied 0, ignored 0"));
}

#[test]
fn test_report_json_is_flat() {
    let text = OutputFormat::Json
        .format_report(&sample_report(), false)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["strategy"], "lower");
    assert_eq!(value["mode"], "bulk");
    assert_eq!(value["writes"][2]["applied"], false);
    assert!(value.get("properties").is_none());
}

#[test]
fn test_report_yaml_includes_properties() {
    let mut report = sample_report();
    report.properties = Some(BTreeMap::from([("pre.name".to_string(), "demo".to_string())]));
    let text = OutputFormat::Yaml.format_report(&report, false).unwrap();

    assert!(text.contains("strategy: lower"));
    assert!(text.contains("pre.name: demo"));
}

#[test]
fn test_masked_report() {
    let mut report = sample_report();
    report.properties = Some(BTreeMap::from([(
        "api.token".to_string(),
        "abc123".to_string(),
    )]));
    let masked = report.masked();

    assert_eq!(masked.outcome.writes[0].value, "demo");
    assert_eq!(masked.outcome.writes[1].value, redaction::MASK);
    assert_eq!(
        masked.properties.unwrap().get("api.token").map(String::as_str),
        Some(redaction::MASK)
    );
}

#[test]
fn test_writer_masks_unless_secrets_shown() {
    let buffer = SharedBuffer::default();
    let mut writer =
        OutputWriter::with_writer(OutputFormat::Human, false, false, Box::new(buffer.clone()));
    writer.report(&sample_report(), false).unwrap();
    assert!(!buffer.contents().contains("hunter2"));

    let buffer = SharedBuffer::default();
    let mut writer =
        OutputWriter::with_writer(OutputFormat::Human, false, false, Box::new(buffer.clone()));
    writer.report(&sample_report(), true).unwrap();
    assert!(buffer.contents().contains("hunter2"));
}

#[test]
fn test_types_output() {
    let types = vec!["identity".to_string(), "lower".to_string(), "upper".to_string()];
    assert_eq!(
        OutputFormat::Human.format_types(&types).unwrap(),
        "identity\nlower\nupper"
    );
    assert_eq!(
        OutputFormat::Json.format_types(&types).unwrap(),
        r#"["identity","lower","upper"]"#
    );
}

#[test]
fn test_success_is_silent_when_quiet_or_machine() {
    let buffer = SharedBuffer::default();
    let mut writer =
        OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(buffer.clone()));
    writer.success("done").unwrap();

    let mut json_writer =
        OutputWriter::with_writer(OutputFormat::Json, false, false, Box::new(buffer.clone()));
    json_writer.success("done").unwrap();

    assert!(buffer.contents().is_empty());
}
