//! Load-time diagnostics emitted for catalog maintainers.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use dyh_catalog::RuleCatalog;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn warnings_while<T>(load: impl FnOnce() -> T) -> String {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_max_level(Level::WARN)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, load);
    captured.text()
}

#[test]
fn overlapping_catalog_warns_at_load() {
    let output = warnings_while(|| RuleCatalog::builtin().unwrap());
    assert!(output.contains("WARN"), "{output}");
    assert!(output.contains("overlaps=47"), "{output}");
    assert!(!output.contains("loaded strategy catalog"), "{output}");
}

#[test]
fn catalog_without_overlaps_loads_quietly() {
    let output = warnings_while(|| {
        RuleCatalog::from_toml_str(
            r#"
questions = [{ id = "ss_q26", kind = "boolean", critical = true }]

[catalog]
schema = "dyh.strategy-catalog"
schema_version = 1
version = "quiet"

[[strategies]]
id = "A"
name = "Lease"
priority = 1
requires_no = ["ss_q26"]
"#,
        )
        .unwrap()
    });
    assert!(output.is_empty(), "{output}");
}
