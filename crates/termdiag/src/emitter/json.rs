//! Machine-readable JSON rendering, `feature = "json"` (spec.md §9 "open
//! question": a line-delimited JSON emitter for editor/LSP integrations is
//! implied ambient-stack territory, not distilled into the core spec).
//!
//! Grounded on `examples/original_source/include/diagnostics/emitter.hpp`'s
//! structured dump shape (level, message, primary location, children),
//! reimplemented with `serde`/`serde_json` rather than hand-rolled string
//! building, matching the teacher's `Cargo.toml` pulling in `serde` under a
//! `# json`-style feature for exactly this kind of optional surface.

use serde::Serialize;

use crate::diagnostic::Diag;
use crate::message::MessageBody;

use super::Emitter;

#[derive(Serialize)]
struct JsonSpan<'a> {
    filename: &'a str,
    line: usize,
    column: usize,
}

#[derive(Serialize)]
struct JsonChild<'a> {
    level: &'a str,
    message: String,
}

#[derive(Serialize)]
struct JsonDiag<'a> {
    level: &'a str,
    code: Option<&'a str>,
    message: &'a str,
    span: Option<JsonSpan<'a>>,
    children: Vec<JsonChild<'a>>,
}

/// Emits one JSON object per diagnostic, newline-terminated (line-delimited
/// JSON, so a stream of diagnostics is trivially splittable by consumers).
#[derive(Default)]
pub struct JsonEmitter;

impl JsonEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl Emitter for JsonEmitter {
    fn emit_diagnostic(&mut self, diag: &Diag) -> String {
        let span = if diag.location.has_filename() && diag.location.has_valid_line() {
            Some(JsonSpan {
                filename: diag.location.filename(),
                line: diag.location.line_number(),
                column: diag.location.column_number(),
            })
        } else {
            None
        };

        let children = diag
            .sub_diagnostics
            .iter()
            .flat_map(|sub| {
                sub.messages.iter().map(move |m| JsonChild {
                    level: sub.level.to_str(),
                    message: plain_text_of(m),
                })
            })
            .collect();

        let value = JsonDiag {
            level: diag.level.to_str(),
            code: diag.code.map(|c| c.as_str()),
            message: &diag.message,
            span,
            children,
        };

        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

fn plain_text_of(body: &MessageBody) -> String {
    body.plain_text().into_owned()
}
