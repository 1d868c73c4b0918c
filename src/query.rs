//! Query records and the primusquery file format.
//!
//! A [`PrimusQuery`] describes one request to the external executable. The
//! serializer renders it into the line-oriented text grammar the executable
//! expects. Field order is a wire-format contract and must not change.
//!
//! No escaping is performed: embedded newlines or `#`-prefixed lines in the
//! header, data, or footer fields pass through verbatim. The executable's
//! grammar has no escape mechanism, so callers own payload hygiene.

/// One request to the primusquery executable.
///
/// Plain value type; constructed fresh per call and treated as immutable
/// once rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimusQuery {
    pub charset: String,
    pub host: String,
    pub port: String,
    pub user: String,
    pub pass: String,
    /// Output path directive. Cleared before ad-hoc execution, where the
    /// result is read from stdout instead.
    pub output: String,
    pub database: String,
    pub search: String,
    /// Optional header block; omitted from the rendering when empty.
    pub header: String,
    /// Raw data payload, passed through verbatim.
    pub data: String,
    /// Optional footer block; omitted from the rendering when empty.
    pub footer: String,
}

/// Fixed sort directive required by the executable's grammar.
const SORT_DIRECTIVE: &str = "V1";

impl PrimusQuery {
    /// Renders the query into the executable's line-oriented text format.
    ///
    /// Deterministic: the same record always yields the same byte sequence.
    pub fn render(&self) -> String {
        let mut doc = String::new();
        doc.push_str(&format!("#CHARSET {}\n", self.charset));
        doc.push_str(&format!("#HOST {}\n", self.host));
        doc.push_str(&format!("#PORT {}\n", self.port));
        doc.push_str(&format!("#USER {}\n", self.user));
        doc.push_str(&format!("#PASS {}\n", self.pass));
        doc.push_str(&format!("#OUTPUT {}\n", self.output));
        doc.push_str(&format!("#DATABASE {}\n", self.database));
        doc.push_str(&format!("#SEARCH {}\n", self.search));
        doc.push_str(&format!("#SORT {}\n", SORT_DIRECTIVE));
        if !self.header.is_empty() {
            doc.push_str(&format!("#HEADER_START\n{}\n#HEADER_STOP\n", self.header));
        }
        doc.push_str(&self.data);
        doc.push('\n');
        if !self.footer.is_empty() {
            doc.push_str(&format!("#FOOTER_START\n{}\n#FOOTER_STOP\n", self.footer));
        }
        doc
    }
}
