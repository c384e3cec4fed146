use std::fmt::Write;
use std::path::Path;

use crate::xref::ReportTable;

/// Row/column highlight for the hover grid.
const HOVER_SCRIPT: &str = r#"
document.querySelectorAll('table.hover-grid td').forEach(function (td) {
  function paint(color) {
    var row = td.parentElement;
    var col = Array.prototype.indexOf.call(row.children, td);
    Array.prototype.forEach.call(row.children, function (c) { c.style.backgroundColor = color; });
    document.querySelectorAll('table.hover-grid tr').forEach(function (tr) {
      if (tr.children[col]) { tr.children[col].style.backgroundColor = color; }
    });
  }
  td.addEventListener('mouseover', function () { paint('#EAD575'); });
  td.addEventListener('mouseleave', function () { paint(''); });
});
"#;

const STYLE: &str = r#"
body { font-family: sans-serif; font-size: 13px; }
table.hover-grid { border-collapse: collapse; }
table.hover-grid th, table.hover-grid td { border: 1px solid #ccc; padding: 2px 4px; vertical-align: top; }
table.hover-grid thead th { writing-mode: vertical-rl; transform: rotate(180deg); white-space: nowrap; }
table.hover-grid tbody th { text-align: left; white-space: nowrap; }
table.hover-grid span { display: block; }
"#;

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the report table as a standalone HTML page.
///
/// The header row repeats `report.headers` (leading blank column included).
/// Row `r` is labelled with `headers[r + 1]` and lists each cell's references
/// by `name`, with `fullname` as tooltip.
pub fn render_html(report: &ReportTable, project_name: &str, project_root: &Path) -> String {
    let mut out = String::new();
    let title = escape_html(&format!("Cross-reference: {project_name}"));

    writeln!(out, "<!DOCTYPE html>").unwrap();
    writeln!(out, "<html>").unwrap();
    writeln!(out, "<head>").unwrap();
    writeln!(out, "<meta charset=\"utf-8\">").unwrap();
    writeln!(out, "<title>{title}</title>").unwrap();
    writeln!(out, "<style>{STYLE}</style>").unwrap();
    writeln!(out, "</head>").unwrap();
    writeln!(out, "<body>").unwrap();
    writeln!(out, "<h1>{title}</h1>").unwrap();
    writeln!(
        out,
        "<p>Project root: <code>{}</code></p>",
        escape_html(&project_root.display().to_string())
    )
    .unwrap();

    writeln!(out, "<table class=\"hover-grid\">").unwrap();
    writeln!(out, "<thead><tr><th></th>").unwrap();
    for header in &report.headers {
        writeln!(out, "<th>{}</th>", escape_html(header)).unwrap();
    }
    writeln!(out, "</tr></thead>").unwrap();

    writeln!(out, "<tbody>").unwrap();
    for (row_idx, row) in report.table.iter().enumerate() {
        let label = report
            .headers
            .get(row_idx + 1)
            .map(String::as_str)
            .unwrap_or("");
        writeln!(out, "<tr><th>{}</th>", escape_html(label)).unwrap();
        for cell in row {
            out.push_str("<td>");
            for reference in cell {
                write!(
                    out,
                    "<span title=\"{}\">{}</span>",
                    escape_html(&reference.fullname),
                    escape_html(&reference.name)
                )
                .unwrap();
            }
            out.push_str("</td>\n");
        }
        writeln!(out, "</tr>").unwrap();
    }
    writeln!(out, "</tbody>").unwrap();
    writeln!(out, "</table>").unwrap();

    writeln!(out, "<script>{HOVER_SCRIPT}</script>").unwrap();
    writeln!(out, "</body>").unwrap();
    writeln!(out, "</html>").unwrap();

    out
}
