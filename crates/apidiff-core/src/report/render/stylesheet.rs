/// Stylesheet written to [`crate::addressing::STYLESHEET_PATH`]
pub const STYLESHEET: &str = r#"body {
    font-family: system-ui, sans-serif;
    margin: 0 2em 2em 2em;
    color: #222;
}

nav.breadcrumb {
    padding: 0.5em 0;
    border-bottom: 1px solid #ccc;
    margin-bottom: 1em;
}

h1 .glyph, li .glyph, h3 .glyph {
    display: inline-block;
    width: 1.2em;
    text-align: center;
}

.glyph.same { color: #2a7a2a; }
.glyph.different { color: #b06000; }
.glyph.partial { color: #7a5aa0; }
.glyph.added { color: #1060c0; }
.glyph.removed { color: #c02020; }

.signature, .value, .text-diff, .alternatives {
    font-family: ui-monospace, monospace;
}

ul.children, ul.legend, ul.type-parameters {
    list-style: none;
    padding-left: 0.5em;
}

table.apis td, table.apis th,
table.summary-table td, table.summary-table th,
table.notes-index td, table.notes-index th {
    padding: 0.2em 0.6em;
    border: 1px solid #ddd;
}

table.summary-table {
    border-collapse: collapse;
}

table.summary-table td.added, table.summary-table td.changed,
table.summary-table td.removed, table.summary-table td.total {
    text-align: right;
}

section.member {
    border-top: 1px solid #eee;
    margin-top: 1em;
}

.comparison {
    display: flex;
    gap: 1em;
}

.diff-column {
    flex: 1;
    overflow-x: auto;
}

.diff-column .caption {
    font-weight: bold;
    padding-bottom: 0.3em;
}

.text-diff pre, .diff-column pre {
    margin: 0;
    white-space: pre-wrap;
}

.line-number {
    color: #999;
    user-select: none;
}

.separator {
    color: #999;
}

span.added, ins.added {
    background: #d8f0d8;
    text-decoration: none;
}

span.removed, del.removed {
    background: #f6d4d4;
    text-decoration: line-through;
}

span.changed {
    background: #f8ecc4;
    position: relative;
}

span.padding {
    background: repeating-linear-gradient(45deg, #f4f4f4, #f4f4f4 4px, #fff 4px, #fff 8px);
}

span.tooltip {
    display: none;
    position: absolute;
    left: 0;
    top: 1.4em;
    z-index: 10;
    background: #fffbe6;
    border: 1px solid #ccc;
    padding: 0.3em;
    font-size: 0.9em;
    white-space: normal;
}

span.changed:hover > span.tooltip {
    display: block;
}

span.tooltip-ul { display: block; }
span.tooltip-li { display: list-item; margin-left: 1.2em; }

span.unknown-tag {
    color: #888;
    font-style: italic;
}

.markup-diff.empty {
    display: none;
}

.arrow {
    color: #666;
}

p.timestamp {
    color: #777;
    font-size: 0.9em;
}
"#;
