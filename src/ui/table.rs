use hapmgr::locale::Translate;
use hapmgr::state::PackageRow;

const APP_WIDTH: usize = 18;
const PACK_WIDTH: usize = 14;
const STATUS_WIDTH: usize = 8;
const DESC_WIDTH: usize = 56;

/// Text projection of the package table: one header line, then one line per row.
pub(crate) fn render_table(rows: &[PackageRow], tr: &dyn Translate) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<3} {:<app_w$} {:<pack_w$} {:<status_w$} {}\n",
        tr.translate("Sel"),
        tr.translate("App"),
        tr.translate("Pkg"),
        tr.translate("Status"),
        tr.translate("Desc"),
        app_w = APP_WIDTH,
        pack_w = PACK_WIDTH,
        status_w = STATUS_WIDTH,
    ));

    for row in rows {
        out.push_str(&format!(
            "{:<3} {:<app_w$} {:<pack_w$} {:<status_w$} {}\n",
            if row.selected { "[x]" } else { "[ ]" },
            truncate(&row.app, APP_WIDTH),
            truncate(&row.pack, PACK_WIDTH),
            tr.translate(row.status.label()),
            truncate(&row.desc, DESC_WIDTH),
            app_w = APP_WIDTH,
            pack_w = PACK_WIDTH,
            status_w = STATUS_WIDTH,
        ));
    }

    out
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut result: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    result.push('…');
    result
}
