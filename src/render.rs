use std::fmt::Write;

use crate::{
    domain::{ClassificationResult, FileRef, Side},
    preview::FileUrlMap,
};

pub fn render_results(result: &ClassificationResult, file_urls: Option<&FileUrlMap>) -> String {
    let groups = result.groups();
    if groups.is_empty() {
        return "No documents processed yet\n".to_string();
    }

    let mut out = String::from("Classification Results\n");
    for group in groups {
        let _ = writeln!(out, "\n{} ({})", group.category.title(), group.items.len());
        for item in group.items {
            let _ = write!(out, "  {} {}", group.category.id_field(), item.id);
            if item.files.is_empty() {
                let _ = writeln!(out, "  (no file)");
                continue;
            }
            let _ = writeln!(out);
            for file in &item.files {
                let _ = writeln!(out, "    {}", describe(file, file_urls));
            }
        }
    }
    out
}

fn describe(file: &FileRef<'_>, file_urls: Option<&FileUrlMap>) -> String {
    let label = match file.side {
        Some(Side::Front) => format!("{} - Front", file.filename),
        Some(Side::Back) => format!("{} - Back", file.filename),
        None => file.filename.to_string(),
    };
    match file_urls.and_then(|urls| urls.get(file.filename)) {
        Some(handle) => format!("{label}  [{handle}]"),
        None => format!("{label}  [no preview]"),
    }
}
