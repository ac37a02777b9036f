use std::path::PathBuf;

use sumclip_core::{BlobId, DashboardView, MenuCategory, RenderModel};

/// What the terminal knows about the image on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDisplay {
    pub blob: BlobId,
    pub byte_len: usize,
    pub path: Option<PathBuf>,
}

pub fn render(view: &DashboardView, image: Option<&ImageDisplay>) -> Vec<String> {
    let mut lines = Vec::new();

    let menu_line: Vec<String> = MenuCategory::ALL
        .iter()
        .map(|menu| {
            if *menu == view.menu {
                format!("[{}]", menu.label())
            } else {
                menu.label().to_string()
            }
        })
        .collect();
    lines.push(format!("SUMCLIP | {}", menu_line.join(" ")));

    if view.show_tabs {
        let tabs: Vec<String> = view
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let marker = if tab.active { "*" } else { " " };
                format!("{}{} {}", marker, i + 1, tab.label)
            })
            .collect();
        lines.push(format!("  {}", tabs.join(" | ")));
    }

    if let Some(fault) = &view.fault {
        lines.push(format!("  !! {fault}"));
    }

    match &view.render {
        RenderModel::Loading => lines.push("  loading...".to_string()),
        RenderModel::Error(message) => lines.push(format!("  error: {message} (select again to retry)")),
        RenderModel::Text(text) => {
            lines.extend(text.lines().map(|line| format!("  {line}")));
        }
        RenderModel::Image(blob) => {
            let summary = match image.filter(|display| display.blob == *blob) {
                Some(ImageDisplay {
                    byte_len,
                    path: Some(path),
                    ..
                }) => format!("  image {blob} ({byte_len} bytes) -> {}", path.display()),
                Some(ImageDisplay { byte_len, .. }) => format!("  image {blob} ({byte_len} bytes)"),
                None => format!("  image {blob}"),
            };
            lines.push(summary);
        }
    }

    lines
}
