//! Format menus, routes, permissions and notices as text.

use crate::menu::{MenuOrigin, NavigationNode};
use crate::notice::{Notice, NoticeLevel};
use crate::route::RouteGuard;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn origin_label(origin: MenuOrigin) -> &'static str {
    match origin {
        MenuOrigin::Persisted => "saved structure",
        MenuOrigin::Default => "default structure (nothing saved yet)",
        MenuOrigin::DefaultAfterError => "default structure (backend unavailable)",
    }
}

/// Menu tree as a table; sub items are indented under their parent.
pub fn format_menu_text(title: &str, tree: &[NavigationNode], origin: MenuOrigin) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading(title)));
    out.push_str(&format!("  Source: {}\n\n", origin_label(origin)));
    if tree.is_empty() {
        out.push_str("No menu items visible.\n");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Order", "Id", "Name", "Path", "Permission"]);
    let mut mains: Vec<&NavigationNode> = tree.iter().collect();
    mains.sort_by_key(|n| n.order);
    for main in mains {
        table.add_row(vec![
            main.order.to_string(),
            main.id.clone(),
            main.name.clone(),
            main.path.clone(),
            main.required_permission.clone().unwrap_or_else(|| "-".to_string()),
        ]);
        let mut subs: Vec<&NavigationNode> = main.sub_items.iter().collect();
        subs.sort_by_key(|n| n.order);
        for sub in subs {
            table.add_row(vec![
                format!("{}.{}", main.order, sub.order),
                format!("  {}", sub.id),
                format!("  {}", sub.name),
                sub.path.clone(),
                sub.required_permission.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
    }
    out.push_str(&format!("{}\n", table));
    out
}

/// Route table with the viewer's access to each route.
pub fn format_routes_text(routes: &[RouteGuard], allowed: &[bool]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Routes")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Capability", "Access"]);
    for (guard, allowed) in routes.iter().zip(allowed) {
        table.add_row(vec![
            guard.path.clone(),
            guard.module.clone().unwrap_or_else(|| "-".to_string()),
            if *allowed { "allowed" } else { "unauthorized" }.to_string(),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_permissions_text(granted: &[String], loaded: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Permissions")));
    if !loaded {
        out.push_str("Permission set could not be loaded; all capabilities are denied.\n");
        return out;
    }
    if granted.is_empty() {
        out.push_str("No capabilities granted.\n");
        return out;
    }
    for tag in granted {
        out.push_str(&format!("  - {}\n", tag));
    }
    out
}

/// One-line notice, colored by level.
pub fn format_notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Info => format!("{}", notice.message.blue()),
        NoticeLevel::Success => format!("{}", notice.message.green()),
        NoticeLevel::Warning => format!("{}", notice.message.yellow()),
        NoticeLevel::Error => format!("{}", notice.message.red()),
    }
}
