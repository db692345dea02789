use tempfile::TempDir;
use tendernav::config::BackendKind;
use tendernav::tooling::cli::{
    CliContext, Commands, MenuCommands, PermCommands, RouteCommands,
};

use crate::integration::support::local_config;

fn context(temp_dir: &TempDir, permissions: &[&str]) -> CliContext {
    CliContext::from_config(local_config(&temp_dir.path().join("store"), permissions)).unwrap()
}

fn show(format: &str, visible: bool) -> Commands {
    Commands::Menu {
        command: MenuCommands::Show {
            visible,
            format: format.to_string(),
        },
    }
}

#[test]
fn menu_show_json_contract_matches_node_shape() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir, &[]);

    let output = cli.execute(&show("json", false)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 7);

    let tender = &items[1];
    assert_eq!(tender["id"], "tender");
    assert_eq!(tender["path"], "/tenders");
    assert_eq!(tender["requiredPermission"], "tender");
    assert_eq!(tender["order"], 2);
    assert!(tender["subItems"].as_array().is_some());
    assert!(items[0].get("requiredPermission").is_none());
}

#[test]
fn visible_menu_follows_session_permissions() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir, &["finance"]);

    let output = cli.execute(&show("json", true)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let ids: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["dashboard", "finance"]);
}

#[test]
fn rename_then_move_persists_across_commands() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir, &[]);

    let renamed = cli
        .execute(&Commands::Menu {
            command: MenuCommands::Rename {
                id: "finance".to_string(),
                name: "Accounts".to_string(),
            },
        })
        .unwrap();
    assert!(renamed.contains("Menu structure saved"));

    cli.execute(&Commands::Menu {
        command: MenuCommands::Move {
            active: "finance".to_string(),
            over: "tender".to_string(),
        },
    })
    .unwrap();

    let output = cli.execute(&show("json", false)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed[1]["id"], "finance");
    assert_eq!(parsed[1]["name"], "Accounts");
    assert_eq!(parsed[1]["order"], 2);
    assert_eq!(parsed[2]["id"], "tender");

    let text = cli.execute(&show("text", false)).unwrap();
    assert!(text.contains("saved structure"));
}

#[test]
fn move_between_levels_reports_nothing_to_save() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir, &[]);

    let output = cli
        .execute(&Commands::Menu {
            command: MenuCommands::Move {
                active: "finance-mis".to_string(),
                over: "mis".to_string(),
            },
        })
        .unwrap();
    assert!(output.contains("nothing moved"));
    assert!(output.contains("No changes to save"));
}

#[test]
fn rename_rejects_blank_and_unknown_nodes() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir, &[]);

    let blank = cli.execute(&Commands::Menu {
        command: MenuCommands::Rename {
            id: "finance".to_string(),
            name: "   ".to_string(),
        },
    });
    assert!(blank.is_err());

    let unknown = cli.execute(&Commands::Menu {
        command: MenuCommands::Rename {
            id: "payroll".to_string(),
            name: "Payroll".to_string(),
        },
    });
    assert!(unknown.is_err());
}

#[test]
fn route_and_permission_checks() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir, &["tender"]);

    let check = |path: &str| {
        cli.execute(&Commands::Route {
            command: RouteCommands::Check {
                path: path.to_string(),
            },
        })
        .unwrap()
    };
    assert_eq!(check("/dashboard"), "/dashboard: allowed");
    assert_eq!(check("/tenders/new"), "/tenders/new: allowed");
    assert_eq!(check("/tenders/allocation"), "/tenders/allocation: unauthorized");
    assert_eq!(check("/payroll"), "/payroll: no such route");

    let perm = cli
        .execute(&Commands::Perm {
            command: PermCommands::Check {
                capability: "settings".to_string(),
            },
        })
        .unwrap();
    assert_eq!(perm, "settings: denied");

    let listed = cli
        .execute(&Commands::Perm {
            command: PermCommands::List,
        })
        .unwrap();
    assert!(listed.contains("- tender"));
}

#[test]
fn route_list_json_contract_has_required_fields() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir, &["mis"]);

    let output = cli
        .execute(&Commands::Route {
            command: RouteCommands::List {
                format: "json".to_string(),
            },
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 13);
    for row in rows {
        assert!(row.get("path").and_then(|v| v.as_str()).is_some());
        assert!(row.get("allowed").and_then(|v| v.as_bool()).is_some());
    }
    let mis = rows.iter().find(|row| row["path"] == "/mis").unwrap();
    assert_eq!(mis["allowed"], true);
    assert_eq!(mis["module"], "mis");
}

#[test]
fn config_show_redacts_token() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = local_config(&temp_dir.path().join("store"), &[]);
    config.session.token = Some("s3cret".to_string());
    let cli = CliContext::from_config(config).unwrap();

    let output = cli.execute(&Commands::Config).unwrap();
    assert!(!output.contains("s3cret"));
    assert!(output.contains("<redacted>"));
    assert!(output.contains("id = \"hq\""));
}

#[test]
fn http_backend_requires_base_url() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = local_config(&temp_dir.path().join("store"), &[]);
    config.backend.kind = BackendKind::Http;
    assert!(CliContext::from_config(config).is_err());
}
