use clap::{CommandFactory, Parser};
use tendernav::tooling::cli::{Cli, Commands, MenuCommands, RouteCommands};

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["tendernav", "menu", "show"],
        vec!["tendernav", "menu", "show", "--visible", "--format", "json"],
        vec!["tendernav", "menu", "rename", "finance", "Accounts"],
        vec!["tendernav", "menu", "move", "finance", "tender"],
        vec!["tendernav", "route", "check", "/tenders"],
        vec!["tendernav", "route", "list", "--format", "json"],
        vec!["tendernav", "perm", "list"],
        vec!["tendernav", "perm", "check", "mis"],
        vec!["tendernav", "config"],
        vec![
            "tendernav",
            "--user",
            "u-9",
            "--log-level",
            "debug",
            "--log-output",
            "stderr",
            "menu",
            "show",
        ],
    ];
    for args in cases {
        assert!(
            Cli::try_parse_from(args.iter().copied()).is_ok(),
            "failed to parse {:?}",
            args
        );
    }
}

#[test]
fn parse_invalid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["tendernav"],
        vec!["tendernav", "menu"],
        vec!["tendernav", "menu", "rename", "finance"],
        vec!["tendernav", "menu", "move", "finance"],
        vec!["tendernav", "route", "check"],
        vec!["tendernav", "perm", "grant", "mis"],
    ];
    for args in cases {
        assert!(
            Cli::try_parse_from(args.iter().copied()).is_err(),
            "unexpectedly parsed {:?}",
            args
        );
    }
}

#[test]
fn parsed_arguments_land_in_commands() {
    let cli = Cli::try_parse_from(["tendernav", "menu", "move", "finance", "tender"]).unwrap();
    match cli.command {
        Commands::Menu {
            command: MenuCommands::Move { active, over },
        } => {
            assert_eq!(active, "finance");
            assert_eq!(over, "tender");
        }
        other => panic!("unexpected command {:?}", other),
    }

    let cli = Cli::try_parse_from(["tendernav", "route", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Route {
            command: RouteCommands::List { ref format }
        } if format == "text"
    ));
}
