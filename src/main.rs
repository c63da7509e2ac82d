use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use anyhow::Context;

use dynmenu::config::Config;
use dynmenu::core::aliases::AliasList;
use dynmenu::core::cli::CliPaths;
use dynmenu::core::context::AppContext;
use dynmenu::errors::{Error, Result, require_parse};
use dynmenu::logging::LogTarget;
use dynmenu::menu::{AliasMenu, CommandSpec, MenuSpec, MenuTree};
use dynmenu::prompter::flows::menu_flow::MenuFlow;
use dynmenu::prompter::prompter::Prompter;

fn say(text: &'static str) -> impl FnMut(&mut dyn Write, &[String]) -> Result<()> {
    move |out: &mut dyn Write, _: &[String]| {
        writeln!(out, "{text}")?;
        Ok(())
    }
}

fn build_tree(config: Config) -> Result<MenuTree> {
    let mut tree = MenuTree::new("cli").with_parent_shortcut(config.parent_shortcut());
    let root = tree.root();

    tree.insert_command(
        root,
        CommandSpec::new(
            "answer",
            "Print the answer to Life, the Universe and Everything",
            |out: &mut dyn Write, args: &[String]| {
                let raw = require_parse(args.first(), "answer expects one integer")?;
                let x: i64 = raw.parse().map_err(|_| {
                    Error::action("answer", format!("'{raw}' is not an integer"))
                })?;
                writeln!(out, "The answer is: {x}")?;
                Ok(())
            },
        )
        .param("int"),
    )?;

    let sub = tree.insert_menu(root, MenuSpec::new("sub"))?;
    tree.insert_command(
        sub,
        CommandSpec::new("hello", "Print hello world", say("Hello, world")),
    )?;
    tree.insert_command(
        sub,
        CommandSpec::new("demo", "Print a demo string", say("This is a sample!")),
    )?;
    let subsub = tree.insert_menu(sub, MenuSpec::new("subsub").description("Nested menu"))?;
    tree.insert_command(
        subsub,
        CommandSpec::new("hello", "Print hello from the nested menu", say("Hello, subsub")),
    )?;

    // Notifying menu: its commands see which alias it was entered through.
    let selected = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&selected);
    let test = tree.insert_alias_menu(
        root,
        AliasMenu::notifying("test", || {
            vec!["foo".to_string(), "bar".to_string(), "baz".to_string()]
        })
        .description("Menu reachable as foo, bar or baz")
        .on_select(move |alias| *sink.borrow_mut() = alias.to_string()),
    )?;
    tree.insert_command(
        test,
        CommandSpec::new(
            "hello",
            "Greet from the selected alias",
            move |out: &mut dyn Write, _: &[String]| {
                writeln!(out, "Hello, from {}", selected.borrow())?;
                Ok(())
            },
        ),
    )?;

    // Tracking menu: its names are whatever hosts are connected right now.
    let hosts: Rc<RefCell<AliasList>> = Rc::new(RefCell::new(Vec::new()));
    let live = Rc::clone(&hosts);
    let host = tree.insert_alias_menu(
        root,
        AliasMenu::dynamic("host", move || live.borrow().clone())
            .description("Enter a connected host"),
    )?;
    tree.insert_command(
        host,
        CommandSpec::new("ping", "Check the host answers", say("pong")),
    )?;

    let connected = Rc::clone(&hosts);
    tree.insert_command(
        root,
        CommandSpec::new(
            "connect",
            "Add a host menu",
            move |out: &mut dyn Write, args: &[String]| {
                let name = &args[0];
                let mut hosts = connected.borrow_mut();
                if hosts.contains(name) {
                    return Err(Error::action(
                        "connect",
                        format!("'{name}' is already connected"),
                    ));
                }
                hosts.push(name.clone());
                writeln!(out, "Connected {name}")?;
                Ok(())
            },
        )
        .param("name"),
    )?;
    tree.insert_command(
        root,
        CommandSpec::new(
            "disconnect",
            "Remove a host menu",
            move |out: &mut dyn Write, args: &[String]| {
                let name = &args[0];
                let mut live = hosts.borrow_mut();
                let Some(pos) = live.iter().position(|h| h == name) else {
                    return Err(Error::action(
                        "disconnect",
                        format!("'{name}' is not connected"),
                    ));
                };
                live.remove(pos);
                writeln!(out, "Disconnected {name}")?;
                Ok(())
            },
        )
        .param("name"),
    )?;

    insert_settings(&mut tree, config)?;
    Ok(tree)
}

/// `settings show` and `settings set <key> <value>`. Changes are saved right
/// away and apply from the next start.
fn insert_settings(tree: &mut MenuTree, config: Config) -> Result<()> {
    let root = tree.root();
    let settings = tree.insert_menu(
        root,
        MenuSpec::new("settings").description("Inspect and change the configuration"),
    )?;
    let config = Rc::new(RefCell::new(config));

    let shown = Rc::clone(&config);
    tree.insert_command(
        settings,
        CommandSpec::new(
            "show",
            "List every setting",
            move |out: &mut dyn Write, _: &[String]| {
                for (key, description, value) in shown.borrow().rows() {
                    writeln!(out, "{key} = {value}\n\t{description}")?;
                }
                Ok(())
            },
        ),
    )?;
    tree.insert_command(
        settings,
        CommandSpec::new(
            "set",
            "Change a setting",
            move |out: &mut dyn Write, args: &[String]| {
                config.borrow_mut().set(&args[0], &args[1])?;
                writeln!(out, "Saved {}; restart to apply.", args[0])?;
                Ok(())
            },
        )
        .param("key")
        .param("value"),
    )?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let paths = CliPaths::from_env().context("invalid command line")?;
    let ctx = AppContext::new_with_paths(paths.config_path, paths.logs_dir)
        .context("failed to load configuration")?;

    let tree = build_tree(ctx.config.clone()).context("failed to build menu tree")?;
    let flow = MenuFlow::new(tree, io::stdout(), &ctx.config, ctx.logger.clone());

    if let Err(err) = Prompter::new().run(flow) {
        ctx.logger
            .error(format!("{err}"), LogTarget::ConsoleAndFile);
    }
    Ok(())
}
