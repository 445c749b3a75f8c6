mod common;

use common::{Pick, ScriptedConsole};
use kodirun_core::{Handle, InvokeError, Item, PluginTarget};
use kodirun_nav::{interactive, once, run, NavError, Navigator, RunMode, Runner};
use kodirun_plugin::FixturePlugin;

fn catalog() -> FixturePlugin {
    FixturePlugin::new("a")
        .with_listing(
            "plugin://a/",
            vec![
                Item::directory("x", "plugin://a/x"),
                Item::directory("y", "plugin://a/y"),
                Item::playable("Watched", "plugin://a/play/watched").with_played(true),
            ],
        )
        .with_listing(
            "plugin://a/x",
            vec![
                Item::directory("Sort by name", "plugin://a/x/sort/name"),
                Item::playable("Clip", "plugin://a/play/clip"),
            ],
        )
        .with_update_listing(
            "plugin://a/x/sort/name",
            vec![
                Item::directory("Sort by date", "plugin://a/x/sort/date"),
                Item::playable("Clip", "plugin://a/play/clip"),
                Item::playable("Old clip", "plugin://a/play/old").with_played(true),
            ],
        )
        .with_update_listing(
            "plugin://a/x/sort/date",
            vec![
                Item::directory("Sort by name", "plugin://a/x/sort/name"),
                Item::playable("Clip", "plugin://a/play/clip"),
            ],
        )
        .with_listing("plugin://a/y", vec![])
}

fn paths(items: &[Item]) -> Vec<String> {
    items.iter().map(|item| item.path().to_string()).collect()
}

fn pick(items: &[Item], path: &str) -> Item {
    items
        .iter()
        .find(|item| item.path() == path && item.label() != "..")
        .cloned()
        .unwrap_or_else(|| panic!("{path} not offered"))
}

fn parent_of(items: &[Item]) -> Item {
    assert_eq!(items[0].label(), "..");
    items[0].clone()
}

#[test]
fn going_into_a_directory_and_back_returns_to_the_same_listing() {
    let mut runner = Runner::at_root(catalog());
    let mut console = ScriptedConsole::default();
    let mut nav = Navigator::new();

    let root = paths(nav.show(&mut runner, &mut console).unwrap());
    let x = pick(nav.session().current_items(), "plugin://a/x");
    nav.select(&mut runner, x).unwrap();

    let stack = nav.session().parent_stack();
    assert_eq!(stack.len(), 1);
    assert_eq!(stack[0].label(), "..");
    assert_eq!(stack[0].path(), "plugin://a/");

    let listing = nav.show(&mut runner, &mut console).unwrap().to_vec();
    let up = parent_of(&listing);
    nav.select(&mut runner, up).unwrap();
    assert!(nav.session().parent_stack().is_empty());

    let back = paths(nav.show(&mut runner, &mut console).unwrap());
    assert_eq!(back, root);
    assert_eq!(runner.target().path, "plugin://a/");
}

#[test]
fn played_items_are_never_offered() {
    let mut runner = Runner::at_root(catalog());
    let mut console = ScriptedConsole::picking([
        Pick::Path("plugin://a/x"),
        Pick::Path("plugin://a/x/sort/name"),
        Pick::Quit,
    ]);

    interactive(&mut runner, &mut console).unwrap();

    assert_eq!(console.offered.len(), 3);
    for offered in &console.offered {
        assert!(offered.iter().all(|item| !item.is_played()));
    }
    // The full listing still shows them.
    assert!(console.displayed[0].iter().any(Item::is_played));
}

#[test]
fn toggling_an_update_listing_never_grows_the_stack() {
    let mut runner = Runner::at_root(catalog());
    let mut console = ScriptedConsole::default();
    let mut nav = Navigator::new();

    nav.show(&mut runner, &mut console).unwrap();
    let x = pick(nav.session().current_items(), "plugin://a/x");
    nav.select(&mut runner, x).unwrap();
    nav.show(&mut runner, &mut console).unwrap();
    let sort = pick(nav.session().current_items(), "plugin://a/x/sort/name");
    nav.select(&mut runner, sort).unwrap();
    let depth = nav.session().parent_stack().len();
    assert_eq!(depth, 2);

    for target in [
        "plugin://a/x/sort/date",
        "plugin://a/x/sort/name",
        "plugin://a/x/sort/date",
        "plugin://a/x/sort/name",
    ] {
        nav.show(&mut runner, &mut console).unwrap();
        assert!(nav.session().is_update_listing());
        let toggle = pick(nav.session().current_items(), target);
        nav.select(&mut runner, toggle).unwrap();
        assert_eq!(nav.session().parent_stack().len(), depth);
    }
}

#[test]
fn leaving_an_update_listing_skips_the_listing_it_replaced() {
    let mut runner = Runner::at_root(catalog());
    let mut console = ScriptedConsole::picking([
        Pick::Path("plugin://a/x"),
        Pick::Path("plugin://a/x/sort/name"),
        Pick::Parent,
        Pick::Quit,
    ]);
    let mut nav = Navigator::new();

    nav.run(&mut runner, &mut console).unwrap();

    assert_eq!(runner.target().path, "plugin://a/");
    assert!(nav.session().parent_stack().is_empty());
    let last = console.displayed.last().unwrap();
    assert_eq!(paths(last), console.displayed_paths(0));
}

#[test]
fn leaving_an_update_listing_without_a_grandparent_fails() {
    let plugin = catalog();
    let mut runner = Runner::new(plugin, PluginTarget::new("plugin://a/x", Handle(0)));
    let mut console = ScriptedConsole::picking([
        Pick::Path("plugin://a/x/sort/name"),
        Pick::Parent,
    ]);

    let err = interactive(&mut runner, &mut console).unwrap_err();

    assert!(matches!(err, NavError::MissingParent { ref path } if path == "plugin://a/x/sort/name"));
}

#[test]
fn quitting_at_the_first_prompt_fetches_once() {
    let mut runner = Runner::at_root(catalog());
    let mut console = ScriptedConsole::picking([Pick::Quit]);

    run(RunMode::Interactive, &mut runner, &mut console).unwrap();

    assert_eq!(runner.plugin().invocations(), ["plugin://a/"]);
    assert_eq!(runner.plugin().clear_count(), 1);
}

#[test]
fn plugin_failure_propagates_out_of_interactive_mode() {
    let plugin = catalog().with_listing(
        "plugin://a/y",
        vec![Item::directory("Dead end", "plugin://a/y/missing")],
    );
    let mut runner = Runner::at_root(plugin);
    let mut console = ScriptedConsole::picking([
        Pick::Path("plugin://a/y"),
        Pick::Path("plugin://a/y/missing"),
    ]);

    let err = interactive(&mut runner, &mut console).unwrap_err();

    assert!(matches!(err, NavError::Invoke(InvokeError::NotFound { .. })));
}

#[test]
fn once_mode_lists_without_a_parent() {
    let mut runner = Runner::at_root(catalog());
    let mut console = ScriptedConsole::default();

    let items = once(&mut runner, &mut console).unwrap();

    assert_eq!(
        paths(&items),
        ["plugin://a/x", "plugin://a/y", "plugin://a/play/watched"]
    );
    assert_eq!(console.displayed.len(), 1);
    assert!(console.offered.is_empty());
}
