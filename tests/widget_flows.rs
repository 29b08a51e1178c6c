//! End-to-end widget interactions driven entirely through the public API:
//! an in-memory surface, a scripted key sequence, and assertions on the
//! resulting character grid.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::style::Color;
use termkit::{
    Console, Key, KeySource, Menu, MenuOption, Notification, NotifyMode, ProgressBar, ResolvedUi,
    ScriptedKeys, Severity, Surface, TestSurface, TextPrompt, Theme,
};

type FlowConsole = Console<TestSurface, ScriptedKeys>;

fn console(keys: impl IntoIterator<Item = Key>) -> FlowConsole {
    Console::new(TestSurface::new(80, 24), ScriptedKeys::new(keys))
}

#[test]
fn menu_option_opens_prompt_and_collects_the_answer() {
    // '1' opens the script prompt; "te" narrows to test/test:unit, Down
    // selects the second, Enter accepts. '0' then closes the menu.
    let keys: Vec<Key> = [Key::Char('1')]
        .into_iter()
        .chain(ScriptedKeys::typed("te"))
        .chain([Key::Down, Key::Enter, Key::Char('0')])
        .collect();
    let mut console = console(keys);

    let answer: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let sink = answer.clone();
    let ui = ResolvedUi::default();

    let mut menu = Menu::new(
        "Scripts",
        vec![
            MenuOption::new('1', "Run a script", move |console: &mut FlowConsole| {
                let candidates = vec![
                    "build".to_string(),
                    "test".to_string(),
                    "test:unit".to_string(),
                ];
                let prompt = TextPrompt::new("Script", candidates, Theme::default());
                *sink.borrow_mut() = prompt.prompt(console)?;
                Ok(())
            }),
            MenuOption::new('0', "Exit", |_: &mut FlowConsole| Ok(())),
        ],
        &ui,
    )
    .unwrap();

    menu.show(&mut console).unwrap();
    assert_eq!(answer.borrow().as_deref(), Some("test:unit"));
}

#[test]
fn autocomplete_scenario_apple_apricot_banana() {
    // Type "ap" → ["apple", "apricot"], Down → apricot, Tab accepts it,
    // then Enter submits. Enter re-accepts the highlighted suggestion,
    // which after Tab is "apricot" itself.
    let keys: Vec<Key> = ScriptedKeys::typed("ap")
        .into_iter()
        .chain([Key::Down, Key::Tab, Key::Enter])
        .collect();
    let mut console = console(keys);

    let candidates = vec![
        "apple".to_string(),
        "apricot".to_string(),
        "banana".to_string(),
    ];
    let prompt = TextPrompt::new("Fruit", candidates, Theme::default());
    let answer = prompt.prompt(&mut console).unwrap();
    assert_eq!(answer.as_deref(), Some("apricot"));
}

#[test]
fn backspace_renarrows_suggestions() {
    let keys: Vec<Key> = ScriptedKeys::typed("lint")
        .into_iter()
        .chain([Key::Backspace, Key::Backspace, Key::Enter])
        .collect();
    let mut console = console(keys);

    let prompt = TextPrompt::new(
        "Script",
        vec!["lint".to_string(), "lighthouse".to_string()],
        Theme::default(),
    );
    // After two backspaces the buffer is "li"; both candidates match and
    // index resets to 0, so Enter returns "lint".
    let answer = prompt.prompt(&mut console).unwrap();
    assert_eq!(answer.as_deref(), Some("lint"));
}

#[test]
fn notification_preserves_everything_it_covered() {
    let mut console = console([]);

    // Paint a backdrop the banner will draw over.
    for row in 0..5 {
        console.surface().move_to(0, row).unwrap();
        console.surface().print(&"#".repeat(80)).unwrap();
    }
    console.surface().set_fg(Color::Green).unwrap();
    console.surface().move_to(10, 20).unwrap();

    Notification::new(
        "saved",
        Severity::Success,
        NotifyMode::Timed(Duration::from_millis(1)),
        Theme::default(),
    )
    .show(&mut console)
    .unwrap();

    let (surface, _) = console.into_parts();
    assert_eq!(surface.cursor(), (10, 20));
    assert_eq!(surface.colors(), (Color::Green, Color::Reset));
    // The banner region is blanked (the overlay does not repaint what was
    // underneath — it guarantees blanks), rows it never touched are intact.
    assert_eq!(surface.row_text(3), "#".repeat(80));
    assert_eq!(surface.row_text(4), "#".repeat(80));
}

#[test]
fn progress_bar_full_run() {
    let mut console = console([]);
    let mut bar = ProgressBar::new("deps", 4, 16, Theme::default()).unwrap();

    for step in ["a", "b", "c", "d"] {
        bar.increment(&mut console, Some(step)).unwrap();
    }
    assert_eq!(bar.percent(), 100);
    assert_eq!(bar.filled(), 16);

    bar.complete(&mut console, None).unwrap();
    assert!(bar.is_completed());

    let (surface, _) = console.into_parts();
    let line = surface.row_text(0);
    assert!(line.starts_with("deps ["));
    assert!(line.contains(&"█".repeat(16)));
    assert!(line.contains("100%"));
    assert_eq!(surface.cursor(), (0, 1));
}

#[test]
fn themed_menu_renders_configured_border_glyphs() {
    let toml_str = r#"
[menu]
width = 40
border_style = "ascii"

[colors]
highlight_bg = "yellow"
"#;
    let config: termkit::UiConfig = toml::from_str(toml_str).unwrap();
    let ui = termkit::resolve(&config);

    let mut console = console([Key::Char('0')]);
    let mut menu = Menu::new(
        "Tools",
        vec![
            MenuOption::new('1', "Update", |_: &mut FlowConsole| Ok(())),
            MenuOption::new('0', "Exit", |_: &mut FlowConsole| Ok(())),
        ],
        &ui,
    )
    .unwrap();
    menu.show(&mut console).unwrap();

    let (surface, _) = console.into_parts();
    // Box top border sits below the title and a blank row.
    assert_eq!(surface.cell(0, 2).ch, '+');
    assert_eq!(surface.cell(39, 2).ch, '+');
    assert_eq!(surface.cell(0, 3).ch, '|');
    assert_eq!(surface.cell(2, 3).bg, Color::Yellow);
}

#[test]
fn nested_help_overlay_leaves_the_menu_redrawable() {
    let ui = ResolvedUi::default();
    let mut console = console([Key::F1, Key::Enter, Key::Char('0')]);
    let mut menu = Menu::new(
        "Main",
        vec![
            MenuOption::new('1', "Something", |_: &mut FlowConsole| Ok(())),
            MenuOption::new('0', "Exit", |_: &mut FlowConsole| Ok(())),
        ],
        &ui,
    )
    .unwrap();
    menu.show(&mut console).unwrap();

    let (surface, mut keys) = console.into_parts();
    assert!(keys.next_key().is_err(), "all scripted keys consumed");
    // Final render is the menu again, not the help box.
    assert!(surface.contains("[1] Something"));
    assert!(!surface.contains("This overview"));
}
