//! End-to-end completion: real providers over an on-disk notebook, driven
//! through the editor buffer the way the TUI drives it.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use chrono::NaiveDate;
use notedeck::complete::providers::{Surface, triggers_for};
use notedeck::complete::{self, CompletionItem, CompletionState, TextBuffer, TriggerSet};
use notedeck::io::config_io;
use notedeck::io::notebook_io::{init_notebook, load_notebook};
use notedeck::model::snapshot::Snapshot;
use notedeck::tui::editor::EditBuffer;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_notebook(root: &Path) {
    let meta_dir = init_notebook(root, "flow").unwrap();
    config_io::add_abbreviation(&meta_dir, "sig", "Best regards,\nSam").unwrap();
    let notes = [
        ("projects", "# Projects\n\nPlans #work #project\n"),
        ("web", "# Web\nparent: projects\n\n#work\n"),
        ("frontend", "# Frontend\nparent: web\n"),
        ("guide", "# Setup guide\n\n## Install\n\n## Usage\n"),
        ("journal", "# Journal\n\n#personal\n"),
    ];
    for (id, text) in notes {
        fs::write(root.join(format!("{}.md", id)), text).unwrap();
    }
}

fn snapshot(tmp: &TempDir) -> Rc<Snapshot> {
    write_notebook(tmp.path());
    let notebook = load_notebook(tmp.path()).unwrap();
    let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
    Rc::new(notebook.snapshot(today))
}

/// An input with its completion session, as one editor holds it.
struct Session {
    buffer: EditBuffer,
    state: CompletionState,
    triggers: TriggerSet,
}

impl Session {
    fn new(surface: Surface, snapshot: &Rc<Snapshot>) -> Self {
        Session {
            buffer: EditBuffer::new("", surface.multiline()),
            state: CompletionState::new(),
            triggers: triggers_for(surface, snapshot),
        }
    }

    fn refresh(&mut self) {
        complete::update(
            self.buffer.content(),
            self.buffer.cursor(),
            &self.triggers,
            &mut self.state,
        );
    }

    /// Type `text` key by key; descend keys step into a drillable selection.
    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            if complete::descend(&mut self.buffer, &mut self.state, &self.triggers, c) {
                continue;
            }
            self.buffer.insert(c.encode_utf8(&mut [0; 4]));
            self.refresh();
        }
    }

    fn descend(&mut self, key: char) -> bool {
        complete::descend(&mut self.buffer, &mut self.state, &self.triggers, key)
    }

    fn accept(&mut self) -> Option<CompletionItem> {
        complete::accept(&mut self.buffer, &mut self.state, &self.triggers)
    }

    fn labels(&self) -> Vec<&str> {
        self.state.items.iter().map(|i| i.label.as_str()).collect()
    }

    fn text(&self) -> &str {
        self.buffer.content()
    }
}

#[test]
fn tag_completes_in_search_bar() {
    let tmp = TempDir::new().unwrap();
    let snap = snapshot(&tmp);
    let mut s = Session::new(Surface::Search, &snap);

    s.type_text("search #pro");
    assert!(s.state.active);
    assert_eq!(s.labels(), vec!["#project"]);
    assert_eq!(s.state.trigger_start, 7);

    s.accept().unwrap();
    assert_eq!(s.text(), "search #project ");
    assert!(!s.state.active);
}

#[test]
fn empty_input_offers_nothing() {
    let tmp = TempDir::new().unwrap();
    let snap = snapshot(&tmp);
    let mut s = Session::new(Surface::Note, &snap);
    s.refresh();
    assert!(!s.state.active);
    assert!(s.accept().is_none());
    assert_eq!(s.text(), "");
}

#[test]
fn parent_picker_drills_down_the_tree() {
    let tmp = TempDir::new().unwrap();
    let snap = snapshot(&tmp);
    let mut s = Session::new(Surface::Parent, &snap);

    s.type_text(">");
    assert_eq!(s.labels(), vec!["Journal", "Projects", "Setup guide"]);

    // a leaf does not descend
    assert!(!s.descend('/'));
    s.state.move_selection(1);
    assert!(s.descend('/'));
    assert_eq!(s.text(), ">Projects/");
    assert_eq!(s.labels(), vec!["Web"]);

    assert!(s.descend('/'));
    assert_eq!(s.text(), ">Projects/Web/");
    assert_eq!(s.labels(), vec!["Frontend"]);
    assert_eq!(s.state.parent_drill.len(), 2);

    let item = s.accept().unwrap();
    assert_eq!(item.value.as_deref(), Some("frontend"));
    assert_eq!(s.text(), ">Projects/Web/Frontend ");
    assert!(s.state.parent_drill.is_empty());
}

#[test]
fn doubled_prefix_searches_descendants() {
    let tmp = TempDir::new().unwrap();
    let snap = snapshot(&tmp);
    let mut s = Session::new(Surface::Parent, &snap);

    s.type_text(">>front");
    assert_eq!(s.labels(), vec!["Frontend"]);
    assert_eq!(s.state.items[0].detail, "Projects/Web");
}

#[test]
fn wiki_link_header_mode() {
    let tmp = TempDir::new().unwrap();
    let snap = snapshot(&tmp);
    let mut s = Session::new(Surface::Note, &snap);

    s.type_text("see [[set");
    assert_eq!(s.labels(), vec!["Setup guide"]);
    assert!(s.state.items[0].drillable);

    s.type_text("#");
    assert_eq!(s.text(), "see [[Setup guide#");
    assert_eq!(s.labels(), vec!["Install", "Usage"]);

    s.type_text("u");
    assert_eq!(s.labels(), vec!["Usage"]);
    s.accept().unwrap();
    assert_eq!(s.text(), "see [[Setup guide#Usage]] ");
}

#[test]
fn hash_without_headings_is_literal() {
    let tmp = TempDir::new().unwrap();
    let snap = snapshot(&tmp);
    let mut s = Session::new(Surface::Note, &snap);

    s.type_text("[[Jour");
    assert_eq!(s.labels(), vec!["Journal"]);
    s.type_text("#");
    assert_eq!(s.text(), "[[Jour#");
}

#[test]
fn chaining_snippet_leaves_no_space() {
    let tmp = TempDir::new().unwrap();
    let snap = snapshot(&tmp);
    let mut s = Session::new(Surface::Note, &snap);

    s.type_text("make it /bo");
    assert_eq!(s.labels(), vec!["bold"]);
    s.accept().unwrap();
    assert_eq!(s.text(), "make it **");
    assert!(!s.state.active);
}

#[test]
fn quote_snippet_prepends_to_line() {
    let tmp = TempDir::new().unwrap();
    let snap = snapshot(&tmp);
    let mut s = Session::new(Surface::Note, &snap);

    s.type_text("intro\nShopping list /quo");
    assert_eq!(s.labels(), vec!["quote"]);
    s.accept().unwrap();
    assert_eq!(s.text(), "intro\n> Shopping list");
}

#[test]
fn abbreviation_from_config_expands() {
    let tmp = TempDir::new().unwrap();
    let snap = snapshot(&tmp);
    let mut s = Session::new(Surface::Note, &snap);

    s.type_text("Thanks @si");
    assert_eq!(s.labels(), vec!["@sig"]);
    assert_eq!(s.state.items[0].detail, "Best regards,");
    s.accept().unwrap();
    assert_eq!(s.text(), "Thanks Best regards,\nSam ");
}

#[test]
fn multi_word_date_filter() {
    let tmp = TempDir::new().unwrap();
    let snap = snapshot(&tmp);
    let mut s = Session::new(Surface::Search, &snap);

    s.type_text("created:3 d");
    assert_eq!(s.labels(), vec!["3 days ago"]);

    let mut s = Session::new(Surface::Search, &snap);
    s.type_text("#work created:yes");
    assert_eq!(s.labels(), vec!["yesterday"]);
    s.accept().unwrap();
    assert_eq!(s.text(), "#work created:2026-10-13 ");
}
