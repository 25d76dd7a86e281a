//! End-to-end workspace behaviour over an in-memory file system

use core_types::{Direction, GridPosition, PanelId, TabId};
use fs_view::FakeDirectoryAccess;
use input_types::{EventTarget, KeyCode, KeyEvent, Modifiers};
use services_command_palette::PaletteMode;
use services_file_listing::{ListingKey, SortKey, SortOrder};
use services_notification::ToastLevel;
use services_settings::WorkspaceSettings;
use services_workspace_manager::{
    KeyOutcome, NavIntent, SidebarSide, Workspace, WorkspaceAction, WorkspaceError,
};

fn fixture() -> FakeDirectoryAccess {
    let fake = FakeDirectoryAccess::new();
    fake.add_dir("/home/ana/Documents/reports");
    fake.add_dir("/home/ana/Downloads");
    fake.add_file("/home/ana", "todo.md", 120, 1_700_000_000);
    fake.add_file("/home/ana", "Archive.zip", 4_096, 1_600_000_000);
    fake.add_file("/home/ana/Documents", "cv.pdf", 2_048, 1_650_000_000);
    fake
}

fn workspace_with(fake: &FakeDirectoryAccess) -> Workspace {
    let settings = WorkspaceSettings::with_home("/home/ana").with_default_root("/home/ana");
    Workspace::new(settings, fake.clone())
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::plain(code)
}

fn chord(code: KeyCode, modifiers: Modifiers) -> KeyEvent {
    KeyEvent::pressed(code, modifiers)
}

fn names(ws: &Workspace) -> Vec<String> {
    let key = ws.active_key().unwrap();
    ws.listings()
        .sorted_files(key)
        .into_iter()
        .map(|e| e.name)
        .collect()
}

#[test]
fn test_first_panel_lists_default_root() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    let panel = ws.create_panel().unwrap();

    assert_eq!(ws.grid().panel(panel).unwrap().position, GridPosition::ORIGIN);
    assert_eq!(ws.active_tab().unwrap().title, "ana");
    assert_eq!(
        names(&ws),
        vec!["..", "Documents", "Downloads", "Archive.zip", "todo.md"]
    );
}

#[test]
fn test_open_tab_activates_and_loads() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    let panel = ws.create_panel().unwrap();
    let first = ws.active_key().unwrap();

    let tab = ws.open_tab("/home/ana/Documents").unwrap();

    assert_eq!(ws.tabs().tab_count(panel), 2);
    assert_eq!(ws.active_key().unwrap().tab, tab);
    assert_eq!(ws.grid().panel(panel).unwrap().active_tab_id, Some(tab));
    assert_eq!(ws.active_tab().unwrap().title, "Documents");
    assert!(!ws.tabs().tab(panel, first.tab).unwrap().is_active);
    assert_eq!(names(&ws), vec!["..", "reports", "cv.pdf"]);
}

#[test]
fn test_move_directory_updates_tab() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    ws.create_panel().unwrap();
    let key = ws.active_key().unwrap();

    ws.move_directory(key, "/home/ana/Downloads").unwrap();

    let tab = ws.tabs().tab(key.panel, key.tab).unwrap();
    assert_eq!(tab.title, "Downloads");
    assert_eq!(tab.path, "/home/ana/Downloads");
    assert_eq!(ws.listings().state(key).current_dir, "/home/ana/Downloads");
}

#[test]
fn test_failed_load_keeps_listing_and_raises_toast() {
    let fake = fixture();
    fake.add_dir("/home/ana/private").deny("/home/ana/private");
    let mut ws = workspace_with(&fake);
    ws.create_panel().unwrap();
    let key = ws.active_key().unwrap();
    let before = ws.listings().state(key);

    let err = ws.move_directory(key, "/home/ana/private").unwrap_err();

    assert!(matches!(err, WorkspaceError::Listing(_)));
    assert_eq!(ws.listings().state(key), before);
    let tab = ws.tabs().tab(key.panel, key.tab).unwrap();
    assert_eq!(tab.path, "/home/ana");
    assert_eq!(tab.title, "ana");

    let toast = ws.notifications().latest().unwrap();
    assert_eq!(toast.level, ToastLevel::Error);
    assert!(toast.message.contains("/home/ana/private"));
}

#[test]
fn test_load_resets_sort() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    ws.create_panel().unwrap();
    let key = ws.active_key().unwrap();

    ws.set_sort(key, SortKey::Size, SortOrder::Desc);
    assert_eq!(
        names(&ws),
        vec!["..", "Documents", "Downloads", "Archive.zip", "todo.md"]
    );

    ws.move_directory(key, "/home/ana/Documents").unwrap();
    let state = ws.listings().state(key);
    assert_eq!(state.sort_key, SortKey::Name);
    assert_eq!(state.sort_order, SortOrder::Asc);
}

#[test]
fn test_close_tab_evicts_listing() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    let panel = ws.create_panel().unwrap();
    let first = ws.active_key().unwrap();
    ws.open_tab("/home/ana/Downloads").unwrap();
    let second = ws.active_key().unwrap();

    ws.close_tab(second);

    assert!(!ws.listings().contains(second));
    assert!(ws.listings().contains(first));
    assert_eq!(ws.active_key().unwrap(), first);
    assert_eq!(ws.grid().panel(panel).unwrap().active_tab_id, Some(first.tab));
}

#[test]
fn test_closing_last_tab_leaves_empty_panel() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    let panel = ws.create_panel().unwrap();
    let key = ws.active_key().unwrap();

    ws.close_tab(key);

    assert_eq!(ws.tabs().tab_count(panel), 0);
    assert_eq!(ws.grid().panel(panel).unwrap().active_tab_id, None);
    assert_eq!(ws.active_key(), Err(WorkspaceError::NoActiveTab(panel)));
}

#[test]
fn test_switch_tab_mirrors_panel() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    let panel = ws.create_panel().unwrap();
    let first = ws.active_key().unwrap();
    ws.open_tab("/home/ana/Downloads").unwrap();

    ws.switch_tab(first);

    assert_eq!(ws.active_key().unwrap(), first);
    assert_eq!(ws.grid().panel(panel).unwrap().active_tab_id, Some(first.tab));
}

#[test]
fn test_panel_layout_operations() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);

    let origin = ws.create_panel().unwrap();
    let right = ws.add_column_panel().unwrap().unwrap();
    assert_eq!(ws.grid().panel(right).unwrap().position, GridPosition::new(0, 1));

    ws.set_active_panel(origin);
    assert_eq!(ws.add_column_panel().unwrap(), None);

    let below = ws.add_row_panel().unwrap().unwrap();
    assert_eq!(ws.grid().panel(below).unwrap().position, GridPosition::new(1, 0));

    let next = ws.create_panel().unwrap();
    assert_eq!(ws.grid().panel(next).unwrap().position, GridPosition::new(1, 1));
    assert_eq!(ws.grid().len(), 4);
}

#[test]
fn test_close_panel_drops_tabs_and_listings() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    let first = ws.create_panel().unwrap();
    let second = ws.create_panel().unwrap();
    let key = ws.active_key().unwrap();
    assert_eq!(key.panel, second);

    ws.close_panel(None).unwrap();

    assert!(ws.grid().panel(second).is_none());
    assert_eq!(ws.tabs().tab_count(second), 0);
    assert!(!ws.listings().contains(key));
    assert_eq!(ws.grid().active_panel_id(), Some(first));

    ws.close_panel(Some(first)).unwrap();
    assert!(ws.grid().is_empty());
    assert!(ws.listings().is_empty());
    assert!(!ws.focus().has_panel_scope());
}

#[test]
fn test_focus_moves_between_adjacent_panels() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    let origin = ws.create_panel().unwrap();
    let right = ws.add_column_panel().unwrap().unwrap();

    assert!(ws.focus_panel(Direction::Left));
    assert_eq!(ws.grid().active_panel_id(), Some(origin));
    assert!(!ws.focus_panel(Direction::Up));
    assert!(ws.focus_panel(Direction::Right));
    assert_eq!(ws.grid().active_panel_id(), Some(right));
}

#[test]
fn test_focus_keys_route_to_commands() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    let origin = ws.create_panel().unwrap();
    ws.add_column_panel().unwrap();

    let ctrl_alt = Modifiers::CTRL.with(Modifiers::ALT);
    let outcome = ws.handle_key(&chord(KeyCode::Left, ctrl_alt), EventTarget::Other);

    assert_eq!(outcome, KeyOutcome::Handled);
    assert_eq!(ws.grid().active_panel_id(), Some(origin));
}

#[test]
fn test_arrow_keys_navigate_active_listing() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    ws.create_panel().unwrap();
    let key = ws.active_key().unwrap();

    for _ in 0..3 {
        assert_eq!(ws.handle_key(&press(KeyCode::Down), EventTarget::Other), KeyOutcome::Handled);
    }
    assert_eq!(ws.listings().state(key).selected_index, Some(2));

    ws.handle_key(&press(KeyCode::End), EventTarget::Other);
    assert_eq!(ws.listings().state(key).selected_index, Some(4));
    ws.handle_key(&press(KeyCode::Down), EventTarget::Other);
    assert_eq!(ws.listings().state(key).selected_index, Some(0));
    ws.handle_key(&press(KeyCode::Up), EventTarget::Other);
    assert_eq!(ws.listings().state(key).selected_index, Some(4));
    ws.handle_key(&press(KeyCode::Escape), EventTarget::Other);
    assert_eq!(ws.listings().state(key).selected_index, None);
}

#[test]
fn test_typing_in_text_input_does_not_navigate() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    ws.create_panel().unwrap();
    let key = ws.active_key().unwrap();

    let outcome = ws.handle_key(&press(KeyCode::Down), EventTarget::TextInput);

    assert_eq!(outcome, KeyOutcome::Ignored);
    assert_eq!(ws.listings().state(key).selected_index, None);
}

#[test]
fn test_enter_and_backspace_walk_directories() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    ws.create_panel().unwrap();
    let key = ws.active_key().unwrap();

    // "..", Documents, ...
    ws.navigate(NavIntent::Next).unwrap();
    ws.navigate(NavIntent::Next).unwrap();
    ws.handle_key(&press(KeyCode::Enter), EventTarget::Other);
    assert_eq!(ws.listings().state(key).current_dir, "/home/ana/Documents");
    assert_eq!(ws.active_tab().unwrap().title, "Documents");

    ws.handle_key(&press(KeyCode::Backspace), EventTarget::Other);
    assert_eq!(ws.listings().state(key).current_dir, "/home/ana");

    let alt_up = chord(KeyCode::Up, Modifiers::ALT);
    ws.handle_key(&alt_up, EventTarget::Other);
    assert_eq!(ws.listings().state(key).current_dir, "/home");
}

#[test]
fn test_root_listing_has_no_parent_entry() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    ws.create_panel().unwrap();
    let key = ws.active_key().unwrap();

    ws.move_directory(key, "/").unwrap();
    assert_eq!(names(&ws), vec!["home"]);

    ws.navigate(NavIntent::Parent).unwrap();
    assert_eq!(ws.listings().state(key).current_dir, "/");
}

#[test]
fn test_page_keys_clamp() {
    let fake = fixture();
    for i in 0..25 {
        fake.add_file("/big", &format!("f{:02}.txt", i), 1, 1);
    }
    let settings = WorkspaceSettings::default()
        .with_default_root("/big")
        .with_page_size(10);
    let mut ws = Workspace::new(settings, fake.clone());
    ws.create_panel().unwrap();
    let key = ws.active_key().unwrap();
    let count = ws.listings().state(key).files.len();
    assert_eq!(count, 26);

    ws.handle_key(&press(KeyCode::PageDown), EventTarget::Other);
    assert_eq!(ws.listings().state(key).selected_index, Some(9));
    ws.handle_key(&press(KeyCode::PageDown), EventTarget::Other);
    ws.handle_key(&press(KeyCode::PageDown), EventTarget::Other);
    assert_eq!(ws.listings().state(key).selected_index, Some(25));
    ws.handle_key(&press(KeyCode::PageUp), EventTarget::Other);
    assert_eq!(ws.listings().state(key).selected_index, Some(15));
    ws.handle_key(&press(KeyCode::Home), EventTarget::Other);
    assert_eq!(ws.listings().state(key).selected_index, Some(0));
}

#[test]
fn test_palette_modal_captures_navigation_keys() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    ws.create_panel().unwrap();
    let key = ws.active_key().unwrap();

    let ctrl_shift = Modifiers::CTRL.with(Modifiers::SHIFT);
    ws.handle_key(&chord(KeyCode::Char('p'), ctrl_shift), EventTarget::Other);
    assert!(ws.palette_visible());
    assert_eq!(ws.palette().mode(), PaletteMode::Command);

    ws.handle_key(&press(KeyCode::Down), EventTarget::Other);
    assert_eq!(ws.palette().selected_index(), Some(1));
    assert_eq!(ws.listings().state(key).selected_index, None);

    ws.handle_key(&press(KeyCode::Escape), EventTarget::Other);
    assert!(!ws.palette_visible());
}

#[test]
fn test_palette_shortcut_works_under_modal() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    ws.create_panel().unwrap();

    let ctrl_shift = Modifiers::CTRL.with(Modifiers::SHIFT);
    ws.handle_key(&chord(KeyCode::Char('p'), ctrl_shift), EventTarget::Other);
    assert_eq!(ws.palette().mode(), PaletteMode::Command);

    // Switch to search mode while the palette is open
    ws.handle_key(&chord(KeyCode::Char('p'), Modifiers::CTRL), EventTarget::TextInput);
    assert!(ws.palette_visible());
    assert_eq!(ws.palette().mode(), PaletteMode::Search);

    // Same shortcut again closes it
    ws.handle_key(&chord(KeyCode::Char('p'), Modifiers::CTRL), EventTarget::TextInput);
    assert!(!ws.palette_visible());
}

#[test]
fn test_non_global_commands_blocked_by_modal() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    ws.create_panel().unwrap();
    ws.open_command_palette(PaletteMode::Command);

    let outcome = ws.handle_key(&chord(KeyCode::Char('b'), Modifiers::CTRL), EventTarget::Other);

    assert_eq!(outcome, KeyOutcome::Ignored);
    assert!(!ws.ui().left.visible);
}

#[test]
fn test_palette_command_executes_action() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    ws.create_panel().unwrap();

    ws.open_command_palette(PaletteMode::Command);
    ws.set_palette_query(">left sidebar");
    assert_eq!(
        ws.palette().selected_action(),
        Some(&WorkspaceAction::ToggleSidebar(SidebarSide::Left))
    );

    ws.handle_key(&press(KeyCode::Enter), EventTarget::TextInput);

    assert!(ws.ui().left.visible);
    assert!(!ws.palette_visible());
    assert_eq!(ws.palette().query(), "");
}

#[test]
fn test_palette_search_opens_directory() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    ws.create_panel().unwrap();
    let key = ws.active_key().unwrap();

    ws.open_command_palette(PaletteMode::Search);
    ws.set_palette_query("down");
    assert_eq!(ws.palette_file_matches().len(), 1);
    ws.handle_key(&press(KeyCode::Down), EventTarget::TextInput);

    assert_eq!(ws.execute_palette_selection(), Ok(()));
    assert_eq!(ws.listings().state(key).current_dir, "/home/ana/Downloads");
    assert!(!ws.palette_visible());
}

#[test]
fn test_palette_search_enter_without_selection() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    ws.create_panel().unwrap();
    let key = ws.active_key().unwrap();

    ws.handle_key(&chord(KeyCode::Char('p'), Modifiers::CTRL), EventTarget::Other);
    assert_eq!(ws.palette().mode(), PaletteMode::Search);
    assert_eq!(ws.palette().selected_index(), None);

    let outcome = ws.handle_key(&press(KeyCode::Enter), EventTarget::TextInput);
    assert_eq!(outcome, KeyOutcome::Ignored);
    assert_eq!(ws.listings().state(key).current_dir, "/home/ana");
    assert!(ws.palette_visible());

    ws.set_palette_query("doc");
    ws.handle_key(&press(KeyCode::Down), EventTarget::TextInput);
    assert_eq!(ws.palette().selected_index(), Some(0));
    let outcome = ws.handle_key(&press(KeyCode::Enter), EventTarget::TextInput);

    assert_eq!(outcome, KeyOutcome::Handled);
    assert_eq!(ws.listings().state(key).current_dir, "/home/ana/Documents");
    assert!(!ws.palette_visible());
}

#[test]
fn test_open_folder_prompt_expands_alias() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    let panel = ws.create_panel().unwrap();

    ws.open_command_palette(PaletteMode::Command);
    ws.set_palette_query(">open folder");
    ws.execute_palette_selection().unwrap();

    assert!(ws.prompt_visible());
    assert!(!ws.palette_visible());
    assert_eq!(ws.prompt_input(), "/home/ana");
    assert_eq!(ws.palette().prompt().unwrap().title, "Open Folder");

    ws.set_prompt_input("@documents/reports");
    let outcome = ws.handle_key(&press(KeyCode::Enter), EventTarget::TextInput);

    assert_eq!(outcome, KeyOutcome::Handled);
    assert!(!ws.prompt_visible());
    assert_eq!(ws.tabs().tab_count(panel), 2);
    assert_eq!(ws.active_tab().unwrap().path, "/home/ana/Documents/reports");
    assert_eq!(ws.active_tab().unwrap().title, "reports");
}

#[test]
fn test_prompt_escape_cancels() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    let panel = ws.create_panel().unwrap();

    ws.dispatch(WorkspaceAction::PromptOpenFolder {
        initial: "/home".to_string(),
    })
    .unwrap();
    ws.handle_key(&press(KeyCode::Escape), EventTarget::TextInput);

    assert!(!ws.prompt_visible());
    assert!(ws.palette().prompt().is_none());
    assert_eq!(ws.tabs().tab_count(panel), 1);
}

#[test]
fn test_sidebar_shortcuts() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);

    ws.handle_key(&chord(KeyCode::Char('b'), Modifiers::CTRL), EventTarget::Other);
    assert!(ws.ui().left.visible);

    let ctrl_alt = Modifiers::CTRL.with(Modifiers::ALT);
    ws.handle_key(&chord(KeyCode::Char('b'), ctrl_alt), EventTarget::Other);
    assert!(ws.ui().right.visible);

    ws.set_sidebar_tab(SidebarSide::Left, "search");
    assert_eq!(ws.ui().left.active_tab, "search");
}

#[test]
fn test_meta_shortcuts_behave_like_ctrl() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);

    ws.handle_key(&chord(KeyCode::Char('n'), Modifiers::META), EventTarget::Other);
    assert_eq!(ws.grid().len(), 1);
}

#[test]
fn test_failed_key_action_reports_error() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);

    let outcome = ws.handle_key(&chord(KeyCode::Char('w'), Modifiers::CTRL), EventTarget::Other);
    assert_eq!(outcome, KeyOutcome::Failed(WorkspaceError::NoActivePanel));
}

#[test]
fn test_command_registration_is_idempotent() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    ws.create_panel().unwrap();
    ws.add_row_panel().unwrap();

    let first: Vec<String> = ws.palette().commands().iter().map(|c| c.id().to_string()).collect();
    ws.refresh_commands();
    ws.refresh_commands();
    let second: Vec<String> = ws.palette().commands().iter().map(|c| c.id().to_string()).collect();

    assert_eq!(first, second);
}

#[test]
fn test_stale_ids_are_silent() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    let panel = ws.create_panel().unwrap();
    let key = ws.active_key().unwrap();
    ws.close_panel(Some(panel)).unwrap();

    ws.close_tab(key);
    ws.switch_tab(key);
    assert_eq!(ws.move_directory(key, "/home"), Ok(()));
    assert!(ws.close_panel(Some(panel)).is_ok());
    assert!(ws.listings().is_empty());
}

#[test]
fn test_stale_ids_leave_live_state_unchanged() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    let first = ws.create_panel().unwrap();
    let second = ws.add_column_panel().unwrap().unwrap();
    ws.set_active_panel(second);
    ws.open_tab("/home/ana/Documents").unwrap();
    let live = ws.active_key().unwrap();

    let panels = ws.grid().panels().to_vec();
    let first_tabs = ws.tabs().tabs_by_panel(first).to_vec();
    let second_tabs = ws.tabs().tabs_by_panel(second).to_vec();
    let listing_count = ws.listings().len();
    let live_listing = ws.listings().get(live).cloned();

    let ghost_panel = PanelId::new();
    let ghost_tab = ListingKey::new(second, TabId::new());
    ws.close_tab(ghost_tab);
    ws.switch_tab(ListingKey::new(ghost_panel, live.tab));
    assert_eq!(ws.move_directory(ghost_tab, "/home"), Ok(()));

    assert_eq!(ws.grid().panels(), panels.as_slice());
    assert_eq!(ws.grid().active_panel_id(), Some(second));
    assert_eq!(ws.tabs().tabs_by_panel(first), first_tabs.as_slice());
    assert_eq!(ws.tabs().tabs_by_panel(second), second_tabs.as_slice());
    assert_eq!(ws.listings().len(), listing_count);
    assert_eq!(ws.listings().get(live).cloned(), live_listing);

    // Removing an unknown panel only resets the active panel to the first one
    assert_eq!(ws.close_panel(Some(ghost_panel)), Ok(()));
    assert_eq!(ws.grid().panels(), panels.as_slice());
    assert_eq!(ws.grid().active_panel_id(), Some(first));
    assert_eq!(ws.tabs().tabs_by_panel(second), second_tabs.as_slice());
    assert_eq!(ws.listings().len(), listing_count);
    assert_eq!(ws.listings().get(live).cloned(), live_listing);
}

#[test]
fn test_error_toast_outlives_earlier_ticks() {
    let fake = fixture();
    let mut ws = workspace_with(&fake);
    ws.create_panel().unwrap();
    let key = ws.active_key().unwrap();

    ws.tick(5_000);
    assert!(ws.move_directory(key, "/missing").is_err());
    assert_eq!(ws.notifications().active()[0].created_at_ms, 5_000);

    ws.tick(5_001);
    assert_eq!(ws.notifications().active().len(), 1);

    ws.tick(6_000);
    assert!(ws.notifications().active().is_empty());
}
