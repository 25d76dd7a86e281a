//! Default palette commands
//!
//! Commands capture the ids that are current when they are built, so the
//! set is rebuilt after every layout or tab change (see
//! [`Workspace::refresh_commands`]).

use crate::actions::WorkspaceAction;
use crate::keybindings::KeyBindingProfile;
use crate::ui::SidebarSide;
use crate::Workspace;
use core_types::Direction;
use services_command_palette::{Command, CommandDescriptor};

/// Builds the default command set for the workspace's current state
///
/// Shortcut labels come from the active keybinding profile.
pub fn default_commands(workspace: &Workspace) -> Vec<Command<WorkspaceAction>> {
    let keys = workspace.keybindings();
    let initial = workspace
        .active_tab()
        .map(|tab| tab.path.clone())
        .unwrap_or_else(|| workspace.settings().default_root.clone());
    let active_panel = workspace.grid().active_panel().map(|p| p.id);

    let mut commands = vec![
        command(
            keys,
            "open-folder",
            "Open Folder",
            &["directory", "path", "go"],
            WorkspaceAction::PromptOpenFolder {
                initial: String::new(),
            },
            WorkspaceAction::PromptOpenFolder { initial },
        ),
        command(
            keys,
            "toggle-sidebar-left",
            "Toggle Left Sidebar",
            &["explorer", "view"],
            WorkspaceAction::ToggleSidebar(SidebarSide::Left),
            WorkspaceAction::ToggleSidebar(SidebarSide::Left),
        ),
        command(
            keys,
            "toggle-sidebar-right",
            "Toggle Right Sidebar",
            &["config", "view"],
            WorkspaceAction::ToggleSidebar(SidebarSide::Right),
            WorkspaceAction::ToggleSidebar(SidebarSide::Right),
        ),
        command(
            keys,
            "create-panel",
            "Create Panel",
            &["new", "pane"],
            WorkspaceAction::CreatePanel,
            WorkspaceAction::CreatePanel,
        ),
        command(
            keys,
            "add-row-panel",
            "Add Row Panel",
            &["split", "below", "pane"],
            WorkspaceAction::AddRowPanel,
            WorkspaceAction::AddRowPanel,
        ),
        command(
            keys,
            "add-column-panel",
            "Add Column Panel",
            &["split", "right", "pane"],
            WorkspaceAction::AddColumnPanel,
            WorkspaceAction::AddColumnPanel,
        ),
        command(
            keys,
            "close-panel",
            "Close Panel",
            &["pane", "remove"],
            WorkspaceAction::ClosePanel(None),
            WorkspaceAction::ClosePanel(active_panel),
        ),
    ];

    for direction in Direction::ALL {
        let name = direction.name();
        commands.push(command(
            keys,
            &format!("focus-panel-{}", name),
            &format!("Focus Panel {}", capitalize(name)),
            &["pane", "move", name],
            WorkspaceAction::FocusPanel(direction),
            WorkspaceAction::FocusPanel(direction),
        ));
    }

    commands
}

/// Builds one command; `bound` is the action as written in the keymap
fn command(
    keys: &KeyBindingProfile,
    id: &str,
    title: &str,
    keywords: &[&str],
    bound: WorkspaceAction,
    action: WorkspaceAction,
) -> Command<WorkspaceAction> {
    let mut descriptor = CommandDescriptor::new(id, title).with_keywords(keywords.iter().copied());
    if let Some(label) = keys.label_for(&bound) {
        descriptor = descriptor.with_keybinding(label);
    }
    Command::new(descriptor, action)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
