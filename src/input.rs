use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Focus, MenuKind, Mode};

/// Everything a key press can ask the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Board navigation
    FocusPrevColumn,
    FocusNextColumn,
    SelectPrevCard,
    SelectNextCard,
    ToggleFocus,
    ToggleSidebar,

    // Sidebar
    SidebarUp,
    SidebarDown,
    SidebarMoveUp,
    SidebarMoveDown,
    SelectCategory,

    // Drag and drop
    StartDrag,
    HoverPrevColumn,
    HoverNextColumn,
    HoverUp,
    HoverDown,
    HoverPrevCategory,
    HoverNextCategory,
    Drop,
    CancelDrag,

    // Navbar
    StartSearch,
    ClearSearch,
    OpenMenu(MenuKind),
    MenuUp,
    MenuDown,
    MenuConfirm,
    ToggleStar,
    ToggleTheme,
    ShowHelp,

    // Task detail
    OpenDetail,
    DetailNextField,
    DetailPrevField,
    DetailSave,
    ClosePanel,

    // Text input
    InputChar(char),
    InputBackspace,
    InputLeft,
    InputRight,
    InputHome,
    InputEnd,
    InputConfirm,
    InputCancel,

    Quit,
    None,
}

/// Map a key event to an action for the current mode and focus.
pub fn map_key(key: KeyEvent, mode: &Mode, focus: Focus) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    match mode {
        Mode::Normal => match focus {
            Focus::Board => map_board(key),
            Focus::Sidebar => map_sidebar(key),
        },
        Mode::Dragging => map_drag(key),
        Mode::Search { .. } => map_input(key),
        Mode::Detail(_) => map_detail(key),
        Mode::Menu(_) => match key.code {
            KeyCode::Char('j') | KeyCode::Down => Action::MenuDown,
            KeyCode::Char('k') | KeyCode::Up => Action::MenuUp,
            KeyCode::Enter => Action::MenuConfirm,
            KeyCode::Esc | KeyCode::Char('q') => Action::ClosePanel,
            _ => Action::None,
        },
        Mode::Help => match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Action::ClosePanel,
            _ => Action::None,
        },
    }
}

/// Keys shared by the board and the sidebar.
fn map_global(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Tab => Action::ToggleFocus,
        KeyCode::Char('b') => Action::ToggleSidebar,
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Char('w') => Action::OpenMenu(MenuKind::Workspaces),
        KeyCode::Char('r') => Action::OpenMenu(MenuKind::Recent),
        KeyCode::Char('s') => Action::OpenMenu(MenuKind::Starred),
        KeyCode::Char('p') => Action::OpenMenu(MenuKind::Templates),
        KeyCode::Char('*') => Action::ToggleStar,
        KeyCode::Char('t') => Action::ToggleTheme,
        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Esc => Action::ClearSearch,
        _ => Action::None,
    }
}

fn map_board(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => Action::FocusPrevColumn,
        KeyCode::Char('l') | KeyCode::Right => Action::FocusNextColumn,
        KeyCode::Char('j') | KeyCode::Down => Action::SelectNextCard,
        KeyCode::Char('k') | KeyCode::Up => Action::SelectPrevCard,
        KeyCode::Enter => Action::OpenDetail,
        KeyCode::Char(' ') => Action::StartDrag,
        _ => map_global(key),
    }
}

fn map_sidebar(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::SidebarDown,
        KeyCode::Char('k') | KeyCode::Up => Action::SidebarUp,
        KeyCode::Char('J') => Action::SidebarMoveDown,
        KeyCode::Char('K') => Action::SidebarMoveUp,
        KeyCode::Enter => Action::SelectCategory,
        KeyCode::Char('l') | KeyCode::Right => Action::ToggleFocus,
        _ => map_global(key),
    }
}

fn map_drag(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => Action::HoverPrevColumn,
        KeyCode::Char('l') | KeyCode::Right => Action::HoverNextColumn,
        KeyCode::Char('j') | KeyCode::Down => Action::HoverDown,
        KeyCode::Char('k') | KeyCode::Up => Action::HoverUp,
        KeyCode::Char('[') => Action::HoverPrevCategory,
        KeyCode::Char(']') => Action::HoverNextCategory,
        KeyCode::Char(' ') | KeyCode::Enter => Action::Drop,
        KeyCode::Esc => Action::CancelDrag,
        _ => Action::None,
    }
}

fn map_detail(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::ClosePanel,
        KeyCode::Tab | KeyCode::Down => Action::DetailNextField,
        KeyCode::BackTab | KeyCode::Up => Action::DetailPrevField,
        KeyCode::Enter => Action::DetailSave,
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::DetailSave,
        _ => map_text(key),
    }
}

fn map_input(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::InputConfirm,
        KeyCode::Esc => Action::InputCancel,
        _ => map_text(key),
    }
}

fn map_text(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Left => Action::InputLeft,
        KeyCode::Right => Action::InputRight,
        KeyCode::Home => Action::InputHome,
        KeyCode::End => Action::InputEnd,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Action::InputChar(c),
        _ => Action::None,
    }
}
