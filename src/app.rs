use tracing::{debug, info};

use crate::config::ThemeMode;
use crate::drag::{DragAndDrop, DragController, DragSession};
use crate::icon::Icon;
use crate::input::Action;
use crate::kanban_board::{BoardStore, CardSlot, Category, CategorySelector, MoveOutcome};
use crate::task::Task;

/// Single-line text editing buffer.
///
/// `cursor` is a char index, always in `0..=char_count`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    pub input: String,
    pub cursor: usize,
}

impl TextBuffer {
    pub fn new(input: impl Into<String>) -> Self {
        let input = input.into();
        let cursor = input.chars().count();
        Self { input, cursor }
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.input.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_offset(self.cursor - 1);
            self.input.remove(at);
            self.cursor -= 1;
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.input.chars().count();
    }
}

/// Editable fields of the task detail view, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    Title,
    Status,
    Members,
    Labels,
    Notifications,
    Date,
    Description,
}

impl DetailField {
    pub const ALL: [DetailField; 7] = [
        Self::Title,
        Self::Status,
        Self::Members,
        Self::Labels,
        Self::Notifications,
        Self::Date,
        Self::Description,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Status => "Status",
            Self::Members => "Members",
            Self::Labels => "Labels",
            Self::Notifications => "Notifications",
            Self::Date => "Date",
            Self::Description => "Description",
        }
    }

    fn value(self, task: &Task) -> &str {
        match self {
            Self::Title => &task.title,
            Self::Status => &task.status,
            Self::Members => task.members(),
            Self::Labels => task.labels(),
            Self::Notifications => task.notifications(),
            Self::Date => task.date(),
            Self::Description => &task.description,
        }
    }
}

/// Local, uncommitted edit state for one task. Closing the view drops it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetail {
    pub task_id: u32,
    pub fields: Vec<(DetailField, TextBuffer)>,
    pub focused: usize,
}

impl TaskDetail {
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.id,
            fields: DetailField::ALL
                .iter()
                .map(|&f| (f, TextBuffer::new(f.value(task))))
                .collect(),
            focused: 0,
        }
    }

    #[cfg(test)]
    pub fn value(&self, field: DetailField) -> &str {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, buf)| buf.input.as_str())
            .unwrap_or_default()
    }

    /// Whether any buffer differs from the task as stored.
    pub fn is_dirty(&self, task: &Task) -> bool {
        self.fields.iter().any(|(f, buf)| buf.input != f.value(task))
    }

    fn focused_buf(&mut self) -> Option<&mut TextBuffer> {
        self.fields.get_mut(self.focused).map(|(_, buf)| buf)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    Workspaces,
    Recent,
    Starred,
    Templates,
}

impl MenuKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Workspaces => "Workspaces",
            Self::Recent => "Recent",
            Self::Starred => "Starred",
            Self::Templates => "Templates",
        }
    }
}

/// Navbar dropdown listing category names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavMenu {
    pub kind: MenuKind,
    pub items: Vec<String>,
    pub selected: usize,
}

/// Current interaction mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Dragging,
    Search { buf: TextBuffer },
    Detail(TaskDetail),
    Menu(NavMenu),
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Board,
}

/// Sidebar entries in display order. Reordering here never reorders the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarState {
    pub order: Vec<String>,
    pub selected: usize,
    pub collapsed: bool,
}

impl SidebarState {
    fn move_selected(&mut self, delta: isize) {
        let len = self.order.len();
        if len < 2 {
            return;
        }
        let to = (self.selected as isize + delta).clamp(0, len as isize - 1) as usize;
        if to != self.selected {
            self.order.swap(self.selected, to);
            self.selected = to;
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.order.iter().position(|n| n == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub level: NotificationLevel,
}

/// Startup choices taken from config and command line.
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub theme: ThemeMode,
    pub sidebar_collapsed: bool,
    pub initial_category: Option<String>,
}

/// Global application state.
pub struct App {
    pub store: BoardStore,
    pub selector: CategorySelector,
    pub sidebar: SidebarState,
    pub drag: DragController,
    pub mode: Mode,
    pub focus: Focus,
    pub focused_column: usize,
    pub selected_card: usize,
    pub search: String,
    pub theme: ThemeMode,
    pub notification: Option<Notification>,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: BoardStore, options: AppOptions) -> Self {
        let selector = CategorySelector::new(&store, options.initial_category.as_deref());
        let order: Vec<String> = store.category_names().map(str::to_string).collect();
        let selected = order
            .iter()
            .position(|n| n == selector.active())
            .unwrap_or(0);
        Self {
            store,
            selector,
            sidebar: SidebarState {
                order,
                selected,
                collapsed: options.sidebar_collapsed,
            },
            drag: DragController::default(),
            mode: Mode::Normal,
            focus: Focus::Board,
            focused_column: 0,
            selected_card: 0,
            search: String::new(),
            theme: options.theme,
            notification: None,
            should_quit: false,
        }
    }

    /// Name of the board on screen. While dragging this is the board under
    /// the hover target, which is not selected until the card lands there.
    pub fn viewed_category(&self) -> &str {
        match self.drag.session() {
            Some(session) => &session.target.category,
            None => self.selector.active(),
        }
    }

    pub fn active_category(&self) -> Option<&Category> {
        self.store.category(self.viewed_category())
    }

    /// Tasks of a column of the active category paired with their index in
    /// the store. The search filter applies except while dragging, where
    /// positions must match the real lists.
    pub fn visible_tasks(&self, column: usize) -> Vec<(usize, &Task)> {
        let Some(col) = self.active_category().and_then(|c| c.columns.get(column)) else {
            return Vec::new();
        };
        let filter = if self.drag.is_dragging() {
            ""
        } else {
            self.search.as_str()
        };
        col.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.matches(filter))
            .collect()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks(self.focused_column)
            .get(self.selected_card)
            .map(|(_, t)| *t)
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        self.notification = Some(Notification {
            text: text.into(),
            level: NotificationLevel::Info,
        });
    }

    pub fn notify_error(&mut self, text: impl Into<String>) {
        self.notification = Some(Notification {
            text: text.into(),
            level: NotificationLevel::Error,
        });
    }

    pub fn apply(&mut self, action: Action) {
        if action != Action::None {
            self.notification = None;
        }
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,

            // Board navigation
            Action::FocusPrevColumn => {
                if self.focused_column == 0 {
                    self.focus = Focus::Sidebar;
                } else {
                    self.focused_column -= 1;
                    self.clamp_selection();
                }
            }
            Action::FocusNextColumn => {
                let ncols = self.active_category().map_or(0, |c| c.columns.len());
                if self.focused_column + 1 < ncols {
                    self.focused_column += 1;
                    self.clamp_selection();
                }
            }
            Action::SelectPrevCard => self.selected_card = self.selected_card.saturating_sub(1),
            Action::SelectNextCard => {
                let len = self.visible_tasks(self.focused_column).len();
                if self.selected_card + 1 < len {
                    self.selected_card += 1;
                }
            }
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Sidebar => Focus::Board,
                    Focus::Board => Focus::Sidebar,
                };
            }
            Action::ToggleSidebar => self.sidebar.collapsed = !self.sidebar.collapsed,

            // Sidebar
            Action::SidebarUp => self.sidebar.selected = self.sidebar.selected.saturating_sub(1),
            Action::SidebarDown => {
                if self.sidebar.selected + 1 < self.sidebar.order.len() {
                    self.sidebar.selected += 1;
                }
            }
            Action::SidebarMoveUp => self.sidebar.move_selected(-1),
            Action::SidebarMoveDown => self.sidebar.move_selected(1),
            Action::SelectCategory => {
                if let Some(name) = self.sidebar.order.get(self.sidebar.selected).cloned() {
                    self.select_category(&name);
                    self.focus = Focus::Board;
                }
            }

            // Drag and drop
            Action::StartDrag => self.start_drag(),
            Action::HoverPrevColumn => self.hover_by(-1, 0),
            Action::HoverNextColumn => self.hover_by(1, 0),
            Action::HoverUp => self.hover_by(0, -1),
            Action::HoverDown => self.hover_by(0, 1),
            Action::HoverPrevCategory => self.hover_category(-1),
            Action::HoverNextCategory => self.hover_category(1),
            Action::Drop => self.drop_card(),
            Action::CancelDrag => {
                let session = self.drag.session().cloned();
                self.drag.on_cancel();
                self.mode = Mode::Normal;
                if let Some(session) = session {
                    self.return_to_source(&session);
                }
            }

            // Search
            Action::StartSearch => {
                self.mode = Mode::Search {
                    buf: TextBuffer::new(self.search.clone()),
                };
            }
            Action::ClearSearch => {
                self.search.clear();
                self.clamp_selection();
            }

            // Navbar, detail and help overlays
            Action::OpenMenu(kind) => self.open_menu(kind),
            Action::MenuUp => {
                if let Mode::Menu(menu) = &mut self.mode {
                    menu.selected = menu.selected.saturating_sub(1);
                }
            }
            Action::MenuDown => {
                if let Mode::Menu(menu) = &mut self.mode {
                    if menu.selected + 1 < menu.items.len() {
                        menu.selected += 1;
                    }
                }
            }
            Action::MenuConfirm => self.menu_confirm(),
            Action::OpenDetail => {
                if let Some(task) = self.selected_task() {
                    debug!(task_id = task.id, "opening task detail");
                    self.mode = Mode::Detail(TaskDetail::from_task(task));
                }
            }
            Action::DetailNextField => {
                if let Mode::Detail(detail) = &mut self.mode {
                    detail.focused = (detail.focused + 1) % detail.fields.len();
                }
            }
            Action::DetailPrevField => {
                if let Mode::Detail(detail) = &mut self.mode {
                    detail.focused = (detail.focused + detail.fields.len() - 1) % detail.fields.len();
                }
            }
            Action::DetailSave | Action::ClosePanel => self.close_panel(),
            Action::ToggleStar => {
                let name = self.selector.active().to_string();
                if self.selector.toggle_star(&name) {
                    self.notify(format!("Starred {name}"));
                } else {
                    self.notify(format!("Unstarred {name}"));
                }
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggle();
                info!(theme = self.theme.as_str(), "theme changed");
            }
            Action::ShowHelp => self.mode = Mode::Help,

            // Text input shared by search and detail
            Action::InputChar(c) => self.with_input(|buf| buf.insert(c)),
            Action::InputBackspace => self.with_input(TextBuffer::backspace),
            Action::InputLeft => self.with_input(TextBuffer::move_left),
            Action::InputRight => self.with_input(TextBuffer::move_right),
            Action::InputHome => self.with_input(TextBuffer::home),
            Action::InputEnd => self.with_input(TextBuffer::end),
            Action::InputConfirm => {
                if let Mode::Search { buf } = &self.mode {
                    self.search = buf.input.trim().to_string();
                    self.mode = Mode::Normal;
                    self.selected_card = 0;
                    self.clamp_selection();
                }
            }
            Action::InputCancel => {
                if matches!(self.mode, Mode::Search { .. }) {
                    self.mode = Mode::Normal;
                }
            }
        }
    }

    fn with_input(&mut self, edit: impl FnOnce(&mut TextBuffer)) {
        match &mut self.mode {
            Mode::Search { buf } => edit(buf),
            Mode::Detail(detail) => {
                if let Some(buf) = detail.focused_buf() {
                    edit(buf);
                }
            }
            _ => {}
        }
    }

    /// Leave any overlay. Detail edits are discarded, never written back.
    fn close_panel(&mut self) {
        if let Mode::Detail(detail) = &self.mode {
            let dirty = self
                .store
                .task(detail.task_id)
                .is_some_and(|t| detail.is_dirty(t));
            debug!(task_id = detail.task_id, dirty, "closing task detail");
        }
        self.mode = Mode::Normal;
    }

    fn select_category(&mut self, name: &str) {
        let active = self.selector.select(&self.store, name).to_string();
        if let Some(pos) = self.sidebar.position(&active) {
            self.sidebar.selected = pos;
        }
        self.focused_column = 0;
        self.selected_card = 0;
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let ncols = self.active_category().map_or(0, |c| c.columns.len());
        self.focused_column = self.focused_column.min(ncols.saturating_sub(1));
        let len = self.visible_tasks(self.focused_column).len();
        self.selected_card = self.selected_card.min(len.saturating_sub(1));
    }

    fn open_menu(&mut self, kind: MenuKind) {
        let items: Vec<String> = match kind {
            MenuKind::Workspaces => self.sidebar.order.clone(),
            MenuKind::Recent => self.selector.recent().to_vec(),
            MenuKind::Starred => self.selector.starred().map(str::to_string).collect(),
            MenuKind::Templates => self
                .sidebar
                .order
                .iter()
                .filter(|name| {
                    self.store
                        .category(name)
                        .is_some_and(|c| c.icon == Icon::LayoutTemplate)
                })
                .cloned()
                .collect(),
        };
        if items.is_empty() {
            self.notify(format!("No {} boards", kind.title().to_lowercase()));
            return;
        }
        self.mode = Mode::Menu(NavMenu {
            kind,
            items,
            selected: 0,
        });
    }

    fn menu_confirm(&mut self) {
        let Mode::Menu(menu) = &self.mode else {
            return;
        };
        let choice = menu.items.get(menu.selected).cloned();
        self.mode = Mode::Normal;
        if let Some(name) = choice {
            self.select_category(&name);
        }
    }

    fn start_drag(&mut self) {
        let Some(category) = self.active_category() else {
            return;
        };
        let Some(column) = category.columns.get(self.focused_column) else {
            return;
        };
        let Some(&(index, _)) = self.visible_tasks(self.focused_column).get(self.selected_card)
        else {
            return;
        };
        let slot = CardSlot::new(&category.name, &column.key, index);
        match self.drag.on_drag_start(&self.store, slot) {
            Ok(()) => {
                self.mode = Mode::Dragging;
                self.selected_card = index;
            }
            Err(e) => self.notify_error(format!("Cannot drag: {e}")),
        }
    }

    /// Largest insertion index for `column`. Inside the source list the card
    /// is removed first, so one fewer slot exists.
    fn max_hover_index(&self, source: &CardSlot, category: &str, column: &str) -> usize {
        let len = self.store.column(category, column).map_or(0, <[Task]>::len);
        if source.category == category && source.column == column {
            len.saturating_sub(1)
        } else {
            len
        }
    }

    fn hover_by(&mut self, dcol: isize, didx: isize) {
        let Some(session) = self.drag.session() else {
            return;
        };
        let (source, target) = (session.source.clone(), session.target.clone());
        let Some(category) = self.store.category(&target.category) else {
            return;
        };
        if category.columns.is_empty() {
            return;
        }
        let current = category.column_index(&target.column).unwrap_or(0);
        let col = (current as isize + dcol).clamp(0, category.columns.len() as isize - 1) as usize;
        let key = category.columns[col].key.clone();
        let max = self.max_hover_index(&source, &target.category, &key);
        let index = (target.index as isize + didx).clamp(0, max as isize) as usize;

        self.drag
            .on_hover_over_target(CardSlot::new(target.category, key, index));
        self.focused_column = col;
        self.selected_card = index;
    }

    fn hover_category(&mut self, delta: isize) {
        let Some(session) = self.drag.session() else {
            return;
        };
        let (source, target) = (session.source.clone(), session.target.clone());
        let Some(current) = self.sidebar.position(&target.category) else {
            return;
        };
        let len = self.sidebar.order.len() as isize;
        let next = (current as isize + delta).rem_euclid(len) as usize;
        let name = self.sidebar.order[next].clone();

        let Some(category) = self.store.category(&name) else {
            return;
        };
        let Some(col) = category
            .column_index(&target.column)
            .or_else(|| (!category.columns.is_empty()).then_some(0))
        else {
            self.notify_error(format!("{name} has no columns"));
            return;
        };
        let key = category.columns[col].key.clone();
        let max = self.max_hover_index(&source, &name, &key);
        let index = target.index.min(max);

        self.drag
            .on_hover_over_target(CardSlot::new(name, key, index));
        self.sidebar.selected = next;
        self.focused_column = col;
        self.selected_card = index;
    }

    fn drop_card(&mut self) {
        self.mode = Mode::Normal;
        let Some(session) = self.drag.session().cloned() else {
            return;
        };
        match self.drag.on_drop(&mut self.store) {
            Ok(Some(outcome)) => self.focus_outcome(&outcome),
            Ok(None) => self.return_to_source(&session),
            Err(e) => {
                self.notify_error(format!("Drop refused: {e}"));
                self.return_to_source(&session);
            }
        }
    }

    /// Back to the board the drag started on, with the dragged card selected
    /// in the (possibly filtered) list.
    fn return_to_source(&mut self, session: &DragSession) {
        if let Some(pos) = self.sidebar.position(self.selector.active()) {
            self.sidebar.selected = pos;
        }
        self.focused_column = self
            .active_category()
            .and_then(|c| c.column_index(&session.source.column))
            .unwrap_or(0);
        self.selected_card = self
            .visible_tasks(self.focused_column)
            .iter()
            .position(|(_, t)| t.id == session.task_id)
            .unwrap_or(0);
        self.clamp_selection();
    }

    fn focus_outcome(&mut self, outcome: &MoveOutcome) {
        let slot = self
            .store
            .locate(outcome.task_id)
            .unwrap_or_else(|| outcome.to.clone());
        let active = self.selector.select(&self.store, &slot.category).to_string();
        if let Some(pos) = self.sidebar.position(&active) {
            self.sidebar.selected = pos;
        }
        let column = self
            .active_category()
            .and_then(|c| c.column_index(&slot.column))
            .unwrap_or(0);
        self.focused_column = column;
        self.selected_card = self
            .visible_tasks(column)
            .iter()
            .position(|(_, t)| t.id == outcome.task_id)
            .unwrap_or(0);

        let title = self
            .active_category()
            .and_then(|c| c.columns.get(column))
            .map(|c| c.title.clone())
            .unwrap_or_default();
        if let Some(task) = self.store.task(outcome.task_id) {
            let text = format!("Moved '{}' to {title}", task.title);
            self.notify(text);
        }
    }
}
