use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{fresh_id, Persist, Store};

pub const UI_STORE: &str = "ui-store";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarState {
    pub is_collapsed: bool,
    pub active_section: String,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self {
            is_collapsed: false,
            active_section: "dashboard".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub action_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    sidebar: SidebarState,
    notifications: Vec<Notification>,
    unread_count: usize,
    theme: Theme,
}

/// Sidebar and theme survive restarts; notifications do not.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSnapshot {
    pub sidebar: SidebarState,
    pub theme: Theme,
}

impl Persist for UiState {
    const KEY: &'static str = UI_STORE;
    type Snapshot = UiSnapshot;

    fn snapshot(&self) -> UiSnapshot {
        UiSnapshot {
            sidebar: self.sidebar.clone(),
            theme: self.theme,
        }
    }

    fn restore(&mut self, snapshot: UiSnapshot) {
        self.sidebar = snapshot.sidebar;
        self.theme = snapshot.theme;
    }
}

impl UiState {
    pub fn sidebar(&self) -> &SidebarState {
        &self.sidebar
    }

    /// Newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.unread_count
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    fn push_notification(&mut self, new: NewNotification) -> Notification {
        let id = fresh_id(|c| self.notifications.iter().any(|n| n.id == c));
        let n = Notification {
            id,
            title: new.title,
            message: new.message,
            kind: new.kind,
            timestamp: new.timestamp.unwrap_or_else(Utc::now),
            read: false,
            action_url: new.action_url,
        };
        self.notifications.insert(0, n.clone());
        self.unread_count += 1;
        n
    }

    fn read_one(&mut self, id: &str) -> Option<()> {
        let n = self.notifications.iter_mut().find(|n| n.id == id)?;
        if !n.read {
            n.read = true;
            self.unread_count = self.unread_count.saturating_sub(1);
        }
        Some(())
    }
}

impl Store<UiState> {
    pub fn add_notification(&mut self, new: NewNotification) -> Notification {
        self.set(|s| s.push_notification(new))
    }

    /// False for an unknown id. Marking an already-read notification is a
    /// no-op for the unread counter.
    pub fn mark_read(&mut self, id: &str) -> bool {
        self.set_if(|s| s.read_one(id)).is_some()
    }

    pub fn clear_all(&mut self) {
        self.set(|s| {
            s.notifications.clear();
            s.unread_count = 0;
        });
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.set(|s| {
            s.sidebar.is_collapsed = !s.sidebar.is_collapsed;
            s.sidebar.is_collapsed
        })
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.set(|s| s.sidebar.is_collapsed = collapsed);
    }

    pub fn set_active_section(&mut self, section: &str) {
        self.set(|s| s.sidebar.active_section = section.to_string());
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set(|s| {
            s.theme = s.theme.flipped();
            s.theme
        })
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.set(|s| s.theme = theme);
    }
}

pub fn new_ui_store() -> Store<UiState> {
    Store::new(UI_STORE, UiState::default())
}
