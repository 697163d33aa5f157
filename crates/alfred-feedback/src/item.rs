use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackDocument {
    pub items: Vec<FeedbackItem>,
}

impl FeedbackDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: FeedbackItem) {
        self.items.push(item);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One selectable row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackItem {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    /// Passed to the next workflow step when the row is actioned.
    pub arg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mods: Option<Mods>,
}

impl FeedbackItem {
    /// A valid item with no icon and no modifier actions.
    pub fn new(
        uid: impl Into<String>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        arg: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            title: title.into(),
            subtitle: subtitle.into(),
            arg: arg.into(),
            icon: None,
            valid: true,
            mods: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_mods(mut self, mods: Mods) -> Self {
        self.mods = Some(mods);
        self
    }
}

/// Alternate actions keyed by the modifier held while actioning an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mods {
    pub alt: ModAction,
    pub ctrl: ModAction,
    pub cmd: ModAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModAction {
    pub valid: bool,
    pub subtitle: String,
    pub arg: Option<String>,
}

impl ModAction {
    /// Open `arg` when present; otherwise an invalid action explaining that
    /// `title` is missing.
    pub fn link(title: &str, arg: Option<&str>) -> Self {
        match arg {
            Some(url) if !url.is_empty() => Self {
                valid: true,
                subtitle: format!("Open {url}"),
                arg: Some(url.to_string()),
            },
            _ => Self {
                valid: false,
                subtitle: format!("{title} not available"),
                arg: arg.map(str::to_string),
            },
        }
    }
}
