use crate::config::AppConfig;

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };
}

/// What had keyboard focus when the key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// Nothing in particular; the page body.
    Body,
    /// A text field or similar editable element.
    TextInput,
    Other,
}

/// A key press as reported by the host, e.g. DOM `KeyboardEvent.code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub code: String,
    pub modifiers: Modifiers,
    pub focus: FocusTarget,
}

impl KeyInput {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            modifiers: Modifiers::NONE,
            focus: FocusTarget::Body,
        }
    }

    pub fn with_focus(mut self, focus: FocusTarget) -> Self {
        self.focus = focus;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    PreviousPage,
    NextPage,
    TogglePlayPause,
}

/// Configured key bindings.
#[derive(Debug, Clone)]
pub struct Shortcuts {
    prev_page: String,
    next_page: String,
    toggle_play_pause: String,
}

impl Shortcuts {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            prev_page: config.key_prev_page.clone(),
            next_page: config.key_next_page.clone(),
            toggle_play_pause: config.key_toggle_play_pause.clone(),
        }
    }

    /// Map a key press to an action. The play/pause toggle only fires while
    /// the page body has focus so typing a space in a field does not pause.
    pub fn action_for(&self, input: &KeyInput) -> Option<KeyAction> {
        let pressed = normalize_key_code(&input.code);

        if shortcut_matches(&self.toggle_play_pause, "space", &pressed, input.modifiers) {
            (input.focus == FocusTarget::Body).then_some(KeyAction::TogglePlayPause)
        } else if shortcut_matches(&self.prev_page, "arrowleft", &pressed, input.modifiers) {
            Some(KeyAction::PreviousPage)
        } else if shortcut_matches(&self.next_page, "arrowright", &pressed, input.modifiers) {
            Some(KeyAction::NextPage)
        } else {
            None
        }
    }
}

impl Default for Shortcuts {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

fn shortcut_matches(raw: &str, fallback: &str, pressed: &str, modifiers: Modifiers) -> bool {
    let normalized = normalize_shortcut_token(raw, fallback);

    let mut required = Modifiers::NONE;
    let mut required_key: Option<&str> = None;

    for token in normalized
        .split('+')
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        match token {
            "ctrl" | "control" => required.ctrl = true,
            "alt" | "option" => required.alt = true,
            "shift" => required.shift = true,
            "meta" | "logo" | "super" | "cmd" | "command" => required.meta = true,
            key => required_key = Some(key),
        }
    }

    let required_key = alias(required_key.unwrap_or(fallback));
    pressed == required_key && modifiers == required
}

fn normalize_shortcut_token(raw: &str, fallback: &str) -> String {
    let normalized = raw.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        fallback.to_string()
    } else {
        normalized
    }
}

/// `KeyboardEvent.code` values down to the names used in settings:
/// `KeyK` becomes `k`, `Digit1` becomes `1`, `ArrowLeft` becomes `arrowleft`.
fn normalize_key_code(code: &str) -> String {
    let lower = code.trim().to_ascii_lowercase();
    for prefix in ["key", "digit"] {
        if let Some(rest) = lower.strip_prefix(prefix) {
            if rest.chars().count() == 1 {
                return rest.to_string();
            }
        }
    }
    alias(&lower).to_string()
}

fn alias(key: &str) -> &str {
    match key {
        "spacebar" | " " => "space",
        "left" => "arrowleft",
        "right" => "arrowright",
        other => other,
    }
}
