//! Clipboard: the OS clipboard through arboard, with an internal register
//! when the OS clipboard is unavailable

pub struct Clipboard {
    system: Option<arboard::Clipboard>,
    register: String,
}

impl std::fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clipboard")
            .field("system", &self.system.is_some())
            .field("register_len", &self.register.len())
            .finish()
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::internal()
    }
}

impl Clipboard {
    /// Connect to the OS clipboard, falling back to the register
    pub fn new() -> Self {
        let system = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                tracing::warn!("System clipboard unavailable, using internal register: {}", e);
                None
            }
        };
        Self {
            system,
            register: String::new(),
        }
    }

    /// Register-only clipboard
    pub fn internal() -> Self {
        Self {
            system: None,
            register: String::new(),
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.register = text.to_string();
        if let Some(system) = &mut self.system {
            if let Err(e) = system.set_text(text.to_string()) {
                tracing::warn!("Failed to write system clipboard: {}", e);
            }
        }
    }

    pub fn get_text(&mut self) -> String {
        if let Some(system) = &mut self.system {
            match system.get_text() {
                Ok(text) => return text,
                Err(e) => tracing::debug!("System clipboard read failed: {}", e),
            }
        }
        self.register.clone()
    }
}
