#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    InfoReported { label: String, message: String },
    ErrorReported { label: String, message: String },
    Cleared,
}

impl Message {
    pub fn info(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InfoReported {
            label: label.into(),
            message: message.into(),
        }
    }

    pub fn error(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ErrorReported {
            label: label.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBar {
    message: Option<String>,
    is_error: bool,
}

impl StatusBar {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    fn set_message(&mut self, label: String, message: String, is_error: bool) {
        let normalized_message = message.replace('\n', " ");
        self.message = Some(format!("[{label}] {normalized_message}"));
        self.is_error = is_error;
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::InfoReported { label, message } => self.set_message(label, message, false),
            Message::ErrorReported { label, message } => {
                self.set_message(format!("ERR: {label}"), message, true)
            }
            Message::Cleared => {
                self.message = None;
                self.is_error = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_is_empty() {
        let status_bar = StatusBar::default();
        assert_eq!(status_bar.message(), None);
        assert!(!status_bar.is_error());
    }

    #[test]
    fn test_info_reported() {
        let mut status_bar = StatusBar::default();
        status_bar.update(Message::info("Login", "Welcome back"));
        assert_eq!(status_bar.message(), Some("[Login] Welcome back"));
        assert!(!status_bar.is_error());
    }

    #[test]
    fn test_error_reported_and_normalized() {
        let mut status_bar = StatusBar::default();
        status_bar.update(Message::error("Hoax", "Failed\nto post"));
        assert_eq!(status_bar.message(), Some("[ERR: Hoax] Failed to post"));
        assert!(status_bar.is_error());
    }

    #[test]
    fn test_info_after_error_resets_severity() {
        let mut status_bar = StatusBar::default();
        status_bar.update(Message::error("Hoax", "Failed"));
        status_bar.update(Message::info("Hoax", "Posted"));
        assert!(!status_bar.is_error());
    }

    #[test]
    fn test_cleared() {
        let mut status_bar = StatusBar::default();
        status_bar.update(Message::info("Login", "Welcome back"));
        status_bar.update(Message::Cleared);
        assert_eq!(status_bar, StatusBar::default());
    }
}
