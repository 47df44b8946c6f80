//! Selection state for list views
//!
//! Messages are named in past tense to describe what happened; `update` is
//! the only way to change the selection.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// A specific item was selected by index
    ItemSelected(usize),
    /// The selection was cleared
    SelectionCleared,
    /// The previous item was selected
    PreviousItemSelected,
    /// The next item of a list with `len` items was selected
    NextItemSelected { len: usize },
    /// `count` items were inserted above the selection
    ItemsPrepended { count: usize },
    /// The list was replaced and now holds `len` items
    ItemsReplaced { len: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected_index: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn is_selected(&self) -> bool {
        self.selected_index.is_some()
    }

    /// Whether the selection sits on the last of `len` items
    pub fn is_at_last(&self, len: usize) -> bool {
        len > 0 && self.selected_index == Some(len - 1)
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::ItemSelected(index) => {
                self.selected_index = Some(index);
            }
            Message::SelectionCleared => {
                self.selected_index = None;
            }
            Message::PreviousItemSelected => {
                self.selected_index = Some(self.selected_index.map_or(0, |i| i.saturating_sub(1)));
            }
            Message::NextItemSelected { len } => match self.selected_index {
                Some(index) if index + 1 < len => {
                    self.selected_index = Some(index + 1);
                }
                None if len > 0 => {
                    self.selected_index = Some(0);
                }
                _ => {}
            },
            Message::ItemsPrepended { count } => {
                // Keep pointing at the same item
                if let Some(index) = self.selected_index {
                    self.selected_index = Some(index + count);
                }
            }
            Message::ItemsReplaced { len } => {
                self.selected_index = match self.selected_index {
                    _ if len == 0 => None,
                    Some(index) => Some(index.min(len - 1)),
                    None => None,
                };
            }
        }
    }
}
