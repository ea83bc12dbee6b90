use crate::block::{List, Span};

/// Collects consecutive list items into one [`List`] per run of the same kind.
#[derive(Debug, Default)]
pub struct ListAggregator {
    open: Option<List>,
}

impl ListAggregator {
    /// Add an item. Returns the previously open list if this item switches
    /// between ordered and unordered.
    pub fn push(&mut self, ordered: bool, item: Vec<Span>) -> Option<List> {
        match &mut self.open {
            Some(list) if list.ordered == ordered => {
                list.items.push(item);
                None
            }
            _ => self.open.replace(List {
                ordered,
                items: vec![item],
            }),
        }
    }

    /// Close the open list, if any.
    pub fn flush(&mut self) -> Option<List> {
        self.open.take()
    }
}
