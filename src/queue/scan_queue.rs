use std::cmp::Ordering;

use super::{PriorityQueue, QueueElement};
use crate::error::{Error, Result};

/// A simple but slow queue: every operation scans all entries, O(n). Needs
/// only `PartialEq` on its elements.
#[derive(Clone)]
pub struct ScanQueue<E> {
    data: Vec<QueueElement<E>>,
    next_sequence: u64,
}

impl<E: PartialEq> Default for ScanQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PartialEq> ScanQueue<E> {
    pub fn new() -> ScanQueue<E> {
        ScanQueue {
            data: Vec::new(),
            next_sequence: 0,
        }
    }

    fn position(&self, element: &E) -> Option<usize> {
        self.data.iter().position(|entry| &entry.element == element)
    }

    fn min_position(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (index, entry) in self.data.iter().enumerate() {
            match best {
                Some(current) if entry.cmp_key(&self.data[current]) != Ordering::Less => (),
                _ => best = Some(index),
            }
        }
        best
    }
}

impl<E: PartialEq> PriorityQueue<E> for ScanQueue<E> {
    fn add(&mut self, element: E, priority: f64) -> Result<()> {
        if self.position(&element).is_some() {
            return Err(Error::DuplicateElement);
        }
        self.data
            .push(QueueElement::new(element, priority, self.next_sequence));
        self.next_sequence += 1;
        Ok(())
    }

    fn peek(&self) -> Result<&E> {
        let index = self.min_position().ok_or(Error::EmptyQueue)?;
        Ok(&self.data[index].element)
    }

    fn extract_min(&mut self) -> Result<E> {
        let index = self.min_position().ok_or(Error::EmptyQueue)?;
        Ok(self.data.remove(index).element)
    }

    fn change_priority(&mut self, element: &E, priority: f64) -> Result<()> {
        let index = self.position(element).ok_or(Error::NotFound)?;
        self.data[index].priority = priority;
        Ok(())
    }

    fn contains(&self, element: &E) -> bool {
        self.position(element).is_some()
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn clear(&mut self) {
        self.data.clear();
    }
}
