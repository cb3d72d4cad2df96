use std::{cmp::Ordering, fmt, hash::Hash};

use ahash::{HashMap, HashMapExt};
use itertools::Itertools;

use super::{PriorityQueue, QueueElement};
use crate::error::{Error, Result};

/// Binary min-heap with an element to slot index, so that every operation
/// including [`change_priority`](PriorityQueue::change_priority) runs in
/// O(log n).
#[derive(Clone)]
pub struct HeapQueue<E> {
    heap: Vec<QueueElement<E>>,
    positions: HashMap<E, usize>,
    next_sequence: u64,
}

impl<E: Eq + Hash + Clone> Default for HeapQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Eq + Hash + Clone> HeapQueue<E> {
    pub fn new() -> HeapQueue<E> {
        HeapQueue {
            heap: Vec::new(),
            positions: HashMap::new(),
            next_sequence: 0,
        }
    }

    pub fn priority(&self, element: &E) -> Option<f64> {
        let &index = self.positions.get(element)?;
        Some(self.heap[index].priority)
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        if let Some(position) = self.positions.get_mut(&self.heap[i].element) {
            *position = i;
        }
        if let Some(position) = self.positions.get_mut(&self.heap[j].element) {
            *position = j;
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[index].cmp_key(&self.heap[parent]) != Ordering::Less {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < self.heap.len()
                && self.heap[left].cmp_key(&self.heap[smallest]) == Ordering::Less
            {
                smallest = left;
            }
            if right < self.heap.len()
                && self.heap[right].cmp_key(&self.heap[smallest]) == Ordering::Less
            {
                smallest = right;
            }
            if smallest == index {
                break;
            }

            self.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<E: Eq + Hash + Clone> PriorityQueue<E> for HeapQueue<E> {
    fn add(&mut self, element: E, priority: f64) -> Result<()> {
        if self.positions.contains_key(&element) {
            return Err(Error::DuplicateElement);
        }

        let index = self.heap.len();
        self.positions.insert(element.clone(), index);
        self.heap
            .push(QueueElement::new(element, priority, self.next_sequence));
        self.next_sequence += 1;
        self.sift_up(index);

        Ok(())
    }

    fn peek(&self) -> Result<&E> {
        self.heap
            .first()
            .map(|min| &min.element)
            .ok_or(Error::EmptyQueue)
    }

    fn extract_min(&mut self) -> Result<E> {
        if self.heap.is_empty() {
            return Err(Error::EmptyQueue);
        }

        let last = self.heap.len() - 1;
        self.swap(0, last);
        let min = self.heap.pop().ok_or(Error::EmptyQueue)?;
        self.positions.remove(&min.element);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        Ok(min.element)
    }

    fn change_priority(&mut self, element: &E, priority: f64) -> Result<()> {
        let &index = self.positions.get(element).ok_or(Error::NotFound)?;
        let old_priority = self.heap[index].priority;
        self.heap[index].priority = priority;

        match priority.total_cmp(&old_priority) {
            Ordering::Less => self.sift_up(index),
            Ordering::Greater => self.sift_down(index),
            Ordering::Equal => (),
        }

        Ok(())
    }

    fn contains(&self, element: &E) -> bool {
        self.positions.contains_key(element)
    }

    fn size(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }
}

/// Lists the queue as `[item0:priority0, item1:priority1, ...]` in the order
/// the items would be extracted.
impl<E: fmt::Display> fmt::Display for HeapQueue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = self
            .heap
            .iter()
            .sorted_by(|a, b| a.cmp_key(b))
            .map(|entry| format!("{}:{}", entry.element, entry.priority))
            .join(", ");
        write!(f, "[{}]", items)
    }
}
