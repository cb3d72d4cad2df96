use std::cmp::Ordering;

use crate::error::Result;

pub mod heap_queue;
pub mod scan_queue;

/// A priority queue holding distinct elements, each with a `f64` priority.
/// Smaller values mean higher priority, so `0.0` leaves the queue before
/// `1.0`.
///
/// Elements that share a priority leave the queue in insertion order, which
/// keeps every run reproducible for a fixed sequence of operations.
pub trait PriorityQueue<E> {
    /// Adds `element` with `priority`. Fails with
    /// [`DuplicateElement`](crate::error::Error::DuplicateElement) if the
    /// element is already queued.
    fn add(&mut self, element: E, priority: f64) -> Result<()>;

    /// Returns the element with the smallest priority without removing it.
    fn peek(&self) -> Result<&E>;

    /// Removes and returns the element with the smallest priority.
    fn extract_min(&mut self) -> Result<E>;

    /// Sets the priority of a queued element. The new priority may be larger
    /// or smaller than the old one.
    fn change_priority(&mut self, element: &E, priority: f64) -> Result<()>;

    fn contains(&self, element: &E) -> bool;

    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Clears all stored data, preparing for a new search.
    fn clear(&mut self);
}

#[derive(Clone, Debug)]
pub struct QueueElement<E> {
    pub element: E,
    pub priority: f64,
    pub sequence: u64,
}

impl<E> QueueElement<E> {
    pub fn new(element: E, priority: f64, sequence: u64) -> QueueElement<E> {
        QueueElement {
            element,
            priority,
            sequence,
        }
    }

    // Priority first, insertion order on ties. `total_cmp` keeps the order
    // total even for NaN.
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}
