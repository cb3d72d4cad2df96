use serde::Serialize;

/// Notified after every move the game accepted. Keeps presentation concerns
/// such as animation out of the strategies.
pub trait MoveObserver<V> {
    fn on_move(&mut self, from: &V, to: &V);
}

impl<V> MoveObserver<V> for () {
    fn on_move(&mut self, _from: &V, _to: &V) {}
}

/// Records every accepted move in order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MoveLog<V> {
    pub moves: Vec<(V, V)>,
}

impl<V: Clone> MoveLog<V> {
    pub fn new() -> Self {
        MoveLog { moves: Vec::new() }
    }

    /// Vertices visited, starting with the first departure.
    pub fn route(&self) -> Vec<V> {
        let mut route: Vec<V> = self.moves.first().map(|(from, _)| from.clone()).into_iter().collect();
        route.extend(self.moves.iter().map(|(_, to)| to.clone()));
        route
    }
}

impl<V: Clone> MoveObserver<V> for MoveLog<V> {
    fn on_move(&mut self, from: &V, to: &V) {
        self.moves.push((from.clone(), to.clone()));
    }
}
