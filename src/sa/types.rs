//! Core trait for Simulated Annealing.

use rand::Rng;

/// Defines a Simulated Annealing problem as a set of capabilities:
/// propose a move, evaluate its energy change, apply it.
///
/// The SA framework owns the temperature schedule and the Metropolis
/// acceptance decision.
///
/// # Minimization
///
/// SA minimizes the energy. For maximization, negate it.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_timetable::sa::SaProblem;
///
/// /// Minimize the number of set bits.
/// struct ZeroMax { n: usize }
///
/// impl SaProblem for ZeroMax {
///     type State = Vec<bool>;
///     type Move = usize;
///
///     fn initial_state<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
///         (0..self.n).map(|_| rng.random_bool(0.5)).collect()
///     }
///
///     fn energy(&self, s: &Vec<bool>) -> f64 {
///         s.iter().filter(|&&b| b).count() as f64
///     }
///
///     fn propose<R: Rng>(&self, _s: &Vec<bool>, rng: &mut R) -> Option<usize> {
///         (self.n > 0).then(|| rng.random_range(0..self.n))
///     }
///
///     fn apply(&self, s: &mut Vec<bool>, i: usize) {
///         s[i] = !s[i];
///     }
/// }
/// ```
pub trait SaProblem: Send + Sync {
    /// The state representation.
    type State: Clone + Send;

    /// A local move on a state.
    type Move: Copy;

    /// Creates a random initial state.
    fn initial_state<R: Rng>(&self, rng: &mut R) -> Self::State;

    /// Energy of a state. Lower is better.
    fn energy(&self, state: &Self::State) -> f64;

    /// Proposes a move from `state`, or `None` if the state has no neighbors.
    fn propose<R: Rng>(&self, state: &Self::State, rng: &mut R) -> Option<Self::Move>;

    /// Applies a move in place.
    fn apply(&self, state: &mut Self::State, mv: Self::Move);

    /// Energy change caused by applying `mv` to `state`.
    ///
    /// The default clones the state and recomputes the energy. Override it
    /// with an incremental formula when one exists.
    fn delta(&self, state: &Self::State, mv: Self::Move) -> f64 {
        let mut next = state.clone();
        self.apply(&mut next, mv);
        self.energy(&next) - self.energy(state)
    }
}
