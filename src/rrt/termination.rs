use std::time::{Duration, Instant};

/// Decides when planning should stop.
///
/// The planner polls the condition once before every iteration, never in the middle of
/// one.
pub trait TerminationCondition {
    /// Returns true when planning should stop.
    fn evaluate(&mut self) -> bool;
}

/// Stops after a fixed number of evaluations.
pub struct MaxIterationsTermination {
    max_iterations: usize,
    iterations: usize,
}

impl MaxIterationsTermination {
    pub fn new(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            iterations: 0,
        }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

impl TerminationCondition for MaxIterationsTermination {
    fn evaluate(&mut self) -> bool {
        if self.iterations >= self.max_iterations {
            return true;
        }
        self.iterations += 1;
        false
    }
}

/// Stops once a wall-clock budget, counted from construction, is spent.
pub struct MaxTimeTermination {
    deadline: Instant,
}

impl MaxTimeTermination {
    pub fn new(budget: Duration) -> Self {
        Self {
            deadline: Instant::now() + budget,
        }
    }
}

impl TerminationCondition for MaxTimeTermination {
    fn evaluate(&mut self) -> bool {
        Instant::now() >= self.deadline
    }
}

/// Wraps a closure returning true when planning should stop.
pub struct FnTermination<C: FnMut() -> bool> {
    condition: C,
}

impl<C: FnMut() -> bool> FnTermination<C> {
    pub fn new(condition: C) -> Self {
        Self { condition }
    }
}

impl<C: FnMut() -> bool> TerminationCondition for FnTermination<C> {
    fn evaluate(&mut self) -> bool {
        (self.condition)()
    }
}

/// Stops as soon as any of its conditions does. Every condition is evaluated each time.
pub struct AnyTermination {
    conditions: Vec<Box<dyn TerminationCondition>>,
}

impl AnyTermination {
    pub fn new(conditions: Vec<Box<dyn TerminationCondition>>) -> Self {
        Self { conditions }
    }
}

impl TerminationCondition for AnyTermination {
    fn evaluate(&mut self) -> bool {
        self.conditions
            .iter_mut()
            .fold(false, |stop, condition| condition.evaluate() || stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_iterations_allows_exactly_n() {
        let mut termination = MaxIterationsTermination::new(3);
        let allowed = (0..10).take_while(|_| !termination.evaluate()).count();
        assert_eq!(allowed, 3);
        assert_eq!(termination.iterations(), 3);
    }

    #[test]
    fn zero_time_budget_stops_immediately() {
        let mut termination = MaxTimeTermination::new(Duration::ZERO);
        assert!(termination.evaluate());
    }

    #[test]
    fn any_stops_when_one_stops() {
        let mut flag = false;
        let mut closure = FnTermination::new(move || {
            let stop = flag;
            flag = true;
            stop
        });
        assert!(!closure.evaluate());
        assert!(closure.evaluate());

        let mut any = AnyTermination::new(vec![
            Box::new(MaxIterationsTermination::new(100)),
            Box::new(MaxIterationsTermination::new(1)),
        ]);
        assert!(!any.evaluate());
        assert!(any.evaluate());
    }
}
