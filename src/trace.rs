/// Ordered, human readable record of the steps a construction went through.
///
/// The trace is purely diagnostic: results never depend on it. Every step is also emitted as a
/// `tracing` event at trace level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace(Vec<String>);

impl Trace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a step.
    pub fn step(&mut self, step: impl Into<String>) {
        let step = step.into();
        tracing::trace!("{step}");
        self.0.push(step);
    }

    /// Appends the steps of a nested construction, indented below the current one.
    pub fn nest(&mut self, other: Trace) {
        self.0.extend(other.0.into_iter().map(|s| format!("  {s}")));
    }

    /// The recorded steps in order.
    pub fn steps(&self) -> &[String] {
        &self.0
    }

    /// Wraps `value` together with this trace.
    pub fn finish<T>(self, value: T) -> Traced<T> {
        Traced { value, steps: self.0 }
    }
}

/// A result value together with the trace of steps that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traced<T> {
    /// The result.
    pub value: T,
    /// Diagnostic construction steps, in order.
    pub steps: Vec<String>,
}

impl<T> Traced<T> {
    /// Drops the trace.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Splits into the value and a [`Trace`] that further steps can be appended to.
    pub fn into_parts(self) -> (T, Trace) {
        (self.value, Trace(self.steps))
    }

    /// Maps the value, keeping the trace.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Traced<U> {
        Traced {
            value: f(self.value),
            steps: self.steps,
        }
    }
}
