//! Listeners that record what a recognizer reports.

use directmanip_core::{listener, GestureRecognizer, GestureState, Listener};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Records a value sampled from a recognizer on every state change.
///
/// The first entry is sampled when the recorder is created, so a recorder on
/// an idle recognizer starts with its `Possible` state.
pub struct Recorder<R, T> {
    samples: Rc<RefCell<Vec<T>>>,
    listener: Listener<R>,
}

/// Records the state of a recognizer on every change.
pub type StateRecorder<R> = Recorder<R, GestureState>;

impl<R: GestureRecognizer> Recorder<R, GestureState> {
    /// Record every state `recognizer` goes through.
    pub fn states(recognizer: &R) -> Self {
        Self::new(recognizer, |r: &R| r.state())
    }
}

impl<R: GestureRecognizer, T: Clone + 'static> Recorder<R, T> {
    /// Record `sample(recognizer)` now and on every state change.
    pub fn new(recognizer: &R, sample: impl Fn(&R) -> T + 'static) -> Self {
        let samples = Rc::new(RefCell::new(vec![sample(recognizer)]));
        let sink = Rc::clone(&samples);
        let listener = listener(move |r: &R| sink.borrow_mut().push(sample(r)));
        recognizer.add_listener(Rc::clone(&listener));
        Self { samples, listener }
    }

    /// Samples recorded so far.
    pub fn samples(&self) -> Vec<T> {
        self.samples.borrow().clone()
    }

    /// The most recent sample.
    pub fn last(&self) -> Option<T> {
        self.samples.borrow().last().cloned()
    }

    /// Number of samples recorded.
    pub fn len(&self) -> usize {
        self.samples.borrow().len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.borrow().is_empty()
    }

    /// Forget every sample.
    pub fn clear(&self) {
        self.samples.borrow_mut().clear();
    }

    /// Stop recording from `recognizer`.
    pub fn detach(&self, recognizer: &R) -> bool {
        recognizer.remove_listener(&self.listener)
    }
}

impl<R, T: PartialEq> Recorder<R, T> {
    /// Assert the recorded samples equal `expected`.
    ///
    /// # Panics
    ///
    /// Panics with both sequences if they differ.
    #[track_caller]
    pub fn assert_samples(&self, expected: &[T])
    where
        T: fmt::Debug,
    {
        let actual = self.samples.borrow();
        assert!(
            actual.as_slice() == expected,
            "recorded samples differ\n  actual:   {:?}\n  expected: {:?}",
            actual.as_slice(),
            expected
        );
    }
}

impl<R, T: fmt::Debug> fmt::Debug for Recorder<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("samples", &self.samples.borrow())
            .finish_non_exhaustive()
    }
}
