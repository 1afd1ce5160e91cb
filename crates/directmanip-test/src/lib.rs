#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::new_without_default)]
#![allow(clippy::manual_assert)]
//! Testing harness for directmanip recognizers.
//!
//! - [`TouchScript`]: build realistic multi-touch streams
//! - [`Recorder`] / [`StateRecorder`]: capture what listeners observe
//! - [`Driver`]: deliver events and tick like a host loop
//! - [`Recording`] / [`Snapshot`]: JSON baselines of a gesture
//!
//! ```
//! use directmanip_core::{DragGestureRecognizer, Element, GestureConfig, GestureRecognizer, GestureState};
//! use directmanip_test::{Driver, StateRecorder, TouchScript};
//!
//! let mut drag = DragGestureRecognizer::with_config(GestureConfig::default().with_drag_slop(0.0));
//! drag.attach(&Element::new(1));
//! let recorder = StateRecorder::states(&drag);
//!
//! Driver::new(drag).play(&TouchScript::new().down(0.0, 0.0).move_to(50.0, 0.0).up().build());
//!
//! recorder.assert_samples(&[
//!     GestureState::Possible,
//!     GestureState::Began,
//!     GestureState::Changed,
//!     GestureState::Recognized,
//!     GestureState::Possible,
//! ]);
//! ```

mod driver;
mod recorder;
mod script;
mod snapshot;

pub use driver::Driver;
pub use recorder::{Recorder, StateRecorder};
pub use script::{TouchScript, DEFAULT_STEP_MS};
pub use snapshot::{Recording, Snapshot};
