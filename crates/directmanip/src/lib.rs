//! Direct manipulation: drag, pinch and rotate an element with touch.
//!
//! Re-exports the recognizers from `directmanip_core` and adds the layer that
//! applies them to an element:
//! - [`Plan`]: one gesture an element should respond to
//! - [`DirectlyManipulable`]: drag, pinch and rotate together
//! - [`GestureCoordinator`]: routes touch events and maintains the
//!   [`ManipulationTransform`]
//!
//! ```
//! use directmanip::{DirectlyManipulable, Element, GestureCoordinator, GestureKind};
//!
//! let mut coordinator = GestureCoordinator::new(Element::new(7));
//! coordinator.add_directly_manipulable(DirectlyManipulable::new());
//! assert_eq!(
//!     coordinator.kinds(),
//!     vec![GestureKind::Drag, GestureKind::Scale, GestureKind::Rotate]
//! );
//! assert!(coordinator.transform().is_identity());
//! ```

pub use directmanip_core::*;

mod coordinator;
mod plan;
mod transform;

pub use coordinator::GestureCoordinator;
pub use plan::{DirectlyManipulable, Plan};
pub use transform::ManipulationTransform;
