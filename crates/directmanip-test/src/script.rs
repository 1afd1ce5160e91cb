//! Scripted touch streams.

use directmanip_core::{MotionAction, MotionEvent, Point, PointerId};

/// Default time between scripted events, about one frame.
pub const DEFAULT_STEP_MS: i64 = 16;

/// Builder for a stream of motion events.
///
/// Keeps track of the pointers currently down so each event carries the full
/// pointer set, the way a platform would deliver it. Time advances by a fixed
/// step per event.
///
/// ```
/// use directmanip_test::TouchScript;
///
/// let events = TouchScript::new()
///     .down(0.0, 0.0)
///     .pointer_down(100.0, 0.0)
///     .move_pointers(&[(0.0, 0.0), (200.0, 0.0)])
///     .pointer_up(1)
///     .up()
///     .build();
/// assert_eq!(events.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct TouchScript {
    events: Vec<MotionEvent>,
    pointers: Vec<(PointerId, Point)>,
    next_id: u32,
    time_ms: i64,
    step_ms: i64,
    raw_offset: Point,
}

impl TouchScript {
    /// Create an empty script starting at time 0.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            pointers: Vec::new(),
            next_id: 0,
            time_ms: 0,
            step_ms: DEFAULT_STEP_MS,
            raw_offset: Point::ORIGIN,
        }
    }

    /// Set the time between events.
    pub fn step(mut self, step_ms: i64) -> Self {
        self.step_ms = step_ms;
        self
    }

    /// Offset between local and raw coordinates, as if the target sat at
    /// `offset` on screen.
    pub fn raw_offset(mut self, x: f32, y: f32) -> Self {
        self.raw_offset = Point::new(x, y);
        self
    }

    /// Let `ms` pass without an event.
    pub fn wait(mut self, ms: i64) -> Self {
        self.time_ms += ms;
        self
    }

    /// First pointer goes down. Forgets any pointer still down.
    pub fn down(mut self, x: f32, y: f32) -> Self {
        self.pointers.clear();
        self.next_id = 0;
        self.add_pointer(Point::new(x, y));
        self.emit(MotionAction::Down, 0)
    }

    /// Another pointer goes down, appended after the existing ones.
    pub fn pointer_down(mut self, x: f32, y: f32) -> Self {
        self.add_pointer(Point::new(x, y));
        let index = self.pointers.len() - 1;
        self.emit(MotionAction::PointerDown, index)
    }

    /// Move the first pointer.
    pub fn move_to(self, x: f32, y: f32) -> Self {
        self.move_pointer(0, x, y)
    }

    /// Move the pointer at `index`, keeping the others in place.
    pub fn move_pointer(mut self, index: usize, x: f32, y: f32) -> Self {
        if let Some((_, p)) = self.pointers.get_mut(index) {
            *p = Point::new(x, y);
        }
        self.emit(MotionAction::Move, 0)
    }

    /// Move every pointer at once. Extra positions are ignored.
    pub fn move_pointers(mut self, positions: &[(f32, f32)]) -> Self {
        for ((_, p), &(x, y)) in self.pointers.iter_mut().zip(positions) {
            *p = Point::new(x, y);
        }
        self.emit(MotionAction::Move, 0)
    }

    /// Move the first pointer to `(x, y)` in `steps` evenly spaced moves.
    pub fn drag_to(mut self, x: f32, y: f32, steps: u32) -> Self {
        let Some(&(_, start)) = self.pointers.first() else {
            return self;
        };
        let target = Point::new(x, y);
        let steps = steps.max(1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let p = start + (target - start) * t;
            self = self.move_to(p.x, p.y);
        }
        self
    }

    /// Lift the pointer at `index` while others stay down.
    pub fn pointer_up(mut self, index: usize) -> Self {
        if index >= self.pointers.len() {
            return self;
        }
        self = self.emit(MotionAction::PointerUp, index);
        self.pointers.remove(index);
        self
    }

    /// Lift the last pointer.
    pub fn up(mut self) -> Self {
        self = self.emit(MotionAction::Up, 0);
        self.pointers.clear();
        self
    }

    /// Abort the gesture.
    pub fn cancel(mut self) -> Self {
        self = self.emit(MotionAction::Cancel, 0);
        self.pointers.clear();
        self
    }

    /// A hover sample that touches no pointer state.
    pub fn hover(mut self, x: f32, y: f32) -> Self {
        let event = MotionEvent::single(MotionAction::HoverMove, self.time_ms, x, y)
            .with_raw(Point::new(x, y) + self.raw_offset);
        self.push(event)
    }

    /// Number of pointers currently down.
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Events scripted so far.
    pub fn events(&self) -> &[MotionEvent] {
        &self.events
    }

    /// Finish the script.
    pub fn build(self) -> Vec<MotionEvent> {
        self.events
    }

    fn add_pointer(&mut self, position: Point) {
        self.pointers.push((PointerId::new(self.next_id), position));
        self.next_id += 1;
    }

    fn emit(self, action: MotionAction, action_index: usize) -> Self {
        let positions: Vec<Point> = self.pointers.iter().map(|&(_, p)| p).collect();
        let ids: Vec<PointerId> = self.pointers.iter().map(|&(id, _)| id).collect();
        let raw = positions.first().copied().unwrap_or_default() + self.raw_offset;
        let event = MotionEvent::new(action, self.time_ms, &positions)
            .with_action_index(action_index)
            .with_pointer_ids(&ids)
            .with_raw(raw);
        self.push(event)
    }

    fn push(mut self, event: MotionEvent) -> Self {
        self.events.push(event);
        self.time_ms += self.step_ms;
        self
    }
}

impl Default for TouchScript {
    fn default() -> Self {
        Self::new()
    }
}
