//! Life cycle of a single page turn, from grab or click to commit or cancel.

use crate::prelude::*;

/// Durations and thresholds of the turn animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnTiming {
    pub flip: Duration,
    pub drag_done: Duration,
    pub drag_return: Duration,
    pub commit_threshold: f32,
    pub drag_nudge_deg: f32,
}

impl Default for TurnTiming {
    fn default() -> Self {
        Self {
            flip: Duration::from_millis(FLIP_MS),
            drag_done: Duration::from_millis(FLIP_MS_DRAG_DONE),
            drag_return: Duration::from_millis(FLIP_MS_RETURN),
            commit_threshold: DRAG_COMPLETE_T,
            drag_nudge_deg: DRAG_NUDGE_DEG,
        }
    }
}

/// Pointer bookkeeping for a drag-driven turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTrack {
    pub pointer_id: u64,
    pub start_x: f32,
    /// Outer edge of the grabbed half: right for forward turns, left for backward.
    pub edge_x: f32,
    pub half_width: f32,
    /// Share of the way from the outer edge to the spine, `0..=1`.
    pub progress: f32,
}

impl DragTrack {
    fn progress_at(&self, x: f32, direction: TurnDirection) -> f32 {
        if self.half_width <= 0.0 {
            return 0.0;
        }
        let travelled = match direction {
            TurnDirection::Forward => self.edge_x - x,
            TurnDirection::Backward => x - self.edge_x,
        };
        (travelled / self.half_width).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnPhase {
    /// Timed turn started by click, key or wheel.
    Animating(Tween),
    /// Angle follows the pointer.
    Dragging(DragTrack),
    /// Released past the threshold; finishing the rotation.
    Committing(Tween),
    /// Released short of the threshold; falling back flat.
    Cancelling(Tween),
}

/// The sheet's pose for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnPose {
    pub direction: TurnDirection,
    pub deg: f32,
    pub shade: ShadeFrame,
}

/// Result of advancing the active session by one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnTick {
    Frame(TurnPose),
    /// Rotation finished, still waiting on the prefetch gate.
    AwaitingGate(TurnPose),
    /// The session ended and the view should move to `target`.
    Committed { pose: TurnPose, target: View },
    /// The session ended and the view stays at `origin`.
    Cancelled { pose: TurnPose, origin: View },
}

impl TurnTick {
    pub fn pose(&self) -> &TurnPose {
        match self {
            TurnTick::Frame(pose) | TurnTick::AwaitingGate(pose) => pose,
            TurnTick::Committed { pose, .. } | TurnTick::Cancelled { pose, .. } => pose,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, TurnTick::Committed { .. } | TurnTick::Cancelled { .. })
    }
}

/// One turn in progress.
#[derive(Debug)]
pub struct TurnSession {
    plan: TurnPlan,
    deg: f32,
    phase: TurnPhase,
    gate: PrefetchGate,
}

impl TurnSession {
    pub fn plan(&self) -> &TurnPlan {
        &self.plan
    }

    pub fn direction(&self) -> TurnDirection {
        self.plan.direction
    }

    pub fn deg(&self) -> f32 {
        self.deg
    }

    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    /// Drag progress, or `None` when the turn is not pointer-driven.
    pub fn progress(&self) -> Option<f32> {
        match self.phase {
            TurnPhase::Dragging(track) => Some(track.progress),
            _ => None,
        }
    }

    pub fn gate(&self) -> &PrefetchGate {
        &self.gate
    }
}

/// Drives at most one [`TurnSession`] at a time. Start requests while a
/// session exists are ignored.
#[derive(Debug, Default)]
pub struct TurnController {
    session: Option<TurnSession>,
    timing: TurnTiming,
    shading: ShadingParams,
}

impl TurnController {
    pub fn new(timing: TurnTiming, shading: ShadingParams) -> Self {
        Self {
            session: None,
            timing,
            shading,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&TurnSession> {
        self.session.as_ref()
    }

    fn pose(&self, direction: TurnDirection, deg: f32) -> TurnPose {
        TurnPose {
            direction,
            deg,
            shade: shade(deg, direction, &self.shading),
        }
    }

    fn current_pose(&self) -> Option<TurnPose> {
        self.session
            .as_ref()
            .map(|s| self.pose(s.direction(), s.deg))
    }

    fn start(&mut self, plan: TurnPlan, gate: PrefetchGate, deg: f32, phase: TurnPhase) -> Option<TurnPose> {
        if self.is_busy() {
            debug!("Turn already in progress; ignoring {:?} request", plan.direction);
            return None;
        }
        debug!("Turning {:?} from {:?} to {:?}", plan.direction, plan.origin, plan.target);
        self.session = Some(TurnSession {
            plan,
            deg,
            phase,
            gate,
        });
        self.current_pose()
    }

    /// Start a timed turn that rotates the sheet all the way over.
    pub fn begin_animated(&mut self, plan: TurnPlan, gate: PrefetchGate, now: Instant) -> Option<TurnPose> {
        let tween = Tween::new(0.0, plan.direction.target_deg(), now, self.timing.flip);
        self.start(plan, gate, 0.0, TurnPhase::Animating(tween))
    }

    /// Start a pointer-driven turn. The sheet lifts slightly until the first move.
    pub fn begin_drag(
        &mut self,
        plan: TurnPlan,
        gate: PrefetchGate,
        pointer: PointerInput,
        geometry: BookGeometry,
    ) -> Option<TurnPose> {
        let edge_x = match plan.direction {
            TurnDirection::Forward => geometry.left + geometry.width,
            TurnDirection::Backward => geometry.left,
        };
        let track = DragTrack {
            pointer_id: pointer.pointer_id,
            start_x: pointer.client_x,
            edge_x,
            half_width: geometry.half_width(),
            progress: 0.0,
        };
        let nudge = plan.direction.sign() * self.timing.drag_nudge_deg;
        self.start(plan, gate, nudge, TurnPhase::Dragging(track))
    }

    /// Follow the pointer. Samples from other pointers, or outside a drag, are ignored.
    pub fn update_drag(&mut self, pointer: PointerInput) -> Option<TurnPose> {
        let session = self.session.as_mut()?;
        let TurnPhase::Dragging(track) = &mut session.phase else {
            return None;
        };
        if track.pointer_id != pointer.pointer_id {
            return None;
        }

        let direction = session.plan.direction;
        track.progress = track.progress_at(pointer.client_x, direction);
        session.deg = direction.target_deg() * track.progress;
        self.current_pose()
    }

    /// Release the sheet: finish the turn past the commit threshold, otherwise
    /// let it fall back. A `Cancel` release keeps the last tracked progress.
    pub fn end_drag(&mut self, pointer: PointerInput, now: Instant) -> Option<TurnPose> {
        if pointer.phase != PointerPhase::Cancel {
            self.update_drag(pointer);
        }

        let threshold = self.timing.commit_threshold;
        let (drag_done, drag_return) = (self.timing.drag_done, self.timing.drag_return);
        let session = self.session.as_mut()?;
        let TurnPhase::Dragging(track) = session.phase else {
            return None;
        };
        if track.pointer_id != pointer.pointer_id {
            return None;
        }

        session.phase = if track.progress > threshold {
            let to = session.plan.direction.target_deg();
            TurnPhase::Committing(Tween::new(session.deg, to, now, drag_done))
        } else {
            TurnPhase::Cancelling(Tween::new(session.deg, 0.0, now, drag_return))
        };
        debug!("Drag released at {:.2}: {:?}", track.progress, session.phase);
        self.current_pose()
    }

    /// Advance the active session to `now`.
    pub fn tick(&mut self, now: Instant) -> Option<TurnTick> {
        let shading = self.shading;
        let session = self.session.as_mut()?;
        let direction = session.plan.direction;
        let pose_at = |deg: f32| TurnPose {
            direction,
            deg,
            shade: shade(deg, direction, &shading),
        };

        let tick = match session.phase {
            TurnPhase::Dragging(_) => TurnTick::Frame(pose_at(session.deg)),
            TurnPhase::Animating(tween) | TurnPhase::Committing(tween) => {
                let (deg, done) = tween.sample(now);
                session.deg = deg;
                if !done {
                    TurnTick::Frame(pose_at(deg))
                } else if session.gate.is_open() {
                    let target = session.plan.target;
                    self.session = None;
                    TurnTick::Committed {
                        pose: pose_at(deg),
                        target,
                    }
                } else {
                    TurnTick::AwaitingGate(pose_at(deg))
                }
            }
            TurnPhase::Cancelling(tween) => {
                let (deg, done) = tween.sample(now);
                session.deg = deg;
                if done {
                    let origin = session.plan.origin;
                    self.session = None;
                    TurnTick::Cancelled {
                        pose: pose_at(deg),
                        origin,
                    }
                } else {
                    TurnTick::Frame(pose_at(deg))
                }
            }
        };
        Some(tick)
    }

    /// Suspend until the active session's prefetch gate has opened.
    pub async fn wait_for_gate(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.gate.wait().await;
        }
    }
}
