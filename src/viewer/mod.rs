mod animation;
mod clock;
mod debounce;
mod source;

pub use animation::{ease_in_out_cubic, CancellationToken, ParameterTween};
pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::{RebuildDebouncer, DEFAULT_DEBOUNCE};
pub use source::{ChangeListener, ParameterSource, ParameterStore};

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::geometry::ShapeParameters;
use crate::render::{Camera, DrawingSurface, ProjectionRenderer};
use crate::scene::{Geometry, KnotGeometry, ObjectId, SceneGraph, SceneObject};
use crate::tessellation::Mesh;

/// Tuning for a [`Viewer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    /// Quiet period before a parameter change triggers a rebuild.
    pub debounce: Duration,
    /// Auto-rotation speed about Y in radians per second. X turns at half rate.
    pub rotation_speed: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            rotation_speed: 1.0,
        }
    }
}

/// Changes reported by the source since the last frame.
#[derive(Debug, Default)]
struct Inbox {
    latest: Option<ShapeParameters>,
    muted: bool,
}

/// Owns a knot scene and advances it one frame at a time.
///
/// Edits made through the [`ParameterSource`] are debounced into mesh
/// rebuilds and cancel any running tween. Tweens started with
/// [`animate_to`](Self::animate_to) rebuild on every frame they run. A new
/// mesh replaces the old one only once it is fully built.
pub struct Viewer<S, C = SystemClock> {
    source: S,
    inbox: Rc<RefCell<Inbox>>,
    clock: C,
    config: ViewerConfig,
    scene: SceneGraph,
    knot: ObjectId,
    camera: Camera,
    renderer: ProjectionRenderer,
    debouncer: RebuildDebouncer,
    tween: Option<ParameterTween>,
    last_frame: Option<Instant>,
    rebuilds: u64,
}

impl<S> Viewer<S, SystemClock>
where
    S: ParameterSource,
{
    /// Creates a viewer driven by wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer cannot be created.
    pub fn new(source: S, config: ViewerConfig) -> Result<Self> {
        Self::with_clock(source, config, SystemClock)
    }
}

impl<S, C> Viewer<S, C>
where
    S: ParameterSource,
    C: Clock,
{
    /// Creates a viewer reading time from `clock`.
    ///
    /// The knot is built immediately from the source's current parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer cannot be created.
    pub fn with_clock(mut source: S, config: ViewerConfig, clock: C) -> Result<Self> {
        let inbox = Rc::new(RefCell::new(Inbox::default()));
        let sink = Rc::clone(&inbox);
        source.on_change(Box::new(move |params| {
            let mut inbox = sink.borrow_mut();
            if !inbox.muted {
                inbox.latest = Some(*params);
            }
        }));

        let mut scene = SceneGraph::new();
        let knot = scene.add(SceneObject::knot(&source.params()));

        Ok(Self {
            source,
            inbox,
            clock,
            config,
            scene,
            knot,
            camera: Camera::default(),
            renderer: ProjectionRenderer::new()?,
            debouncer: RebuildDebouncer::new(config.debounce),
            tween: None,
            last_frame: None,
            rebuilds: 0,
        })
    }

    /// Advances one frame and draws it on `surface`.
    ///
    /// Order: pending source edits, the running tween or a due debounced
    /// rebuild, auto-rotation, then rendering. A missing surface skips the
    /// drawing step only.
    ///
    /// # Errors
    ///
    /// Returns an error if the knot object has been removed from the scene.
    pub fn frame<D>(&mut self, surface: Option<&mut D>) -> Result<()>
    where
        D: DrawingSurface + ?Sized,
    {
        let now = self.clock.now();
        let dt = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_frame = Some(now);

        let edited = self.inbox.borrow_mut().latest.take();
        if let Some(params) = edited {
            self.cancel_animation();
            self.debouncer.request(params, now);
        }

        if let Some(mut tween) = self.tween.take() {
            if let Some(params) = tween.step(dt) {
                self.debouncer.cancel();
                self.publish(&params);
                self.rebuild(&params)?;
                if !tween.is_finished() {
                    self.tween = Some(tween);
                }
            }
        } else if let Some(params) = self.debouncer.poll(now) {
            self.rebuild(&params)?;
        }

        let angle = self.config.rotation_speed * dt.as_secs_f64();
        let transform = &mut self.scene.get_mut(self.knot)?.transform;
        transform.rotation.y += angle;
        transform.rotation.x += angle * 0.5;

        self.renderer.render_frame(&self.scene, &self.camera, surface);
        Ok(())
    }

    /// Starts an eased transition to `target`, cancelling any running one.
    ///
    /// The returned token stops the transition at its current value.
    pub fn animate_to(&mut self, target: ShapeParameters, duration: Duration) -> CancellationToken {
        self.cancel_animation();
        let from = self.current_params();
        let tween = ParameterTween::new(from, target.sanitized(), duration);
        let token = tween.token();
        tracing::debug!(?duration, "starting parameter animation");
        self.tween = Some(tween);
        token
    }

    /// Stops the running tween, if any.
    pub fn cancel_animation(&mut self) {
        if let Some(tween) = self.tween.take() {
            tween.token().cancel();
            tracing::debug!("parameter animation cancelled");
        }
    }

    /// Whether a tween is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tween.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Updates the camera for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[must_use]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// ID of the knot object in [`scene`](Self::scene).
    #[must_use]
    pub fn knot_id(&self) -> ObjectId {
        self.knot
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the source; edits take effect on later frames.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Parameters of the currently displayed mesh.
    #[must_use]
    pub fn current_params(&self) -> ShapeParameters {
        self.knot_geometry()
            .map_or_else(|| self.source.params().sanitized(), |k| *k.params())
    }

    /// The currently displayed mesh, if the knot is still in the scene.
    #[must_use]
    pub fn mesh(&self) -> Option<&Mesh> {
        self.knot_geometry().map(KnotGeometry::mesh)
    }

    /// Number of meshes built since construction, excluding the first.
    #[must_use]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    fn knot_geometry(&self) -> Option<&KnotGeometry> {
        self.scene.get(self.knot).ok()?.geometry.as_knot()
    }

    /// Writes tween values back to the source without treating them as edits.
    fn publish(&mut self, params: &ShapeParameters) {
        self.inbox.borrow_mut().muted = true;
        self.source.set_params(*params);
        self.inbox.borrow_mut().muted = false;
    }

    fn rebuild(&mut self, params: &ShapeParameters) -> Result<()> {
        let geometry = KnotGeometry::build(params);
        tracing::debug!(
            segments = geometry.params().segment_count,
            triangles = geometry.mesh().triangle_count(),
            "rebuilt knot mesh"
        );
        self.scene.set_geometry(self.knot, Geometry::Knot(geometry))?;
        self.rebuilds += 1;
        Ok(())
    }
}
