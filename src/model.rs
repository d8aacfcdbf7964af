use crate::grid::Grid;
use crate::render::Snapshot;
use crate::rng::IonRng;

/// Unit steps a walking ion can take, all four equally likely.
const STEPS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Engine state. Growing until an ion freezes at or beyond the release
/// radius, then Saturated until the next reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrowthPhase {
    #[default]
    Growing,
    Saturated,
}

impl GrowthPhase {
    pub fn name(&self) -> &str {
        match self {
            GrowthPhase::Growing => "Growing",
            GrowthPhase::Saturated => "Saturated",
        }
    }
}

/// Diffusion-limited aggregation engine.
///
/// Owns the occupancy grid, the random source and the snapshot buffer.
/// Ions are released on the circle of radius `r_start` around the origin,
/// walk one lattice step at a time and freeze next to the first occupied
/// cardinal neighbor. A walker drifting out to `r_escape` is discarded and
/// a fresh one released in its place.
///
/// All public coordinates are origin-centered; [`Self::x_to_model_rep`]
/// and [`Self::y_to_model_rep`] are the only transforms into storage
/// space. The origin cell is occupied from creation and after every
/// reset, and occupied cells only accumulate between resets.
pub struct CrystalModel {
    grid: Grid,
    rng: IonRng,
    snapshot: Snapshot,
    r_start: u32,
    r_escape: u32,
    last: (i32, i32),
    phase: GrowthPhase,
    ions_attached: usize,
}

impl CrystalModel {
    /// Build an engine around a fresh `bath_width` x `bath_width` grid
    /// with the origin occupied.
    ///
    /// Fails fast on parameters that would misbehave mid-walk: the escape
    /// radius must exceed the release radius and the whole escape circle,
    /// including one probe cell beyond it, must map inside the bath.
    pub fn new(bath_width: usize, r_start: u32, r_escape: u32) -> Result<Self, String> {
        if r_start < 1 {
            return Err(format!("release radius must be at least 1, got {}", r_start));
        }
        if r_escape <= r_start {
            return Err(format!(
                "escape radius ({}) must exceed release radius ({})",
                r_escape, r_start
            ));
        }
        let max_escape = (bath_width.saturating_sub(1) / 2) as u32;
        if r_escape > max_escape {
            return Err(format!(
                "bath width {} is too small for escape radius {} (maximum {})",
                bath_width, r_escape, max_escape
            ));
        }

        let mut model = Self {
            grid: Grid::new(bath_width),
            rng: IonRng::default(),
            snapshot: Snapshot::new(r_escape),
            r_start,
            r_escape,
            last: (0, 0),
            phase: GrowthPhase::Growing,
            ions_attached: 0,
        };
        model.reset();
        Ok(model)
    }

    /// Clear the bath and re-seed the origin; the engine is Growing again.
    pub fn reset(&mut self) {
        self.grid.clear();
        let (cx, cy) = (self.x_to_model_rep(0), self.y_to_model_rep(0));
        self.grid.set(cx, cy, true);
        self.last = (0, 0);
        self.phase = GrowthPhase::Growing;
        self.ions_attached = 0;
    }

    /// Release one ion and walk it until it freezes beside the cluster.
    ///
    /// Returns `true` while the attachment lies strictly inside the
    /// release circle. `false` means the cluster has grown out to the
    /// release radius and the engine flips to Saturated; further calls
    /// are legal and still attach ions, but the phase stays Saturated
    /// until [`Self::reset`].
    pub fn crystallize_one_ion(&mut self) -> bool {
        let mut ion = self.release_ion();
        loop {
            if self.any_neighbours(ion) {
                break;
            }
            if Self::outside_circle(self.r_escape, ion) {
                // Drifted out of play: discard this walker, release a fresh one.
                ion = self.release_ion();
            } else {
                ion = self.step_once(ion);
            }
        }

        self.last = ion;
        let (mx, my) = (self.x_to_model_rep(ion.0), self.y_to_model_rep(ion.1));
        self.grid.set(mx, my, true);
        self.ions_attached += 1;

        let growing = !Self::outside_circle(self.r_start, ion);
        if !growing {
            self.phase = GrowthPhase::Saturated;
        }
        growing
    }

    /// Crystallize up to `steps` ions, stopping at the first attachment
    /// that reaches the release radius. Returns `true` only if all
    /// `steps` ions attached while still Growing.
    pub fn run_some_steps(&mut self, steps: u32) -> bool {
        for _ in 0..steps {
            if !self.crystallize_one_ion() {
                return false;
            }
        }
        true
    }

    /// Occupancy at origin-centered (x, y). The caller keeps the
    /// coordinates inside the bath; range is only asserted in debug
    /// builds.
    pub fn get_model_value(&self, x: i32, y: i32) -> bool {
        self.grid.get(self.x_to_model_rep(x), self.y_to_model_rep(y))
    }

    pub fn x_to_model_rep(&self, x: i32) -> usize {
        (x + self.grid.size() as i32 / 2) as usize
    }

    pub fn y_to_model_rep(&self, y: i32) -> usize {
        (self.grid.size() as i32 / 2 - y) as usize
    }

    pub fn get_last_x(&self) -> i32 {
        self.last.0
    }

    pub fn get_last_y(&self) -> i32 {
        self.last.1
    }

    /// Release radius; also the saturation threshold.
    pub fn get_r_bounds(&self) -> u32 {
        self.r_start
    }

    /// Escape radius; walkers at or beyond it are discarded.
    pub fn get_radius(&self) -> u32 {
        self.r_escape
    }

    pub fn get_bath_width(&self) -> usize {
        self.grid.size()
    }

    pub fn phase(&self) -> GrowthPhase {
        self.phase
    }

    /// Ions attached since the last reset, excluding the origin seed.
    pub fn ions_attached(&self) -> usize {
        self.ions_attached
    }

    /// Restart the random sequence.
    pub fn seed(&mut self, value: u32) {
        self.rng.seed(value);
    }

    /// Bordered ASCII snapshot of the bath; reuses the internal buffer.
    pub fn render(&mut self) -> &str {
        let Self {
            snapshot,
            grid,
            last,
            ..
        } = self;
        snapshot.render(grid, *last)
    }

    fn release_ion(&mut self) -> (i32, i32) {
        let alpha = 2.0 * std::f64::consts::PI * self.rng.next_double();
        let r = self.r_start as f64;
        (
            (r * alpha.cos()).floor() as i32,
            (r * alpha.sin()).floor() as i32,
        )
    }

    fn step_once(&mut self, ion: (i32, i32)) -> (i32, i32) {
        let (dx, dy) = STEPS[(self.rng.next_uint() & 3) as usize];
        (ion.0 + dx, ion.1 + dy)
    }

    /// Exact squared-distance test against an integer radius (avoids sqrt).
    fn outside_circle(radius: u32, ion: (i32, i32)) -> bool {
        let (x, y) = (ion.0 as i64, ion.1 as i64);
        x * x + y * y >= radius as i64 * radius as i64
    }

    fn any_neighbours(&self, ion: (i32, i32)) -> bool {
        STEPS
            .iter()
            .any(|&(dx, dy)| self.probe(ion.0 + dx, ion.1 + dy))
    }

    /// Occupancy probe used during the walk. A walker sitting right at the
    /// escape radius is neighbor-checked before it is discarded, so probes
    /// can reach one cell past the escape circle; anything mapping outside
    /// the bath reads as unoccupied.
    fn probe(&self, x: i32, y: i32) -> bool {
        let size = self.grid.size() as i32;
        let (mx, my) = (x + size / 2, size / 2 - y);
        if mx < 0 || mx >= size || my < 0 || my >= size {
            return false;
        }
        self.grid.get(mx as usize, my as usize)
    }
}
